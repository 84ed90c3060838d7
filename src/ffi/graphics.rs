//! Graphics calls: surface setup, transforms, textures, textured draws
//!
//! Wire layouts (all little-endian 32-bit words in module memory):
//! - `Image`: `[data_ptr, width, height, components]`
//! - `Texture`: `[id, width, height]`
//! - color: `[r, g, b, a]` as f32 in [0, 1]
//! - matrix: 16 f32, column-major

use anyhow::Result;
use glam::Mat4;
use image::RgbaImage;
use tracing::warn;
use wasmtime::{Caller, Linker};

use super::require_memory;
use crate::error::HostError;
use crate::memory;
use crate::platform::{Color, Platform, TextureRect};
use crate::wasm::HostContext;

pub fn register<P: Platform>(linker: &mut Linker<HostContext<P>>) -> Result<()> {
    linker.func_wrap("env", "InitGraphics", init_graphics::<P>)?;
    linker.func_wrap("env", "SetProjection", set_projection::<P>)?;
    linker.func_wrap("env", "SetView", set_view::<P>)?;
    linker.func_wrap("env", "ClearBackground", clear_background::<P>)?;
    linker.func_wrap("env", "LoadTextureFromImage", load_texture_from_image::<P>)?;
    linker.func_wrap("env", "UnloadTexture", unload_texture::<P>)?;
    linker.func_wrap("env", "DrawRectTextured", draw_rect_textured::<P>)?;
    linker.func_wrap("env", "JsGetCanvasWidth", canvas_width::<P>)?;
    linker.func_wrap("env", "JsGetCanvasHeight", canvas_height::<P>)?;
    Ok(())
}

/// Size the drawing surface and derive the projection from it
fn init_graphics<P: Platform>(mut caller: Caller<'_, HostContext<P>>, width: i32, height: i32) {
    let ctx = caller.data_mut();
    ctx.platform.set_surface_size(width as u32, height as u32);
    ctx.transforms.set_projection(width as f32, height as f32);
}

/// The projection is host-privileged: it is derived from the surface, not
/// from game logic. A module-supplied matrix is acknowledged and discarded.
fn set_projection<P: Platform>(_caller: Caller<'_, HostContext<P>>, _matrix_ptr: u32) {
    warn!("SetProjection: projection is host-controlled, ignoring module matrix");
}

fn set_view<P: Platform>(mut caller: Caller<'_, HostContext<P>>, matrix_ptr: u32) -> Result<()> {
    let memory = require_memory(&caller)?;
    let cols = memory::read_f32_words::<16>(memory, &caller, matrix_ptr)?;
    caller
        .data_mut()
        .transforms
        .set_view(Mat4::from_cols_array(&cols));
    Ok(())
}

fn clear_background<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    color_ptr: u32,
) -> Result<()> {
    let memory = require_memory(&caller)?;
    let color = Color::from(memory::read_f32_words::<4>(memory, &caller, color_ptr)?);
    caller.data_mut().platform.clear(color);
    Ok(())
}

/// Copy an RGBA image out of module memory into the texture table and write
/// the resulting `Texture` words back at `out_ptr`.
fn load_texture_from_image<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    out_ptr: u32,
    image_ptr: u32,
    _filter: i32,
    _mipmaps: i32,
) -> Result<()> {
    let memory = require_memory(&caller)?;
    let [data_ptr, width, height, components] =
        memory::read_u32_words::<4>(memory, &caller, image_ptr)?;
    if components != 4 {
        anyhow::bail!("LoadTextureFromImage: expected 4-component RGBA, got {components}");
    }
    let byte_len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(HostError::InvalidPointer {
            ptr: image_ptr,
            what: "image dimensions overflow",
        })?;
    let pixels = memory::read_bytes(memory, &caller, data_ptr, byte_len)?;
    let image = RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| anyhow::anyhow!("LoadTextureFromImage: pixel buffer size mismatch"))?;

    let handle = caller.data_mut().textures.insert(image);
    memory::write_u32_words(memory, &mut caller, out_ptr, [handle, width, height])?;
    Ok(())
}

/// The argument is a pointer to the module-side `Texture` struct; the handle
/// is its first word.
fn unload_texture<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    texture_ptr: u32,
) -> Result<()> {
    let memory = require_memory(&caller)?;
    let [handle, _, _] = memory::read_u32_words::<3>(memory, &caller, texture_ptr)?;
    caller.data_mut().textures.remove(handle);
    Ok(())
}

fn draw_rect_textured<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    transform_ptr: u32,
    texture_ptr: u32,
    rect_ptr: u32,
    color_ptr: u32,
) -> Result<()> {
    let memory = require_memory(&caller)?;
    let model = Mat4::from_cols_array(&memory::read_f32_words::<16>(
        memory,
        &caller,
        transform_ptr,
    )?);
    let [handle, _, _] = memory::read_u32_words::<3>(memory, &caller, texture_ptr)?;
    let source = TextureRect::from(memory::read_u32_words::<4>(memory, &caller, rect_ptr)?);
    let tint = Color::from(memory::read_f32_words::<4>(memory, &caller, color_ptr)?);

    let ctx = caller.data_mut();
    let transform = ctx.transforms.compose_for_draw(model);
    let HostContext {
        textures, platform, ..
    } = ctx;
    match textures.get(handle) {
        Some(image) => platform.draw_image(image, source, transform, tint),
        // Stale handle skips the draw; one missing sprite beats a dead session
        None => warn!("DrawRectTextured: unknown texture handle {handle}"),
    }
    Ok(())
}

fn canvas_width<P: Platform>(caller: Caller<'_, HostContext<P>>) -> f32 {
    caller.data().platform.surface_size().0
}

fn canvas_height<P: Platform>(caller: Caller<'_, HostContext<P>>) -> f32 {
    caller.data().platform.surface_size().1
}
