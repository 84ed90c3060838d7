//! Font loading and text drawing
//!
//! Fonts live in the host-side table under a synthesized unique family name
//! (`Font_{handle}`), so two loads of the same file never collide in the
//! backend. `DrawText` carries the whole layout contract: a base glyph size
//! of 48 units scaled by the call's factor, alignment offsets computed from
//! the advance of the entire string, and `\n`-separated lines stacked one
//! glyph size apart.

use anyhow::Result;
use tracing::warn;
use wasmtime::{Caller, Linker};

use super::require_memory;
use crate::memory;
use crate::platform::{Color, Platform, TextAlign};
use crate::wasm::HostContext;

/// Glyph size at scale 1.0, in surface units
const BASE_FONT_SIZE: f32 = 48.0;

pub fn register<P: Platform>(linker: &mut Linker<HostContext<P>>) -> Result<()> {
    linker.func_wrap("env", "LoadFont", load_font::<P>)?;
    linker.func_wrap("env", "UnloadFont", unload_font::<P>)?;
    linker.func_wrap("env", "MeasureText", measure_text::<P>)?;
    linker.func_wrap("env", "DrawText", draw_text::<P>)?;
    Ok(())
}

/// Returns the font handle, or 0 when the face cannot be loaded
fn load_font<P: Platform>(mut caller: Caller<'_, HostContext<P>>, path_ptr: u32) -> Result<u32> {
    let memory = require_memory(&caller)?;
    let path = memory::read_cstr(memory, &caller, path_ptr)?;
    let ctx = caller.data_mut();
    let name = format!("Font_{}", ctx.fonts.next_handle());
    match ctx.platform.load_font(&name, &path) {
        Ok(font) => Ok(ctx.fonts.insert(font)),
        Err(e) => {
            warn!("LoadFont('{path}') failed: {e:#}");
            Ok(0)
        }
    }
}

fn unload_font<P: Platform>(mut caller: Caller<'_, HostContext<P>>, font_id: u32) {
    let ctx = caller.data_mut();
    if let Some(font) = ctx.fonts.remove(font_id) {
        ctx.platform.unload_font(font);
    }
}

/// Advance width of the whole string at the base glyph size. Unknown handles
/// measure as zero.
fn measure_text<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    font_id: u32,
    text_ptr: u32,
) -> Result<f32> {
    let memory = require_memory(&caller)?;
    let text = memory::read_cstr(memory, &caller, text_ptr)?;
    let HostContext {
        fonts, platform, ..
    } = caller.data_mut();
    match fonts.get(font_id) {
        Some(font) => Ok(platform.measure_text(font, &text, BASE_FONT_SIZE)),
        None => {
            warn!("MeasureText: unknown font handle {font_id}");
            Ok(0.0)
        }
    }
}

fn draw_text<P: Platform>(
    mut caller: Caller<'_, HostContext<P>>,
    font_id: u32,
    text_ptr: u32,
    position_ptr: u32,
    scale: f32,
    color_ptr: u32,
    alignment: i32,
) -> Result<()> {
    let memory = require_memory(&caller)?;
    let text = memory::read_cstr(memory, &caller, text_ptr)?;
    let [x, y] = memory::read_f32_words::<2>(memory, &caller, position_ptr)?;
    let color = Color::from(memory::read_f32_words::<4>(memory, &caller, color_ptr)?);
    let align = TextAlign::from_i32(alignment);

    let ctx = caller.data_mut();
    let transform = ctx.transforms.screen_transform();
    let HostContext {
        fonts, platform, ..
    } = ctx;
    let Some(font) = fonts.get(font_id) else {
        warn!("DrawText: unknown font handle {font_id}");
        return Ok(());
    };

    let size = BASE_FONT_SIZE * scale;
    // Alignment offsets come from the full string's advance, newlines and all
    let offset_x = match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -platform.measure_text(font, &text, size) / 2.0,
        TextAlign::Right => -platform.measure_text(font, &text, size),
    };
    for (i, line) in text.split('\n').enumerate() {
        platform.fill_text(
            font,
            line,
            x + offset_x,
            y + i as f32 * size,
            size,
            color,
            transform,
        );
    }
    Ok(())
}
