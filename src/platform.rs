//! Platform capability seam
//!
//! Everything the bridge cannot do by itself (putting pixels on a surface,
//! playing audio, loading font faces, fetching asset bytes) is supplied by
//! the embedder through the [`Platform`] trait. The bridge owns marshalling,
//! transforms, handles and the frame loop; the platform owns the backends.

use anyhow::Result;
use glam::Affine2;
use image::RgbaImage;

/// RGBA color with components in [0, 1], as passed by the module
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Encode as the 8-bit-per-channel `#rrggbbaa` string drawing backends
    /// expect
    pub fn to_hex(self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Color {
            r: v[0],
            g: v[1],
            b: v[2],
            a: v[3],
        }
    }
}

/// Source region of a texture, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<[u32; 4]> for TextureRect {
    fn from(v: [u32; 4]) -> Self {
        TextureRect {
            x: v[0],
            y: v[1],
            width: v[2],
            height: v[3],
        }
    }
}

/// Text alignment as encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn from_i32(v: i32) -> TextAlign {
        match v {
            1 => TextAlign::Center,
            2 => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }
}

/// Backend capabilities supplied by the embedder
///
/// Calls are made synchronously from the module's frame callback; a blocking
/// `fetch` blocks the whole frame loop for its duration, which is the
/// intended tradeoff. `load_sound`/`load_font` must return a value that is
/// usable immediately from the bridge's point of view; a backend that decodes
/// lazily documents draw-before-ready as best-effort.
pub trait Platform: Send + 'static {
    /// Playable audio handle
    type Sound: Send + 'static;
    /// Loaded font face handle
    type Font: Send + 'static;

    /// Resize the drawing surface (graphics-init time)
    fn set_surface_size(&mut self, width: u32, height: u32);

    /// Current drawing surface size in pixels
    fn surface_size(&self) -> (f32, f32);

    /// Fill the whole surface with a color (transparent clears it)
    fn clear(&mut self, color: Color);

    /// Draw `source` out of `image` with the given affine transform applied.
    ///
    /// The region is drawn at 1:1 scale centered on the local origin, i.e.
    /// covering `(-w/2, -h/2)` to `(w/2, h/2)` before the transform.
    fn draw_image(&mut self, image: &RgbaImage, source: TextureRect, transform: Affine2, tint: Color);

    /// Draw one line of text at `(x, y)` under `transform`
    fn fill_text(
        &mut self,
        font: &Self::Font,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        transform: Affine2,
    );

    /// Measure the advance width of `text` at `size`
    fn measure_text(&mut self, font: &Self::Font, text: &str, size: f32) -> f32;

    /// Bring up the audio backend. Zero means success, mirroring the
    /// module-side C convention.
    fn init_audio(&mut self) -> Result<()>;

    /// Create a playable sound from an asset path
    fn load_sound(&mut self, path: &str) -> Result<Self::Sound>;

    fn play_sound(&mut self, sound: &mut Self::Sound);

    /// Load a font face from an asset path under a synthesized unique
    /// family name
    fn load_font(&mut self, name: &str, path: &str) -> Result<Self::Font>;

    /// Release a font face. Default drops it.
    fn unload_font(&mut self, font: Self::Font) {
        drop(font);
    }

    /// Blocking byte-fetch of an asset. The frame loop stalls until this
    /// returns; there are no timeouts.
    fn fetch(&mut self, path: &str) -> Result<Vec<u8>>;
}
