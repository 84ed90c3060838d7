//! Shared test utilities for integration and unit tests

use anyhow::{Result, anyhow};
use glam::Affine2;
use hashbrown::HashMap;
use image::RgbaImage;

use crate::platform::{Color, Platform, TextureRect};

/// Recorded backend effect, in issue order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Image {
        width: u32,
        height: u32,
        source: TextureRect,
        transform: Affine2,
        tint: Color,
    },
    Text {
        font: String,
        line: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
}

#[derive(Debug)]
pub struct TestSound {
    pub path: String,
    pub plays: u32,
}

#[derive(Debug)]
pub struct TestFont {
    pub name: String,
    pub path: String,
}

/// Recording platform backed by an in-memory file map.
///
/// Anything present in `files` loads; anything absent fails its fetch. Text
/// measurement is deterministic: half the glyph size per character.
pub struct TestPlatform {
    pub surface: (u32, u32),
    pub calls: Vec<DrawCall>,
    pub files: HashMap<String, Vec<u8>>,
    pub audio_ready: bool,
    pub unloaded_fonts: Vec<String>,
}

impl TestPlatform {
    pub fn new() -> Self {
        Self {
            surface: (0, 0),
            calls: Vec::new(),
            files: HashMap::new(),
            audio_ready: false,
            unloaded_fonts: Vec::new(),
        }
    }

    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.files.insert(path.to_string(), bytes.to_vec());
        self
    }
}

impl Platform for TestPlatform {
    type Sound = TestSound;
    type Font = TestFont;

    fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
    }

    fn surface_size(&self) -> (f32, f32) {
        (self.surface.0 as f32, self.surface.1 as f32)
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_image(
        &mut self,
        image: &RgbaImage,
        source: TextureRect,
        transform: Affine2,
        tint: Color,
    ) {
        self.calls.push(DrawCall::Image {
            width: image.width(),
            height: image.height(),
            source,
            transform,
            tint,
        });
    }

    fn fill_text(
        &mut self,
        font: &TestFont,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        _transform: Affine2,
    ) {
        self.calls.push(DrawCall::Text {
            font: font.name.clone(),
            line: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }

    fn measure_text(&mut self, _font: &TestFont, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    fn init_audio(&mut self) -> Result<()> {
        self.audio_ready = true;
        Ok(())
    }

    fn load_sound(&mut self, path: &str) -> Result<TestSound> {
        if self.files.contains_key(path) {
            Ok(TestSound {
                path: path.to_string(),
                plays: 0,
            })
        } else {
            Err(anyhow!("no such file: {path}"))
        }
    }

    fn play_sound(&mut self, sound: &mut TestSound) {
        sound.plays += 1;
    }

    fn load_font(&mut self, name: &str, path: &str) -> Result<TestFont> {
        if self.files.contains_key(path) {
            Ok(TestFont {
                name: name.to_string(),
                path: path.to_string(),
            })
        } else {
            Err(anyhow!("no such file: {path}"))
        }
    }

    fn unload_font(&mut self, font: TestFont) {
        self.unloaded_fonts.push(font.name);
    }

    fn fetch(&mut self, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("no such file: {path}"))
    }
}
