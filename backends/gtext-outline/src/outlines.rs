// this_file: backends/gtext-outline/src/outlines.rs

//! Glyph outline to tiny-skia path conversion.

use tiny_skia::{Path, PathBuilder};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Outline builder for converting TrueType outlines to tiny-skia paths.
///
/// Coordinates are scaled to pixels and flipped so y grows downwards.
pub struct SkiaOutlineBuilder {
    builder: PathBuilder,
    scale: f32,
}

impl SkiaOutlineBuilder {
    pub fn new(scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            scale,
        }
    }

    pub fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for SkiaOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x * self.scale, -y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x * self.scale, -y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            x1 * self.scale,
            -y1 * self.scale,
            x * self.scale,
            -y * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            x1 * self.scale,
            -y1 * self.scale,
            x2 * self.scale,
            -y2 * self.scale,
            x * self.scale,
            -y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Pixel-space path of `glyph_id`, or `None` for glyphs without contours.
pub fn glyph_path(face: &Face<'_>, glyph_id: GlyphId, scale: f32) -> Option<Path> {
    if scale <= 0.0 {
        return None;
    }
    let mut builder = SkiaOutlineBuilder::new(scale);
    face.outline_glyph(glyph_id, &mut builder)?;
    builder.finish()
}
