// this_file: backends/gtext-core/src/types.rs

//! Core types used throughout the gtext glyph pipeline.

use crate::{utils, GTextError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a font's glyphs come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    /// Font file rasterized locally at a pixel size
    File { path: PathBuf, size: f32 },
    /// Opaque definition handed to the host rasterizer (e.g. "bold 16px serif")
    Definition { definition: String },
}

impl FontSource {
    pub fn file(path: impl Into<PathBuf>, size: f32) -> Self {
        Self::File {
            path: path.into(),
            size,
        }
    }

    /// File source sized in typographic points, converted to pixels.
    pub fn file_in_points(path: impl Into<PathBuf>, points: f32) -> Self {
        Self::file(path, utils::pt_to_px(points))
    }

    pub fn definition(definition: impl Into<String>) -> Self {
        Self::Definition {
            definition: definition.into(),
        }
    }

    /// Human-readable identifier used in logs and by the host backend.
    pub fn label(&self) -> String {
        match self {
            Self::File { path, size } => format!("{}@{}", path.display(), size),
            Self::Definition { definition } => definition.clone(),
        }
    }
}

/// How a glyph's outline is stroked before rasterization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineStyle {
    /// Plain filled glyph
    #[default]
    None,
    /// Stroke centred on the outline
    Stroke,
    /// Border band on the inside of the outline
    BorderInside,
    /// Glyph fill plus both sides of the border
    BorderBoth,
}

impl OutlineStyle {
    pub fn is_outlined(self) -> bool {
        self != OutlineStyle::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutlineStyle::None => "none",
            OutlineStyle::Stroke => "stroke",
            OutlineStyle::BorderInside => "border_inside",
            OutlineStyle::BorderBoth => "border_both",
        }
    }
}

fn default_hinting() -> bool {
    true
}

/// Font configuration: one [`crate::Font`] exists per distinct spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font file or host definition
    pub source: FontSource,
    /// Force auto-hinting (true) or disable hinting entirely (false)
    #[serde(default = "default_hinting")]
    pub hinting: bool,
    /// Outline stroking mode
    #[serde(default)]
    pub outline: OutlineStyle,
    /// Stroker radius in pixels
    #[serde(default)]
    pub outline_thickness: f32,
}

impl FontSpec {
    pub fn new(source: FontSource) -> Self {
        Self {
            source,
            hinting: true,
            outline: OutlineStyle::None,
            outline_thickness: 0.0,
        }
    }

    pub fn with_hinting(mut self, hinting: bool) -> Self {
        self.hinting = hinting;
        self
    }

    pub fn with_outline(mut self, outline: OutlineStyle, thickness: f32) -> Self {
        self.outline = outline;
        self.outline_thickness = thickness;
        self
    }

    /// Parse and validate a spec from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: FontSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        match &self.source {
            FontSource::File { path, size } => {
                if path.as_os_str().is_empty() {
                    return Err(GTextError::config("font path is empty"));
                }
                if !size.is_finite() || *size <= 0.0 {
                    return Err(GTextError::config(format!(
                        "font size must be positive, got {size}"
                    )));
                }
            }
            FontSource::Definition { definition } => {
                if definition.trim().is_empty() {
                    return Err(GTextError::config("font definition is empty"));
                }
            }
        }

        if !self.outline_thickness.is_finite() || self.outline_thickness < 0.0 {
            return Err(GTextError::config(format!(
                "outline thickness must be non-negative, got {}",
                self.outline_thickness
            )));
        }
        if self.outline.is_outlined() && self.outline_thickness == 0.0 {
            return Err(GTextError::config(format!(
                "outline style '{}' needs a positive thickness",
                self.outline.as_str()
            )));
        }
        Ok(())
    }

    /// Hashable identity of this spec.
    pub fn key(&self) -> FontKey {
        let (source, size) = match &self.source {
            FontSource::File { path, size } => (
                format!("file:{}", path.display()),
                utils::quantize_size(*size),
            ),
            FontSource::Definition { definition } => (format!("def:{definition}"), 0),
        };
        FontKey {
            source,
            size,
            hinting: self.hinting,
            outline: self.outline,
            thickness: utils::quantize_size(self.outline_thickness),
        }
    }
}

/// Key for font lookups
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FontKey {
    pub source: String,
    pub size: u32, // Quantized size
    pub hinting: bool,
    pub outline: OutlineStyle,
    pub thickness: u32, // Quantized thickness
}

/// Scaled vertical metrics of a font, zero unless the face is scalable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: f32,
    pub descender: f32,
}

/// Single-channel coverage bitmap, rows tightly packed top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl GlyphBitmap {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of bytes a tightly packed buffer of this size holds.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Encode as an 8-bit grayscale PNG, for inspecting rasterizer output.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        crate::surface::encode_gray_png(self)
    }
}

/// Output of a rasterization backend for one character.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub bitmap: GlyphBitmap,
    /// Horizontal bearing from pen origin to the bitmap's left column
    pub left: i32,
    /// Vertical bearing from baseline up to the bitmap's top row
    pub top: i32,
    pub advance_x: f32,
    pub advance_y: f32,
}

/// Cached glyph: geometry plus the texture holding its coverage.
#[derive(Debug)]
pub struct Glyph<T> {
    pub code: char,
    pub width: u32,
    pub height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub advance_x: f32,
    pub advance_y: f32,
    pub outline: OutlineStyle,
    pub outline_thickness: f32,
    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32,
    pub texture: T,
}

impl<T> Glyph<T> {
    /// Build a glyph that owns `texture`, which covers the whole bitmap.
    pub fn new(code: char, raster: &RasterizedGlyph, spec: &FontSpec, texture: T) -> Self {
        Self {
            code,
            width: raster.bitmap.width,
            height: raster.bitmap.height,
            offset_x: raster.left,
            offset_y: raster.top,
            advance_x: raster.advance_x,
            advance_y: raster.advance_y,
            outline: spec.outline,
            outline_thickness: spec.outline_thickness,
            s0: 0.0,
            t0: 0.0,
            s1: 1.0,
            t1: 1.0,
            texture,
        }
    }
}

/// Straight-alpha color in the 0..=1 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn parse(color: &str) -> Result<Self> {
        let (r, g, b, a) = utils::parse_color(color).map_err(GTextError::config)?;
        Ok(Self::from_rgba8(r, g, b, a))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Pixel layout handed to a [`crate::TextureFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One coverage byte per pixel (GL_ALPHA style)
    Alpha8,
    /// Four bytes per pixel, white with coverage in alpha
    Rgba8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Alpha8 => 1,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Rectangle with texture mapping, as accepted by a [`crate::DrawContext`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub s: f32,
    pub t: f32,
    pub s_width: f32,
    pub t_height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_from_json_defaults() {
        let spec = FontSpec::from_json(
            r#"{"source": {"kind": "file", "path": "/fonts/a.ttf", "size": 16.0}}"#,
        )
        .unwrap();
        assert!(spec.hinting);
        assert_eq!(spec.outline, OutlineStyle::None);
        assert_eq!(spec.outline_thickness, 0.0);
        assert_eq!(spec.source, FontSource::file("/fonts/a.ttf", 16.0));
    }

    #[test]
    fn test_spec_from_json_outline() {
        let spec = FontSpec::from_json(
            r#"{"source": {"kind": "definition", "definition": "12px sans"},
                "hinting": false, "outline": "border_both", "outline_thickness": 1.5}"#,
        )
        .unwrap();
        assert!(!spec.hinting);
        assert_eq!(spec.outline, OutlineStyle::BorderBoth);
        assert_eq!(spec.outline_thickness, 1.5);
    }

    #[test]
    fn test_spec_validation() {
        assert!(FontSpec::new(FontSource::file("a.ttf", 0.0))
            .validate()
            .is_err());
        assert!(FontSpec::new(FontSource::definition("  "))
            .validate()
            .is_err());
        assert!(FontSpec::new(FontSource::file("a.ttf", 12.0))
            .with_outline(OutlineStyle::Stroke, 0.0)
            .validate()
            .is_err());
        assert!(FontSpec::new(FontSource::file("a.ttf", 12.0))
            .with_outline(OutlineStyle::Stroke, 1.0)
            .validate()
            .is_ok());
        assert!(FontSpec::from_json("{not json").is_err());
    }

    #[test]
    fn test_key_distinguishes_outline() {
        let plain = FontSpec::new(FontSource::file("a.ttf", 12.0));
        let stroked = plain.clone().with_outline(OutlineStyle::Stroke, 1.0);
        assert_ne!(plain.key(), stroked.key());
        assert_eq!(plain.key(), plain.clone().key());
    }

    #[test]
    fn test_file_in_points() {
        assert_eq!(
            FontSource::file_in_points("a.ttf", 12.0),
            FontSource::file("a.ttf", 16.0)
        );
    }

    #[test]
    fn test_rgba_parse() {
        assert_eq!(Rgba::parse("#FF0000").unwrap(), Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Rgba::parse("transparent").unwrap(), Rgba::TRANSPARENT);
        assert!(Rgba::parse("#12").is_err());
    }
}
