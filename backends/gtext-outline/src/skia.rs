// this_file: backends/gtext-outline/src/skia.rs

//! Default outline engine: ttf-parser outlines, tiny-skia strokes and masks.

use crate::engine::{
    BitmapGlyph, BorderSide, GlyphSlot, LoadFlags, OutlineEngine, ScalableMetrics,
};
use crate::outlines::glyph_path;
use gtext_core::utils::to_26_6;
use gtext_core::{GTextError, GlyphBitmap, Result};
use log::trace;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::path::Path;
use tiny_skia::{FillRule, LineCap, LineJoin, Mask, Path as SkPath, Rect, Stroke, Transform};
use ttf_parser::GlyphId;

/// Outline engine backed by `ttf-parser` and `tiny-skia`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkiaEngine;

impl SkiaEngine {
    pub fn new() -> Self {
        Self
    }
}

/// Parsed face sized to a pixel size, with a one-glyph slot.
pub struct SkiaFace {
    face: OwnedFace,
    /// Font units to pixels.
    scale: f32,
    slot: Option<(char, GlyphId)>,
}

/// Stroke parameters for outline styles.
#[derive(Debug, Clone)]
pub struct SkiaStroker {
    stroke: Stroke,
}

/// Outline of one character at some stage of stroking.
#[derive(Debug, Clone)]
pub struct SkiaOutline {
    code: char,
    shape: Shape,
}

impl SkiaOutline {
    fn new(code: char, path: Option<SkPath>) -> Self {
        let shape = match path {
            Some(path) => Shape::Fill(path),
            None => Shape::Empty,
        };
        Self { code, shape }
    }

    pub fn code(&self) -> char {
        self.code
    }
}

#[derive(Debug, Clone)]
enum Shape {
    /// Glyph without contours (e.g. a space)
    Empty,
    Fill(SkPath),
    /// Stroke ring around the contour
    Stroked(SkPath),
    Border {
        fill: SkPath,
        ring: SkPath,
        side: BorderSide,
    },
}

impl OutlineEngine for SkiaEngine {
    type Face = SkiaFace;
    type Stroker = SkiaStroker;
    type Outline = SkiaOutline;

    fn name(&self) -> &str {
        "tiny-skia"
    }

    fn load_face(&self, path: &Path, size: f32) -> Result<SkiaFace> {
        if !size.is_finite() || size <= 0.0 {
            return Err(GTextError::config(format!(
                "font size must be positive, got {size}"
            )));
        }

        let data = std::fs::read(path).map_err(|e| GTextError::font_load(path.to_owned(), e))?;
        let face = OwnedFace::from_vec(data, 0).map_err(|_| GTextError::InvalidFontData {
            path: path.to_owned(),
        })?;

        let units_per_em = face.as_face_ref().units_per_em();
        if units_per_em == 0 {
            return Err(GTextError::InvalidFontData {
                path: path.to_owned(),
            });
        }

        Ok(SkiaFace {
            face,
            scale: size / units_per_em as f32,
            slot: None,
        })
    }

    fn load_glyph(&self, face: &mut SkiaFace, code: char, flags: LoadFlags) -> Result<GlyphSlot> {
        let ttf = face.face.as_face_ref();
        // Unmapped codes render the .notdef glyph.
        let glyph_id = ttf.glyph_index(code).unwrap_or(GlyphId(0));

        let mut advance = ttf.glyph_hor_advance(glyph_id).unwrap_or(0) as f32 * face.scale;
        if flags.contains(LoadFlags::FORCE_AUTOHINT) {
            advance = advance.round();
        }

        let bitmap = if flags.contains(LoadFlags::RENDER) {
            let outline = SkiaOutline::new(code, glyph_path(ttf, glyph_id, face.scale));
            Some(render_outline(outline)?)
        } else {
            None
        };
        trace!(target: "gtext::outline", "loaded {code:?} as glyph {} with {flags:?}", glyph_id.0);

        face.slot = Some((code, glyph_id));
        Ok(GlyphSlot {
            bitmap,
            advance_x: to_26_6(advance),
            advance_y: 0,
        })
    }

    fn new_stroker(&self, radius: f32) -> Result<SkiaStroker> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GTextError::Stroker {
                reason: format!("radius must be positive, got {radius}"),
            });
        }
        let mut stroke = Stroke::default();
        stroke.width = radius * 2.0;
        stroke.line_cap = LineCap::Round;
        stroke.line_join = LineJoin::Round;
        Ok(SkiaStroker { stroke })
    }

    fn get_glyph(&self, face: &SkiaFace) -> Result<SkiaOutline> {
        let (code, glyph_id) = face.slot.ok_or_else(|| GTextError::Stroker {
            reason: "no glyph loaded in the slot".to_string(),
        })?;
        trace!(target: "gtext::outline", "outline for {code:?}");
        let path = glyph_path(face.face.as_face_ref(), glyph_id, face.scale);
        Ok(SkiaOutline::new(code, path))
    }

    fn stroke(&self, outline: SkiaOutline, stroker: &SkiaStroker) -> Result<SkiaOutline> {
        let shape = match outline.shape {
            Shape::Empty => Shape::Empty,
            Shape::Fill(path) => Shape::Stroked(stroke_ring(&path, stroker)?),
            _ => return Err(already_stroked(outline.code)),
        };
        Ok(SkiaOutline { shape, ..outline })
    }

    fn stroke_border(
        &self,
        outline: SkiaOutline,
        stroker: &SkiaStroker,
        side: BorderSide,
    ) -> Result<SkiaOutline> {
        let shape = match outline.shape {
            Shape::Empty => Shape::Empty,
            Shape::Fill(fill) => {
                let ring = stroke_ring(&fill, stroker)?;
                Shape::Border { fill, ring, side }
            }
            _ => return Err(already_stroked(outline.code)),
        };
        Ok(SkiaOutline { shape, ..outline })
    }

    fn outline_to_bitmap(&self, outline: SkiaOutline) -> Result<BitmapGlyph> {
        render_outline(outline)
    }

    fn scalable_metrics(&self, face: &SkiaFace) -> Option<ScalableMetrics> {
        let ttf = face.face.as_face_ref();
        let tables = ttf.tables();
        if tables.glyf.is_none() && tables.cff.is_none() {
            return None;
        }
        Some(ScalableMetrics {
            units_per_em: ttf.units_per_em(),
            ascender: to_26_6(ttf.ascender() as f32 * face.scale),
            descender: to_26_6(ttf.descender() as f32 * face.scale),
        })
    }
}

fn already_stroked(code: char) -> GTextError {
    GTextError::Stroker {
        reason: format!("outline of {code:?} is already stroked"),
    }
}

fn stroke_ring(path: &SkPath, stroker: &SkiaStroker) -> Result<SkPath> {
    path.stroke(&stroker.stroke, 1.0)
        .ok_or_else(|| GTextError::Stroker {
            reason: "stroking produced no geometry".to_string(),
        })
}

/// Integer pixel box enclosing a path, in y-down coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelBox {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
}

impl PixelBox {
    fn enclosing(rects: &[Rect]) -> Option<Self> {
        let left = rects.iter().map(|r| r.left()).fold(f32::MAX, f32::min).floor();
        let top = rects.iter().map(|r| r.top()).fold(f32::MAX, f32::min).floor();
        let right = rects.iter().map(|r| r.right()).fold(f32::MIN, f32::max).ceil();
        let bottom = rects.iter().map(|r| r.bottom()).fold(f32::MIN, f32::max).ceil();
        if !(right > left && bottom > top) {
            return None;
        }
        Some(Self {
            left: left as i32,
            top: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    fn coverage(&self, code: char, path: &SkPath) -> Result<Vec<u8>> {
        let mut mask = Mask::new(self.width, self.height).ok_or_else(|| {
            GTextError::glyph(
                code,
                format!("cannot allocate {}x{} mask", self.width, self.height),
            )
        })?;
        mask.fill_path(
            path,
            FillRule::Winding,
            true,
            Transform::from_translate(-self.left as f32, -self.top as f32),
        );
        Ok(mask.data().to_vec())
    }

    /// Shrink to the rows and columns that carry coverage.
    fn trim(self, data: Vec<u8>) -> Option<(Self, Vec<u8>)> {
        let width = self.width as usize;
        let covered = |x: usize, y: usize| data[y * width + x] != 0;
        let rows: Vec<usize> = (0..self.height as usize)
            .filter(|&y| (0..width).any(|x| covered(x, y)))
            .collect();
        let cols: Vec<usize> = (0..width)
            .filter(|&x| rows.iter().any(|&y| covered(x, y)))
            .collect();
        let (&y0, &y1) = (rows.first()?, rows.last()?);
        let (&x0, &x1) = (cols.first()?, cols.last()?);

        let trimmed = (y0..=y1)
            .flat_map(|y| data[y * width + x0..=y * width + x1].iter().copied())
            .collect();
        let area = Self {
            left: self.left + x0 as i32,
            top: self.top + y0 as i32,
            width: (x1 - x0 + 1) as u32,
            height: (y1 - y0 + 1) as u32,
        };
        Some((area, trimmed))
    }

    fn into_glyph(self, data: Vec<u8>) -> BitmapGlyph {
        BitmapGlyph {
            bitmap: GlyphBitmap::new(self.width, self.height, data),
            left: self.left,
            top: -self.top,
        }
    }
}

fn empty_glyph() -> BitmapGlyph {
    BitmapGlyph {
        bitmap: GlyphBitmap::empty(),
        left: 0,
        top: 0,
    }
}

fn render_outline(outline: SkiaOutline) -> Result<BitmapGlyph> {
    let code = outline.code;
    match outline.shape {
        Shape::Empty => Ok(empty_glyph()),
        Shape::Fill(path) | Shape::Stroked(path) => {
            let Some(area) = PixelBox::enclosing(&[path.bounds()]) else {
                return Ok(empty_glyph());
            };
            let data = area.coverage(code, &path)?;
            Ok(area.into_glyph(data))
        }
        Shape::Border { fill, ring, side } => {
            // The inside border never reaches past the fill.
            let bounds = match side {
                BorderSide::Inside => vec![fill.bounds()],
                BorderSide::Both => vec![fill.bounds(), ring.bounds()],
            };
            let Some(area) = PixelBox::enclosing(&bounds) else {
                return Ok(empty_glyph());
            };
            let fill = area.coverage(code, &fill)?;
            let ring = area.coverage(code, &ring)?;
            let data = fill
                .iter()
                .zip(&ring)
                .map(|(&f, &r)| combine_border(f, r, side))
                .collect();
            match side {
                BorderSide::Both => Ok(area.into_glyph(data)),
                BorderSide::Inside => Ok(area
                    .trim(data)
                    .map_or_else(empty_glyph, |(area, data)| area.into_glyph(data))),
            }
        }
    }
}

/// Inside keeps the fill minus the ring, so the glyph shrinks by the
/// stroke radius. Both keeps the union.
fn combine_border(fill: u8, ring: u8, side: BorderSide) -> u8 {
    let (fill, ring) = (fill as u32, ring as u32);
    match side {
        BorderSide::Inside => ((fill * (255 - ring) + 127) / 255) as u8,
        BorderSide::Both => (fill + ring - (fill * ring + 127) / 255).min(255) as u8,
    }
}
