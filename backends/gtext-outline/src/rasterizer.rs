// this_file: backends/gtext-outline/src/rasterizer.rs

//! Local outline rasterizer: one lazily opened face per font.

use crate::engine::{BitmapGlyph, BorderSide, LoadFlags, OutlineEngine, ScalableMetrics};
use crate::skia::SkiaEngine;
use gtext_core::utils::from_26_6;
use gtext_core::{
    FontMetrics, FontSource, FontSpec, GTextError, GlyphRasterizer, OutlineStyle,
    RasterizedGlyph, Result,
};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Face lifecycle of one rasterizer.
enum Session<F> {
    Pending,
    Ready(F),
    /// Opening failed; stays failed until released.
    Failed,
}

/// Rasterizes glyphs from a font file through an [`OutlineEngine`].
pub struct OutlineRasterizer<E: OutlineEngine = SkiaEngine> {
    engine: E,
    path: PathBuf,
    size: f32,
    hinting: bool,
    outline: OutlineStyle,
    thickness: f32,
    label: String,
    session: Session<E::Face>,
    metrics: Option<FontMetrics>,
}

impl OutlineRasterizer<SkiaEngine> {
    /// Rasterizer for a file-backed spec using the default engine.
    pub fn from_spec(spec: &FontSpec) -> Result<Self> {
        Self::with_engine(SkiaEngine::new(), spec)
    }
}

impl<E: OutlineEngine> OutlineRasterizer<E> {
    pub fn with_engine(engine: E, spec: &FontSpec) -> Result<Self> {
        let FontSource::File { path, size } = &spec.source else {
            return Err(GTextError::config(format!(
                "outline rasterizer needs a font file, got '{}'",
                spec.source.label()
            )));
        };

        Ok(Self {
            engine,
            path: path.clone(),
            size: *size,
            hinting: spec.hinting,
            outline: spec.outline,
            thickness: spec.outline_thickness,
            label: spec.source.label(),
            session: Session::Pending,
            metrics: None,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// True once the face has been opened successfully.
    pub fn is_open(&self) -> bool {
        matches!(self.session, Session::Ready(_))
    }
}

fn open_face<'s, E: OutlineEngine>(
    engine: &E,
    session: &'s mut Session<E::Face>,
    path: &Path,
    size: f32,
    label: &str,
) -> Option<&'s mut E::Face> {
    if let Session::Pending = session {
        *session = match engine.load_face(path, size) {
            Ok(face) => {
                debug!(target: "gtext::outline", "opened {label} with {}", engine.name());
                Session::Ready(face)
            }
            Err(err) => {
                warn!(target: "gtext::outline", "cannot open {label}: {err}");
                Session::Failed
            }
        };
    }

    match session {
        Session::Ready(face) => Some(face),
        Session::Pending | Session::Failed => None,
    }
}

/// Stroke the glyph in the face's slot and render the result.
fn stroke_glyph<E: OutlineEngine>(
    engine: &E,
    face: &E::Face,
    style: OutlineStyle,
    thickness: f32,
) -> Result<BitmapGlyph> {
    let stroker = engine.new_stroker(thickness)?;
    let outline = engine.get_glyph(face)?;
    let stroked = match style {
        OutlineStyle::Stroke => engine.stroke(outline, &stroker)?,
        OutlineStyle::BorderInside => engine.stroke_border(outline, &stroker, BorderSide::Inside)?,
        OutlineStyle::BorderBoth => engine.stroke_border(outline, &stroker, BorderSide::Both)?,
        OutlineStyle::None => outline,
    };
    engine.outline_to_bitmap(stroked)
}

fn scaled_metrics(scalable: Option<ScalableMetrics>) -> FontMetrics {
    match scalable {
        Some(metrics) => FontMetrics {
            units_per_em: metrics.units_per_em,
            ascender: from_26_6(metrics.ascender),
            descender: from_26_6(metrics.descender),
        },
        None => FontMetrics::default(),
    }
}

impl<E: OutlineEngine> GlyphRasterizer for OutlineRasterizer<E> {
    fn name(&self) -> &str {
        self.engine.name()
    }

    fn rasterize(&mut self, code: char) -> Result<RasterizedGlyph> {
        let flags = LoadFlags::for_font(self.hinting, self.outline);
        let Some(face) = open_face(
            &self.engine,
            &mut self.session,
            &self.path,
            self.size,
            &self.label,
        ) else {
            return Err(GTextError::FaceUnavailable {
                definition: self.label.clone(),
            });
        };

        let slot = self.engine.load_glyph(face, code, flags)?;
        let glyph = if self.outline.is_outlined() {
            stroke_glyph(&self.engine, face, self.outline, self.thickness)?
        } else {
            slot.bitmap
                .ok_or_else(|| GTextError::glyph(code, "slot holds no bitmap"))?
        };

        if self.metrics.is_none() {
            let metrics = scaled_metrics(self.engine.scalable_metrics(face));
            debug!(target: "gtext::outline", "{} metrics: {metrics:?}", self.label);
            self.metrics = Some(metrics);
        }

        Ok(RasterizedGlyph {
            bitmap: glyph.bitmap,
            left: glyph.left,
            top: glyph.top,
            advance_x: from_26_6(slot.advance_x),
            advance_y: from_26_6(slot.advance_y),
        })
    }

    fn font_metrics(&self) -> FontMetrics {
        self.metrics.unwrap_or_default()
    }

    fn release(&mut self) {
        if !matches!(self.session, Session::Pending) {
            debug!(target: "gtext::outline", "releasing face {}", self.label);
        }
        self.session = Session::Pending;
        self.metrics = None;
    }
}
