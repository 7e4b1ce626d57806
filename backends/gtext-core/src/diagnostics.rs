// this_file: backends/gtext-core/src/diagnostics.rs

//! Glyph load diagnostics used for structured debug logging.

use crate::types::{FontSource, FontSpec, RasterizedGlyph};
use log::{debug, log_enabled, Level};

/// Lightweight snapshot of a freshly rasterized glyph.
#[derive(Debug)]
pub struct GlyphLoadDiagnostics<'a> {
    backend: &'a str,
    source: &'a FontSource,
    code: char,
    outline: &'a str,
    thickness: f32,
    width: u32,
    height: u32,
    left: i32,
    top: i32,
    advance_x: f32,
}

impl<'a> GlyphLoadDiagnostics<'a> {
    pub fn new(
        backend: &'a str,
        spec: &'a FontSpec,
        code: char,
        raster: &'a RasterizedGlyph,
    ) -> Self {
        Self {
            backend,
            source: &spec.source,
            code,
            outline: spec.outline.as_str(),
            thickness: spec.outline_thickness,
            width: raster.bitmap.width,
            height: raster.bitmap.height,
            left: raster.left,
            top: raster.top,
            advance_x: raster.advance_x,
        }
    }

    /// Emit the snapshot at debug level when logging is enabled.
    pub fn log(&self) {
        if log_enabled!(target: "gtext::glyph", Level::Debug) {
            debug!(
                target: "gtext::glyph",
                "backend={backend} font={font} code={code:?} outline={outline} thickness={thickness:.2} size={width}x{height} bearing=({left},{top}) advance={advance:.2}",
                backend = self.backend,
                font = self.source.label(),
                code = self.code,
                outline = self.outline,
                thickness = self.thickness,
                width = self.width,
                height = self.height,
                left = self.left,
                top = self.top,
                advance = self.advance_x,
            );
        }
    }
}
