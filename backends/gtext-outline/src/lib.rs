// this_file: backends/gtext-outline/src/lib.rs

//! Local outline rasterizer backend for gtext.
//!
//! Glyphs are loaded from a font file, optionally stroked, and rendered into
//! 8-bit coverage bitmaps. The outline library sits behind
//! [`OutlineEngine`]; [`SkiaEngine`] is the default implementation.

pub mod engine;
pub mod outlines;
pub mod rasterizer;
pub mod skia;

pub use engine::{BitmapGlyph, BorderSide, GlyphSlot, LoadFlags, OutlineEngine, ScalableMetrics};
pub use outlines::{glyph_path, SkiaOutlineBuilder};
pub use rasterizer::OutlineRasterizer;
pub use skia::{SkiaEngine, SkiaFace, SkiaOutline, SkiaStroker};
