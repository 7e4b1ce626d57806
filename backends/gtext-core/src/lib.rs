// this_file: backends/gtext-core/src/lib.rs

//! Core traits and types for the gtext glyph cache and text draw pipeline.

pub mod cache;
pub mod diagnostics;
pub mod draw;
pub mod error;
pub mod font;
pub mod invariant;
pub mod library;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod surface;
pub mod traits;
pub mod types;
pub mod utils;

pub use cache::{EvictionPolicy, GlyphStore, LruEviction, Unbounded};
pub use diagnostics::GlyphLoadDiagnostics;
pub use draw::{glyph_quad, Quad};
pub use error::GTextError;
pub use font::Font;
pub use library::{FontLibrary, LibraryStats};
pub use surface::make_texture;
pub use traits::{DrawContext, GlyphRasterizer, TextureFactory};
pub use types::{
    FontKey, FontMetrics, FontSource, FontSpec, Glyph, GlyphBitmap, OutlineStyle, PixelFormat,
    RasterizedGlyph, Rgba, TexturedRect,
};

/// Result type for gtext operations
pub type Result<T> = std::result::Result<T, GTextError>;
