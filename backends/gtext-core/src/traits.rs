// this_file: backends/gtext-core/src/traits.rs

//! Seams between the glyph pipeline and its collaborators.

use crate::types::{FontMetrics, PixelFormat, RasterizedGlyph, Rgba, TexturedRect};
use crate::Result;
use std::rc::Rc;
use std::sync::Arc;

/// Strategy that turns a character code into a coverage bitmap plus metrics.
///
/// One rasterizer instance belongs to one [`crate::Font`] and may keep
/// per-font state (a parsed face, a host font handle) between calls.
pub trait GlyphRasterizer {
    /// Backend name used in diagnostics.
    fn name(&self) -> &str;

    /// Produce the bitmap and metrics for `code`.
    fn rasterize(&mut self, code: char) -> Result<RasterizedGlyph>;

    /// Scaled font metrics; zero when the backend has no scalable source.
    fn font_metrics(&self) -> FontMetrics {
        FontMetrics::default()
    }

    /// Drop any font handle so the next call re-creates it.
    fn release(&mut self) {}
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rasterize(&mut self, code: char) -> Result<RasterizedGlyph> {
        (**self).rasterize(code)
    }

    fn font_metrics(&self) -> FontMetrics {
        (**self).font_metrics()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Builds GPU texture objects from raw pixel buffers.
///
/// Textures are released when the returned value is dropped.
pub trait TextureFactory {
    type Texture;

    /// Layout the factory wants its pixel data in.
    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Alpha8
    }

    fn create_texture(
        &self,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: &[u8],
    ) -> Result<Self::Texture>;
}

macro_rules! forward_texture_factory {
    ($($ptr:ty),*) => {$(
        impl<T: TextureFactory + ?Sized> TextureFactory for $ptr {
            type Texture = T::Texture;

            fn pixel_format(&self) -> PixelFormat {
                (**self).pixel_format()
            }

            fn create_texture(
                &self,
                width: u32,
                height: u32,
                format: PixelFormat,
                data: &[u8],
            ) -> Result<Self::Texture> {
                (**self).create_texture(width, height, format, data)
            }
        }
    )*};
}

// Fonts of one context usually share a single factory.
forward_texture_factory!(&T, Rc<T>, Arc<T>);

/// GPU drawing context that accumulates textured geometry.
pub trait DrawContext {
    type Texture;

    fn set_texture(&mut self, texture: &Self::Texture);

    fn push_rectangle(&mut self, rect: TexturedRect, color: Rgba);

    fn send_vertex_buffer_to_gpu(&mut self);
}
