// this_file: src/lib.rs

//! gtext: glyph cache and texture-backed text drawing for GPU canvases.
//!
//! Fonts rasterize glyphs on first use, either from a font file
//! ([`OutlineRasterizer`]) or through the host ([`HostCallbackBackend`]),
//! upload them as textures and draw them as textured quads.
//!
//! ```no_run
//! use gtext::{FontSource, FontSpec, TextRenderer};
//! # fn demo<F, C>(textures: F, context: &mut C) -> gtext::Result<()>
//! # where
//! #     F: gtext::TextureFactory + Clone,
//! #     C: gtext::DrawContext<Texture = F::Texture>,
//! # {
//! let mut renderer = TextRenderer::new(textures);
//! let spec = FontSpec::new(FontSource::file_in_points("/fonts/DejaVuSans.ttf", 12.0));
//! let mut x = 10.0;
//! renderer
//!     .font(&spec)?
//!     .draw_text("Hello", context, &mut x, 40.0, gtext::Rgba::BLACK);
//! # Ok(())
//! # }
//! ```

use log::debug;
use std::sync::Arc;

pub use gtext_core::{
    glyph_quad, make_texture, utils, DrawContext, EvictionPolicy, Font, FontKey, FontLibrary,
    FontMetrics, FontSource, FontSpec, GTextError, Glyph, GlyphBitmap, GlyphRasterizer,
    GlyphStore, LibraryStats, LruEviction, OutlineStyle, PixelFormat, Quad, RasterizedGlyph,
    Result, Rgba, TextureFactory, TexturedRect, Unbounded,
};
pub use gtext_host::{
    CallbackRegistry, FontHandle, HostCallbackBackend, HostGlyphImage, HostRasterizer,
};
pub use gtext_outline::{OutlineEngine, OutlineRasterizer, SkiaEngine};

/// Which rasterization backend serves a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    /// Local outline rasterizer over a font file
    Outline,
    /// Host callbacks resolving a font definition
    Host,
}

impl BackendChoice {
    pub fn for_source(source: &FontSource) -> Self {
        match source {
            FontSource::File { .. } => BackendChoice::Outline,
            FontSource::Definition { .. } => BackendChoice::Host,
        }
    }
}

/// Build the backend matching `spec`'s source; definitions go to `host`.
pub fn make_backend<H>(spec: &FontSpec, host: &H) -> Result<Box<dyn GlyphRasterizer>>
where
    H: HostRasterizer + Clone + 'static,
    H::Handle: 'static,
{
    let choice = BackendChoice::for_source(&spec.source);
    debug!(target: "gtext::glyph", "{:?} backend for {}", choice, spec.source.label());
    Ok(match choice {
        BackendChoice::Outline => Box::new(OutlineRasterizer::from_spec(spec)?),
        BackendChoice::Host => Box::new(HostCallbackBackend::from_spec(host.clone(), spec)?),
    })
}

/// Fonts of one drawing context plus the host callbacks they share.
pub struct TextRenderer<F: TextureFactory + Clone> {
    library: FontLibrary<F>,
    registry: Arc<CallbackRegistry>,
}

impl<F: TextureFactory + Clone> TextRenderer<F> {
    pub fn new(textures: F) -> Self {
        Self::with_registry(textures, CallbackRegistry::shared())
    }

    pub fn with_registry(textures: F, registry: Arc<CallbackRegistry>) -> Self {
        Self {
            library: FontLibrary::new(textures),
            registry,
        }
    }

    /// Callbacks used by definition-backed fonts.
    pub fn registry(&self) -> &Arc<CallbackRegistry> {
        &self.registry
    }

    /// Font for `spec`, created with the matching backend on first use.
    pub fn font(&mut self, spec: &FontSpec) -> Result<&mut Font<F>> {
        let registry = &self.registry;
        self.library
            .get_or_create(spec, |spec| make_backend(spec, registry))
    }

    pub fn library(&self) -> &FontLibrary<F> {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut FontLibrary<F> {
        &mut self.library
    }
}
