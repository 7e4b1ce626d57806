// this_file: backends/gtext-core/src/font.rs

//! A font: glyph store, rasterization backend and the text draw pipeline.

use crate::cache::{EvictionPolicy, GlyphStore};
use crate::diagnostics::GlyphLoadDiagnostics;
use crate::draw::emit_glyph;
use crate::types::{FontMetrics, FontSpec, Glyph, Rgba};
use crate::{invariant, surface, DrawContext, GlyphRasterizer, TextureFactory};
use log::{debug, warn};

/// One typeface configuration with its lazily filled glyph cache.
///
/// A font is owned by a single drawing thread; every operation that may
/// rasterize takes `&mut self`.
pub struct Font<F: TextureFactory> {
    spec: FontSpec,
    rasterizer: Box<dyn GlyphRasterizer>,
    textures: F,
    store: GlyphStore<F::Texture>,
}

impl<F: TextureFactory> Font<F> {
    /// Create a font with an unbounded glyph cache.
    pub fn new(spec: FontSpec, rasterizer: Box<dyn GlyphRasterizer>, textures: F) -> Self {
        Self {
            spec,
            rasterizer,
            textures,
            store: GlyphStore::new(),
        }
    }

    /// Create a font whose glyph cache follows `policy`.
    pub fn with_eviction_policy(
        spec: FontSpec,
        rasterizer: Box<dyn GlyphRasterizer>,
        textures: F,
        policy: Box<dyn EvictionPolicy>,
    ) -> Self {
        Self {
            spec,
            rasterizer,
            textures,
            store: GlyphStore::with_policy(policy),
        }
    }

    pub fn spec(&self) -> &FontSpec {
        &self.spec
    }

    pub fn backend_name(&self) -> &str {
        self.rasterizer.name()
    }

    pub fn metrics(&self) -> FontMetrics {
        self.rasterizer.font_metrics()
    }

    /// Cached glyph for `code`, rasterizing it on first request.
    ///
    /// Returns `None` when the backend cannot produce the glyph; the next call
    /// tries again.
    pub fn get_glyph(&mut self, code: char) -> Option<&Glyph<F::Texture>> {
        if self.store.contains(code) {
            return self.store.lookup(code);
        }
        if !self.load_glyph(code) {
            return None;
        }
        Some(invariant::glyph_after_insert(self.store.lookup(code), code))
    }

    /// Cached glyph for `code` without loading it.
    pub fn cached_glyph(&self, code: char) -> Option<&Glyph<F::Texture>> {
        self.store.peek(code)
    }

    /// Evict one glyph and release its texture.
    pub fn remove_glyph(&mut self, code: char) -> bool {
        self.store.remove(code).is_some()
    }

    pub fn glyph_count(&self) -> usize {
        self.store.len()
    }

    pub fn clear_glyphs(&mut self) {
        self.store.clear();
    }

    /// Drop the backend's face or host handle. Cached glyphs stay valid.
    pub fn release_font_handle(&mut self) {
        self.rasterizer.release();
    }

    /// Draw a single character at the pen position and flush.
    ///
    /// The pen advances by the glyph's horizontal advance; an unresolvable
    /// character leaves it where it is.
    pub fn draw_char<C>(&mut self, code: char, context: &mut C, x: &mut f32, y: f32, color: Rgba)
    where
        C: DrawContext<Texture = F::Texture> + ?Sized,
    {
        self.draw_code(code, context, x, y, color);
        context.send_vertex_buffer_to_gpu();
    }

    /// Draw `text` left to right and flush once. Empty text touches nothing.
    pub fn draw_text<C>(&mut self, text: &str, context: &mut C, x: &mut f32, y: f32, color: Rgba)
    where
        C: DrawContext<Texture = F::Texture> + ?Sized,
    {
        if text.is_empty() {
            return;
        }

        for code in text.chars() {
            self.draw_code(code, context, x, y, color);
        }
        context.send_vertex_buffer_to_gpu();
    }

    /// Total horizontal advance of `text`, loading glyphs as needed.
    pub fn measure_text(&mut self, text: &str) -> f32 {
        text.chars()
            .filter_map(|code| self.get_glyph(code).map(|glyph| glyph.advance_x))
            .sum()
    }

    fn draw_code<C>(&mut self, code: char, context: &mut C, x: &mut f32, y: f32, color: Rgba)
    where
        C: DrawContext<Texture = F::Texture> + ?Sized,
    {
        match self.get_glyph(code) {
            Some(glyph) => {
                emit_glyph(glyph, context, *x, y, color);
                *x += glyph.advance_x;
            }
            None => debug!(target: "gtext::glyph", "skipping unresolved {code:?}"),
        }
    }

    fn load_glyph(&mut self, code: char) -> bool {
        let raster = match self.rasterizer.rasterize(code) {
            Ok(raster) => raster,
            Err(err) => {
                debug!(
                    target: "gtext::glyph",
                    "{} produced no glyph for {code:?}: {err}",
                    self.rasterizer.name()
                );
                return false;
            }
        };
        GlyphLoadDiagnostics::new(self.rasterizer.name(), &self.spec, code, &raster).log();

        // A glyph without a texture is never cached; the code is retried later.
        let texture = match surface::make_texture(&self.textures, &raster.bitmap) {
            Ok(texture) => texture,
            Err(err) => {
                warn!(target: "gtext::glyph", "dropping glyph {code:?}: {err}");
                return false;
            }
        };

        self.store.insert(Glyph::new(code, &raster, &self.spec, texture));
        true
    }
}
