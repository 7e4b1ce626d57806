// this_file: backends/gtext-host/src/backend.rs

//! Glyph rasterization delegated to the embedding host.

use gtext_core::{
    FontSource, FontSpec, GTextError, GlyphBitmap, GlyphRasterizer, RasterizedGlyph, Result,
};
use log::debug;
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Glyph image handed back by the host.
///
/// The buffer may borrow host memory; it only has to live for the call that
/// returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct HostGlyphImage<'a> {
    pub width: i32,
    pub height: i32,
    /// 8-bit coverage, `width * height` bytes, rows top to bottom
    pub buffer: Cow<'a, [u8]>,
    pub left: i32,
    pub top: i32,
    pub advance_x: f32,
    pub advance_y: f32,
}

impl<'a> HostGlyphImage<'a> {
    pub fn new(width: i32, height: i32, buffer: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            width,
            height,
            buffer: buffer.into(),
            left: 0,
            top: 0,
            advance_x: 0.0,
            advance_y: 0.0,
        }
    }

    pub fn with_bearing(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_advance(mut self, advance_x: f32, advance_y: f32) -> Self {
        self.advance_x = advance_x;
        self.advance_y = advance_y;
        self
    }

    pub fn into_owned(self) -> HostGlyphImage<'static> {
        HostGlyphImage {
            width: self.width,
            height: self.height,
            buffer: Cow::Owned(self.buffer.into_owned()),
            left: self.left,
            top: self.top,
            advance_x: self.advance_x,
            advance_y: self.advance_y,
        }
    }

    /// Copy the image into a validated glyph.
    pub fn to_rasterized(&self, code: char) -> Result<RasterizedGlyph> {
        if self.width < 0 || self.height < 0 {
            return Err(GTextError::glyph(
                code,
                format!("host returned a {}x{} image", self.width, self.height),
            ));
        }
        let (width, height) = (self.width as u32, self.height as u32);
        let len = width as usize * height as usize;
        if self.buffer.len() < len {
            return Err(GTextError::glyph(
                code,
                format!(
                    "host buffer holds {} bytes, {width}x{height} needs {len}",
                    self.buffer.len()
                ),
            ));
        }

        Ok(RasterizedGlyph {
            bitmap: GlyphBitmap::new(width, height, self.buffer[..len].to_vec()),
            left: self.left,
            top: self.top,
            advance_x: self.advance_x,
            advance_y: self.advance_y,
        })
    }
}

/// Host-side text rasterizer (platform text stack, browser canvas, ...).
pub trait HostRasterizer {
    /// Host font object for one font definition.
    type Handle;

    /// Resolve `definition` to a font; `None` when the host has none (yet).
    fn acquire_font(&self, definition: &str) -> Option<Self::Handle>;

    /// Rasterize `code` with a previously acquired font.
    fn rasterize_glyph<'a>(
        &'a self,
        handle: &'a Self::Handle,
        code: char,
    ) -> Option<HostGlyphImage<'a>>;
}

macro_rules! forward_host_rasterizer {
    ($($ptr:ident),*) => {$(
        impl<T: HostRasterizer + ?Sized> HostRasterizer for $ptr<T> {
            type Handle = T::Handle;

            fn acquire_font(&self, definition: &str) -> Option<Self::Handle> {
                (**self).acquire_font(definition)
            }

            fn rasterize_glyph<'a>(
                &'a self,
                handle: &'a Self::Handle,
                code: char,
            ) -> Option<HostGlyphImage<'a>> {
                (**self).rasterize_glyph(handle, code)
            }
        }
    )*};
}

forward_host_rasterizer!(Arc, Rc, Box);

/// [`GlyphRasterizer`] that asks a [`HostRasterizer`] for every glyph.
pub struct HostCallbackBackend<H: HostRasterizer> {
    host: H,
    definition: String,
    handle: Option<H::Handle>,
}

impl<H: HostRasterizer> HostCallbackBackend<H> {
    pub fn new(host: H, definition: impl Into<String>) -> Self {
        Self {
            host,
            definition: definition.into(),
            handle: None,
        }
    }

    /// Backend for a definition-backed spec.
    pub fn from_spec(host: H, spec: &FontSpec) -> Result<Self> {
        match &spec.source {
            FontSource::Definition { definition } => Ok(Self::new(host, definition.clone())),
            FontSource::File { .. } => Err(GTextError::config(format!(
                "host backend needs a font definition, got '{}'",
                spec.source.label()
            ))),
        }
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: HostRasterizer> GlyphRasterizer for HostCallbackBackend<H> {
    fn name(&self) -> &str {
        "host-callback"
    }

    fn rasterize(&mut self, code: char) -> Result<RasterizedGlyph> {
        if self.handle.is_none() {
            self.handle = self.host.acquire_font(&self.definition);
            if self.handle.is_some() {
                debug!(target: "gtext::host", "acquired host font '{}'", self.definition);
            }
        }
        let Some(handle) = self.handle.as_ref() else {
            return Err(GTextError::FaceUnavailable {
                definition: self.definition.clone(),
            });
        };

        let image = self
            .host
            .rasterize_glyph(handle, code)
            .ok_or_else(|| GTextError::host(format!("no image for {code:?}")))?;
        image.to_rasterized(code)
    }

    fn release(&mut self) {
        if self.handle.take().is_some() {
            debug!(target: "gtext::host", "released host font '{}'", self.definition);
        }
    }
}
