// this_file: backends/gtext-core/src/mock.rs

//! In-memory collaborators for tests and benchmarks.
//!
//! `RecordingContext` stands in for the GPU drawing context,
//! `CountingTextureFactory` for texture construction and
//! `ScriptedRasterizer` for a rasterization backend.

use crate::types::{FontMetrics, GlyphBitmap, PixelFormat, RasterizedGlyph, Rgba, TexturedRect};
use crate::{DrawContext, GTextError, GlyphRasterizer, Result, TextureFactory};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
struct FactoryState {
    format: Cell<PixelFormat>,
    created: Cell<u32>,
    released: Rc<Cell<u32>>,
    fail_next: Cell<u32>,
}

/// Texture factory that counts creations and releases.
#[derive(Debug, Clone)]
pub struct CountingTextureFactory {
    state: Rc<FactoryState>,
}

impl CountingTextureFactory {
    pub fn new() -> Self {
        Self::with_format(PixelFormat::Alpha8)
    }

    pub fn with_format(format: PixelFormat) -> Self {
        Self {
            state: Rc::new(FactoryState {
                format: Cell::new(format),
                created: Cell::new(0),
                released: Rc::new(Cell::new(0)),
                fail_next: Cell::new(0),
            }),
        }
    }

    /// Make the next `count` creations fail.
    pub fn fail_next(&self, count: u32) {
        self.state.fail_next.set(count);
    }

    pub fn created(&self) -> u32 {
        self.state.created.get()
    }

    pub fn released(&self) -> u32 {
        self.state.released.get()
    }

    /// Textures created and not yet dropped.
    pub fn live(&self) -> u32 {
        self.created() - self.released()
    }
}

impl Default for CountingTextureFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureFactory for CountingTextureFactory {
    type Texture = CountingTexture;

    fn pixel_format(&self) -> PixelFormat {
        self.state.format.get()
    }

    fn create_texture(
        &self,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: &[u8],
    ) -> Result<CountingTexture> {
        let failures = self.state.fail_next.get();
        if failures > 0 {
            self.state.fail_next.set(failures - 1);
            return Err(GTextError::texture("scripted texture failure"));
        }

        let id = self.state.created.get() + 1;
        self.state.created.set(id);
        Ok(CountingTexture {
            id,
            width,
            height,
            format,
            data: data.to_vec(),
            released: self.state.released.clone(),
        })
    }
}

/// Texture produced by [`CountingTextureFactory`]; counts its own release.
#[derive(Debug)]
pub struct CountingTexture {
    id: u32,
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
    released: Rc<Cell<u32>>,
}

impl CountingTexture {
    /// Creation order, starting at 1.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Drop for CountingTexture {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

/// One recorded drawing-context call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetTexture(u32),
    PushRectangle(TexturedRect, Rgba),
    Flush,
}

/// Drawing context that records every call.
#[derive(Debug, Default)]
pub struct RecordingContext {
    ops: Vec<DrawOp>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn rectangles(&self) -> Vec<(TexturedRect, Rgba)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::PushRectangle(rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Flush).count()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl DrawContext for RecordingContext {
    type Texture = CountingTexture;

    fn set_texture(&mut self, texture: &CountingTexture) {
        self.ops.push(DrawOp::SetTexture(texture.id()));
    }

    fn push_rectangle(&mut self, rect: TexturedRect, color: Rgba) {
        self.ops.push(DrawOp::PushRectangle(rect, color));
    }

    fn send_vertex_buffer_to_gpu(&mut self) {
        self.ops.push(DrawOp::Flush);
    }
}

#[derive(Debug, Default)]
struct CallLog {
    per_code: RefCell<HashMap<char, usize>>,
    releases: Cell<usize>,
}

/// Shared view of the calls a [`ScriptedRasterizer`] received.
#[derive(Debug, Clone, Default)]
pub struct RasterCalls {
    log: Rc<CallLog>,
}

impl RasterCalls {
    pub fn count(&self, code: char) -> usize {
        self.log.per_code.borrow().get(&code).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.log.per_code.borrow().values().sum()
    }

    pub fn releases(&self) -> usize {
        self.log.releases.get()
    }
}

/// Rasterizer answering from a fixed table of glyphs.
#[derive(Debug, Default)]
pub struct ScriptedRasterizer {
    glyphs: HashMap<char, RasterizedGlyph>,
    metrics: FontMetrics,
    calls: RasterCalls,
}

impl ScriptedRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a solid `width` x `height` glyph.
    pub fn with_glyph(
        mut self,
        code: char,
        width: u32,
        height: u32,
        left: i32,
        top: i32,
        advance_x: f32,
    ) -> Self {
        let data = vec![255; width as usize * height as usize];
        self.glyphs.insert(
            code,
            RasterizedGlyph {
                bitmap: GlyphBitmap::new(width, height, data),
                left,
                top,
                advance_x,
                advance_y: 0.0,
            },
        );
        self
    }

    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn calls(&self) -> RasterCalls {
        self.calls.clone()
    }
}

impl GlyphRasterizer for ScriptedRasterizer {
    fn name(&self) -> &str {
        "scripted"
    }

    fn rasterize(&mut self, code: char) -> Result<RasterizedGlyph> {
        *self.calls.log.per_code.borrow_mut().entry(code).or_insert(0) += 1;
        self.glyphs
            .get(&code)
            .cloned()
            .ok_or_else(|| GTextError::glyph(code, "not scripted"))
    }

    fn font_metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn release(&mut self) {
        let releases = &self.calls.log.releases;
        releases.set(releases.get() + 1);
    }
}
