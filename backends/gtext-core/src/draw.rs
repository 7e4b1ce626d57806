// this_file: backends/gtext-core/src/draw.rs

//! Quad geometry for cached glyphs.

use crate::types::{Glyph, Rgba, TexturedRect};
use crate::DrawContext;

/// Screen-space corners of a glyph quad, y growing upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Quad {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Corners of `glyph` drawn with its pen origin at (`x`, `y`).
pub fn glyph_quad<T>(glyph: &Glyph<T>, x: f32, y: f32) -> Quad {
    let left = x + glyph.offset_x as f32;
    let top = y + glyph.height as f32 - glyph.offset_y as f32;
    Quad {
        left,
        top,
        right: left + glyph.width as f32,
        bottom: top - glyph.height as f32,
    }
}

/// Bind the glyph texture and push its quad. Does not flush.
pub fn emit_glyph<C>(glyph: &Glyph<C::Texture>, context: &mut C, x: f32, y: f32, color: Rgba)
where
    C: DrawContext + ?Sized,
{
    let quad = glyph_quad(glyph, x, y);
    context.set_texture(&glyph.texture);
    context.push_rectangle(
        TexturedRect {
            x: quad.left,
            y: quad.bottom,
            width: quad.width(),
            height: quad.height(),
            s: glyph.s0,
            t: glyph.t0,
            s_width: glyph.s1 - glyph.s0,
            t_height: glyph.t1 - glyph.t0,
        },
        color,
    );
}
