// this_file: backends/gtext-outline/src/engine.rs

//! Outline library seam used by the local rasterizer.
//!
//! Every step hands out owned resources. Dropping them releases whatever the
//! engine acquired, so an early return from a half-finished glyph leaks
//! nothing.

use bitflags::bitflags;
use gtext_core::{GlyphBitmap, OutlineStyle, Result};
use std::path::Path;

bitflags! {
    /// Options for loading a glyph into the face's slot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LoadFlags: u32 {
        /// Render a coverage bitmap into the slot
        const RENDER = 1 << 0;
        /// Load the outline only
        const NO_BITMAP = 1 << 1;
        const FORCE_AUTOHINT = 1 << 2;
        const NO_HINTING = 1 << 3;
        const NO_AUTOHINT = 1 << 4;
    }
}

impl LoadFlags {
    /// Flags for a font with the given hinting switch and outline style.
    pub fn for_font(hinting: bool, outline: OutlineStyle) -> Self {
        let mut flags = if outline.is_outlined() {
            LoadFlags::NO_BITMAP
        } else {
            LoadFlags::RENDER
        };
        if hinting {
            flags |= LoadFlags::FORCE_AUTOHINT;
        } else {
            flags |= LoadFlags::NO_HINTING | LoadFlags::NO_AUTOHINT;
        }
        flags
    }
}

/// Which border a stroker keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    /// Only the band inside the original contour
    Inside,
    /// The glyph grown by the band on both sides
    Both,
}

/// Coverage bitmap positioned relative to the pen origin.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapGlyph {
    pub bitmap: GlyphBitmap,
    pub left: i32,
    pub top: i32,
}

/// Result of loading a glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSlot {
    /// Present when [`LoadFlags::RENDER`] was requested
    pub bitmap: Option<BitmapGlyph>,
    /// Pen advance in 26.6 fixed point
    pub advance_x: i32,
    pub advance_y: i32,
}

/// Size-scaled face metrics in 26.6 fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalableMetrics {
    pub units_per_em: u16,
    pub ascender: i32,
    pub descender: i32,
}

/// Font outline library driven by [`crate::OutlineRasterizer`].
pub trait OutlineEngine {
    type Face;
    type Stroker;
    type Outline;

    fn name(&self) -> &str;

    /// Open the face at `path` sized to `size` pixels per em.
    fn load_face(&self, path: &Path, size: f32) -> Result<Self::Face>;

    /// Load `code` into the face's glyph slot.
    fn load_glyph(&self, face: &mut Self::Face, code: char, flags: LoadFlags) -> Result<GlyphSlot>;

    /// Stroker with round caps and joins.
    fn new_stroker(&self, radius: f32) -> Result<Self::Stroker>;

    /// Outline of the glyph currently in the face's slot.
    fn get_glyph(&self, face: &Self::Face) -> Result<Self::Outline>;

    fn stroke(&self, outline: Self::Outline, stroker: &Self::Stroker) -> Result<Self::Outline>;

    fn stroke_border(
        &self,
        outline: Self::Outline,
        stroker: &Self::Stroker,
        side: BorderSide,
    ) -> Result<Self::Outline>;

    /// Anti-aliased coverage bitmap of `outline`.
    fn outline_to_bitmap(&self, outline: Self::Outline) -> Result<BitmapGlyph>;

    /// Metrics of a scalable face; `None` for bitmap-only faces.
    fn scalable_metrics(&self, face: &Self::Face) -> Option<ScalableMetrics>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_for_plain_hinted_font() {
        let flags = LoadFlags::for_font(true, OutlineStyle::None);
        assert_eq!(flags, LoadFlags::RENDER | LoadFlags::FORCE_AUTOHINT);
    }

    #[test]
    fn test_flags_for_unhinted_outline_font() {
        let flags = LoadFlags::for_font(false, OutlineStyle::Stroke);
        assert_eq!(
            flags,
            LoadFlags::NO_BITMAP | LoadFlags::NO_HINTING | LoadFlags::NO_AUTOHINT
        );
        assert!(!flags.contains(LoadFlags::RENDER));
    }
}
