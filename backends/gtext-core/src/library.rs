// this_file: backends/gtext-core/src/library.rs

//! Per-context directory of fonts keyed by their configuration.

use crate::types::{FontKey, FontSpec};
use crate::{Font, GlyphRasterizer, Result, TextureFactory};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Fonts of one drawing context, created on first use of a spec.
///
/// Every font gets its own clone of the texture factory, so the factory is
/// usually a shared handle (`Rc<..>`, `Arc<..>` or `&..`).
pub struct FontLibrary<F: TextureFactory + Clone> {
    textures: F,
    fonts: HashMap<FontKey, Font<F>>,
}

impl<F: TextureFactory + Clone> FontLibrary<F> {
    pub fn new(textures: F) -> Self {
        Self {
            textures,
            fonts: HashMap::new(),
        }
    }

    /// Font for `spec`, building its backend with `make_backend` if this spec
    /// has not been seen before.
    pub fn get_or_create<B>(&mut self, spec: &FontSpec, make_backend: B) -> Result<&mut Font<F>>
    where
        B: FnOnce(&FontSpec) -> Result<Box<dyn GlyphRasterizer>>,
    {
        match self.fonts.entry(spec.key()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(slot) => {
                spec.validate()?;
                let backend = make_backend(spec)?;
                debug!(
                    target: "gtext::glyph",
                    "created font {} with backend {}",
                    spec.source.label(),
                    backend.name()
                );
                Ok(slot.insert(Font::new(spec.clone(), backend, self.textures.clone())))
            }
        }
    }

    pub fn get(&self, spec: &FontSpec) -> Option<&Font<F>> {
        self.fonts.get(&spec.key())
    }

    pub fn get_mut(&mut self, spec: &FontSpec) -> Option<&mut Font<F>> {
        self.fonts.get_mut(&spec.key())
    }

    /// Drop a font together with all of its glyph textures.
    pub fn remove(&mut self, spec: &FontSpec) -> bool {
        self.fonts.remove(&spec.key()).is_some()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            font_count: self.fonts.len(),
            glyph_count: self.fonts.values().map(Font::glyph_count).sum(),
        }
    }
}

/// Library statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStats {
    pub font_count: usize,
    pub glyph_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{CountingTextureFactory, ScriptedRasterizer};
    use crate::types::FontSource;
    use std::cell::Cell;

    fn backend(_spec: &FontSpec) -> Result<Box<dyn GlyphRasterizer>> {
        Ok(Box::new(
            ScriptedRasterizer::new().with_glyph('a', 4, 4, 0, 4, 5.0),
        ))
    }

    #[test]
    fn test_font_created_once_per_spec() {
        let mut library = FontLibrary::new(CountingTextureFactory::new());
        let spec = FontSpec::new(FontSource::definition("12px mono"));
        let builds = Cell::new(0);

        for _ in 0..3 {
            let font = library
                .get_or_create(&spec, |spec| {
                    builds.set(builds.get() + 1);
                    backend(spec)
                })
                .unwrap();
            font.get_glyph('a');
        }

        assert_eq!(builds.get(), 1);
        assert_eq!(
            library.stats(),
            LibraryStats {
                font_count: 1,
                glyph_count: 1
            }
        );
    }

    #[test]
    fn test_distinct_specs_get_distinct_fonts() {
        let mut library = FontLibrary::new(CountingTextureFactory::new());
        let small = FontSpec::new(FontSource::definition("12px mono"));
        let large = FontSpec::new(FontSource::definition("24px mono"));
        library.get_or_create(&small, backend).unwrap();
        library.get_or_create(&large, backend).unwrap();
        assert_eq!(library.len(), 2);
        assert!(library.get(&small).is_some());
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let mut library = FontLibrary::new(CountingTextureFactory::new());
        let spec = FontSpec::new(FontSource::file("", 12.0));
        assert!(library.get_or_create(&spec, backend).is_err());
        assert!(library.is_empty());
    }

    #[test]
    fn test_remove_releases_textures() {
        let textures = CountingTextureFactory::new();
        let mut library = FontLibrary::new(textures.clone());
        let spec = FontSpec::new(FontSource::definition("12px mono"));
        library
            .get_or_create(&spec, backend)
            .unwrap()
            .get_glyph('a');
        assert_eq!(textures.live(), 1);
        assert!(library.remove(&spec));
        assert_eq!(textures.live(), 0);
    }
}
