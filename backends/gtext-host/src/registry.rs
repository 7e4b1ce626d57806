// this_file: backends/gtext-host/src/registry.rs

//! Shareable registry of host rasterization callbacks.

use crate::backend::{HostGlyphImage, HostRasterizer};
use log::debug;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased host font object.
pub struct FontHandle(Box<dyn Any + Send + Sync>);

impl FontHandle {
    pub fn new<T: Any + Send + Sync>(font: T) -> Self {
        Self(Box::new(font))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle").finish_non_exhaustive()
    }
}

type AcquireFn = dyn Fn(&str) -> Option<FontHandle> + Send + Sync;
type RasterizeFn = dyn Fn(&FontHandle, char) -> Option<HostGlyphImage<'static>> + Send + Sync;

#[derive(Clone)]
struct Callbacks {
    acquire: Arc<AcquireFn>,
    rasterize: Arc<RasterizeFn>,
}

/// Font acquisition and glyph rasterization callbacks supplied by the host.
///
/// Share it as `Arc<CallbackRegistry>`; every font built on it sees the
/// latest registration. With nothing registered no glyph is produced.
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: RwLock<Option<Callbacks>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Install both callbacks, replacing any previous pair.
    pub fn register<A, R>(&self, acquire_font: A, rasterize_glyph: R)
    where
        A: Fn(&str) -> Option<FontHandle> + Send + Sync + 'static,
        R: Fn(&FontHandle, char) -> Option<HostGlyphImage<'static>> + Send + Sync + 'static,
    {
        let callbacks = Callbacks {
            acquire: Arc::new(acquire_font),
            rasterize: Arc::new(rasterize_glyph),
        };
        let replaced = self.callbacks.write().replace(callbacks).is_some();
        debug!(target: "gtext::host", "rasterization callbacks registered (replaced: {replaced})");
    }

    pub fn clear(&self) {
        if self.callbacks.write().take().is_some() {
            debug!(target: "gtext::host", "rasterization callbacks cleared");
        }
    }

    pub fn is_registered(&self) -> bool {
        self.callbacks.read().is_some()
    }

    // The lock is not held while a callback runs.
    fn current(&self) -> Option<Callbacks> {
        self.callbacks.read().clone()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("registered", &self.is_registered())
            .finish()
    }
}

impl HostRasterizer for CallbackRegistry {
    type Handle = FontHandle;

    fn acquire_font(&self, definition: &str) -> Option<FontHandle> {
        let callbacks = self.current()?;
        (callbacks.acquire)(definition)
    }

    fn rasterize_glyph<'a>(
        &'a self,
        handle: &'a FontHandle,
        code: char,
    ) -> Option<HostGlyphImage<'a>> {
        let callbacks = self.current()?;
        (callbacks.rasterize)(handle, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostCallbackBackend;
    use gtext_core::mock::{CountingTextureFactory, RecordingContext};
    use gtext_core::{Font, FontSource, FontSpec, GlyphRasterizer, Rgba};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct HostFont {
        size: i32,
    }

    fn square(handle: &FontHandle, _code: char) -> Option<HostGlyphImage<'static>> {
        let size = handle.downcast_ref::<HostFont>()?.size;
        Some(
            HostGlyphImage::new(size, size, vec![255; (size * size) as usize])
                .with_bearing(0, size)
                .with_advance(size as f32 + 1.0, 0.0),
        )
    }

    fn font(registry: &Arc<CallbackRegistry>) -> Font<CountingTextureFactory> {
        let spec = FontSpec::new(FontSource::definition("10px mono"));
        let backend = HostCallbackBackend::from_spec(registry.clone(), &spec).unwrap();
        Font::new(spec, Box::new(backend), CountingTextureFactory::new())
    }

    #[test]
    fn test_unregistered_registry_yields_nothing() {
        let registry = CallbackRegistry::shared();
        let mut font = font(&registry);
        let mut context = RecordingContext::new();
        let mut x = 5.0;

        font.draw_text("abc", &mut context, &mut x, 0.0, Rgba::WHITE);
        assert_eq!(x, 5.0);
        assert!(context.rectangles().is_empty());
        assert_eq!(font.glyph_count(), 0);
    }

    #[test]
    fn test_callbacks_invoked_once_per_font_and_code() {
        let registry = CallbackRegistry::shared();
        let acquired = Arc::new(AtomicUsize::new(0));
        let rasterized = Arc::new(AtomicUsize::new(0));
        {
            let acquired = acquired.clone();
            let rasterized = rasterized.clone();
            registry.register(
                move |definition| {
                    acquired.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(definition, "10px mono");
                    Some(FontHandle::new(HostFont { size: 3 }))
                },
                move |handle, code| {
                    rasterized.fetch_add(1, Ordering::SeqCst);
                    square(handle, code)
                },
            );
        }

        let mut font = font(&registry);
        let mut context = RecordingContext::new();
        let mut x = 0.0;
        font.draw_text("hello", &mut context, &mut x, 0.0, Rgba::BLACK);

        assert_eq!(acquired.load(Ordering::SeqCst), 1);
        assert_eq!(rasterized.load(Ordering::SeqCst), 4);
        assert_eq!(x, 20.0);
    }

    #[test]
    fn test_register_replaces_previous_pair() {
        let registry = CallbackRegistry::shared();
        registry.register(|_| Some(FontHandle::new(HostFont { size: 2 })), square);
        registry.register(|_| Some(FontHandle::new(HostFont { size: 5 })), square);

        let mut backend = HostCallbackBackend::new(registry.clone(), "any");
        let glyph = backend.rasterize('a').unwrap();
        assert_eq!((glyph.bitmap.width, glyph.bitmap.height), (5, 5));
    }

    #[test]
    fn test_clear_unregisters() {
        let registry = CallbackRegistry::shared();
        registry.register(|_| Some(FontHandle::new(HostFont { size: 2 })), square);
        assert!(registry.is_registered());

        registry.clear();
        assert!(!registry.is_registered());
        assert!(registry.acquire_font("any").is_none());
    }

    #[test]
    fn test_wrong_handle_type_gives_no_glyph() {
        let registry = CallbackRegistry::shared();
        registry.register(|_| Some(FontHandle::new("not a HostFont")), square);
        let mut backend = HostCallbackBackend::new(registry.clone(), "any");
        assert!(backend.rasterize('a').is_err());
    }

    #[test]
    fn test_callback_may_reenter_registry() {
        let registry = CallbackRegistry::shared();
        let inner = Arc::downgrade(&registry);
        registry.register(
            move |_| {
                let registry = inner.upgrade()?;
                registry
                    .is_registered()
                    .then(|| FontHandle::new(HostFont { size: 1 }))
            },
            square,
        );
        assert!(registry.acquire_font("any").is_some());
    }
}
