// this_file: backends/gtext-core/src/cache.rs

//! Per-font glyph store with a pluggable eviction hook.

use crate::types::Glyph;
use log::{debug, warn};
use lru::LruCache;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// Decides which glyphs leave the store.
///
/// The store notifies the policy of every insert, lookup hit and removal.
pub trait EvictionPolicy {
    /// Called after `code` was inserted; returns codes to evict.
    fn on_insert(&mut self, code: char) -> Vec<char>;

    fn on_access(&mut self, _code: char) {}

    fn on_remove(&mut self, _code: char) {}

    fn on_clear(&mut self) {}
}

/// Never evicts: the store lives exactly as long as its font.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unbounded;

impl EvictionPolicy for Unbounded {
    fn on_insert(&mut self, _code: char) -> Vec<char> {
        Vec::new()
    }
}

/// Keeps at most `capacity` glyphs, dropping the least recently used.
pub struct LruEviction {
    order: LruCache<char, ()>,
}

impl LruEviction {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            order: LruCache::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.order.cap().get()
    }
}

impl EvictionPolicy for LruEviction {
    fn on_insert(&mut self, code: char) -> Vec<char> {
        match self.order.push(code, ()) {
            Some((evicted, ())) if evicted != code => vec![evicted],
            _ => Vec::new(),
        }
    }

    fn on_access(&mut self, code: char) {
        self.order.get(&code);
    }

    fn on_remove(&mut self, code: char) {
        self.order.pop(&code);
    }

    fn on_clear(&mut self) {
        self.order.clear();
    }
}

/// Glyphs of one font keyed by character code.
///
/// The store owns every glyph and therefore every glyph texture; removing an
/// entry or dropping the store releases them.
pub struct GlyphStore<T> {
    glyphs: HashMap<char, Glyph<T>>,
    policy: Box<dyn EvictionPolicy>,
}

impl<T> GlyphStore<T> {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::with_policy(Box::new(Unbounded))
    }

    pub fn with_policy(policy: Box<dyn EvictionPolicy>) -> Self {
        Self {
            glyphs: HashMap::new(),
            policy,
        }
    }

    pub fn contains(&self, code: char) -> bool {
        self.glyphs.contains_key(&code)
    }

    /// Get a cached glyph, counting as a use for the eviction policy.
    pub fn lookup(&mut self, code: char) -> Option<&Glyph<T>> {
        if self.glyphs.contains_key(&code) {
            self.policy.on_access(code);
        }
        self.glyphs.get(&code)
    }

    /// Get a cached glyph without touching the eviction policy.
    pub fn peek(&self, code: char) -> Option<&Glyph<T>> {
        self.glyphs.get(&code)
    }

    /// Store a glyph under its code.
    ///
    /// An existing entry wins: the new glyph and its texture are dropped and
    /// `false` is returned.
    pub fn insert(&mut self, glyph: Glyph<T>) -> bool {
        let code = glyph.code;
        match self.glyphs.entry(code) {
            Entry::Occupied(_) => {
                warn!(target: "gtext::glyph", "glyph {code:?} already cached, keeping existing entry");
                return false;
            }
            Entry::Vacant(slot) => {
                slot.insert(glyph);
            }
        }

        for evicted in self.policy.on_insert(code) {
            if evicted != code && self.glyphs.remove(&evicted).is_some() {
                debug!(target: "gtext::glyph", "evicted glyph {evicted:?}");
            }
        }
        true
    }

    /// Evict one glyph; its texture is released when the value is dropped.
    pub fn remove(&mut self, code: char) -> Option<Glyph<T>> {
        let removed = self.glyphs.remove(&code);
        if removed.is_some() {
            self.policy.on_remove(code);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.policy.on_clear();
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Cached codes in unspecified order.
    pub fn codes(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }
}

impl<T> Default for GlyphStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
