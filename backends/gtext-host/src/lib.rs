// this_file: backends/gtext-host/src/lib.rs

//! Host callback backend for gtext.
//!
//! Hosts without a bundled font stack provide glyph images themselves, either
//! through a [`HostRasterizer`] implementation or by registering closures on a
//! [`CallbackRegistry`].

pub mod backend;
pub mod registry;

pub use backend::{HostCallbackBackend, HostGlyphImage, HostRasterizer};
pub use registry::{CallbackRegistry, FontHandle};
