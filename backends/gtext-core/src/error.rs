// this_file: backends/gtext-core/src/error.rs

//! Error types for gtext.
//!
//! Errors are produced by backends and the texture adapter. The draw
//! pipeline never returns them: a failed glyph is logged and skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gtext operations.
#[derive(Error, Debug)]
pub enum GTextError {
    /// Font file could not be read
    #[error("Failed to load font {path}: {source}")]
    FontLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Font file was read but could not be parsed
    #[error("Invalid font data in {path}")]
    InvalidFontData { path: PathBuf },

    /// Face initialisation failed earlier; the font produces no glyphs until released
    #[error("Font face for '{definition}' is unavailable")]
    FaceUnavailable { definition: String },

    /// A single glyph could not be produced
    #[error("Failed to rasterize {code:?}: {reason}")]
    Glyph { code: char, reason: String },

    /// Stroker construction failed
    #[error("Invalid stroker configuration: {reason}")]
    Stroker { reason: String },

    /// Texture construction failed
    #[error("Texture creation failed: {reason}")]
    Texture { reason: String },

    /// Host backend could not provide a font handle or glyph
    #[error("Host rasterizer error: {reason}")]
    Host { reason: String },

    /// Font configuration rejected
    #[error("Invalid font configuration: {reason}")]
    InvalidConfig { reason: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Image encoding error
    #[error("Image encoding error: {0}")]
    ImageEncode(String),
}

impl GTextError {
    pub fn font_load(path: PathBuf, source: std::io::Error) -> Self {
        Self::FontLoad { path, source }
    }

    pub fn glyph(code: char, reason: impl Into<String>) -> Self {
        Self::Glyph {
            code,
            reason: reason.into(),
        }
    }

    pub fn texture(reason: impl Into<String>) -> Self {
        Self::Texture {
            reason: reason.into(),
        }
    }

    pub fn host(reason: impl Into<String>) -> Self {
        Self::Host {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
