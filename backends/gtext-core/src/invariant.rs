// this_file: backends/gtext-core/src/invariant.rs

//! Internal invariant checks. A failure here is a bug in gtext, not bad input.

use crate::types::Glyph;

/// Unwrap the store entry that was inserted moments ago for `code`.
///
/// # Panics
///
/// Panics when the entry is missing: the store lost a glyph it just accepted.
pub fn glyph_after_insert<T>(entry: Option<&Glyph<T>>, code: char) -> &Glyph<T> {
    match entry {
        Some(glyph) => glyph,
        None => panic!("glyph store invariant violated: {code:?} missing right after insertion"),
    }
}
