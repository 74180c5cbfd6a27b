//! Error types for font-registry configuration.
//!
//! Layout itself is total and has no error path: missing kern data degrades
//! to a zero kern, unknown style names resolve to the none style, missing
//! glyphs fall back to the undefined glyph. The only operations that can be
//! refused are configuration-time ones, e.g. selecting a font that was never
//! registered or creating a layout context before any math font is active.

use std::fmt;

/// Result type for registry configuration operations.
pub type FontResult<T> = ::std::result::Result<T, FontError>;

/// Invalid-state signals raised while configuring the font registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    /// A layout context was requested but no math font has been selected.
    NoMathFontSelected,
    /// The named font (collection) was never registered.
    UnknownFontName(String),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::FontError::*;
        match *self {
            NoMathFontSelected =>
                write!(f, "no math font has been selected"),
            UnknownFontName(ref name) =>
                write!(f, "no font registered under the name '{}'", name),
        }
    }
}

impl std::error::Error for FontError {}
