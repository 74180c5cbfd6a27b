//! The units relevant to layout: font design units (em) and surface units (px).
//!
//! The conversion factor between the two is precisely what specifying a font
//! size is about: a font size of 16 means "1 em = 16 px on the output surface".

/// A virtual unit in which the font expresses every glyph measurement,
/// conventionally corresponding to:
///
///  - width of an em-dash and an em-space character
///  - line separation
///  - (historically but no longer true), width of an upper case M
///
/// All metrics handed over the font boundary are normalized to em, so the
/// units-per-em divisor of the underlying font file never appears in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Em;

/// Final surface unit: whatever unit the caller's drawing surface uses
/// (pixels for a raster canvas, points for a PDF surface, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Px;

/// If U is a unit and V is a unit, Ratio<U, V> is the unit U . V⁻¹
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio<U, V> {
    _numerator: std::marker::PhantomData<U>,
    _denominator: std::marker::PhantomData<V>,
}

/// A font size is by definition a number of surface units per em.
pub type FontSize = Ratio<Px, Em>;
