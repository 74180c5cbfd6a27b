//! Per-glyph corner kerning tables.
//!
//! An OpenType math font may attach to a glyph one stepwise kerning function
//! per corner of its bounding box. The function maps a vertical offset (how
//! high above or low below the baseline an attaching script sits) to a
//! horizontal kern value. Example: with an italic letter like `f` in
//! `f_1^2`, the subscript needs to be slightly closer to the letter and the
//! superscript slightly further.

use crate::dimensions::units::Em;
use crate::dimensions::Unit;

/// Corners of a glyph's bounding box.
/// Used for getting a kern value from the math font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// North-East corner
    TopRight,
    /// North-West corner
    TopLeft,
    /// South-East corner
    BottomRight,
    /// South-West corner
    BottomLeft,
}

/// A stepwise kerning function: a sorted list of `(correction height, kern)`
/// breakpoints. Heights beyond the last breakpoint keep using the final kern
/// value, so the function is asymptotically constant on both ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MathKern {
    entries: Vec<(Unit<Em>, Unit<Em>)>,
}

impl MathKern {
    /// Builds a kern function from `(height, value)` breakpoints.
    /// The heights must be in ascending order.
    pub fn new(entries: Vec<(Unit<Em>, Unit<Em>)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 <= w[1].0));
        Self { entries }
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the function has no breakpoints at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the step in effect at `height`: the smallest breakpoint
    /// greater than or equal to the query, or the last index if every
    /// breakpoint lies below it. Pure in its inputs, so identical queries
    /// always return identical indices.
    pub fn index_of(&self, height: Unit<Em>) -> usize {
        for (i, &(breakpoint, _)) in self.entries.iter().enumerate() {
            if breakpoint >= height {
                return i;
            }
        }
        self.entries.len().saturating_sub(1)
    }

    /// Kern value of the step with the given index, zero when out of range.
    pub fn value(&self, index: usize) -> Unit<Em> {
        self.entries.get(index).map(|&(_, v)| v).unwrap_or(Unit::ZERO)
    }

    /// Kern value in effect at the given height.
    pub fn kern_at(&self, height: Unit<Em>) -> Unit<Em> {
        self.value(self.index_of(height))
    }
}

/// The four corner kerning functions of one glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MathKernRecord {
    /// Kern function for the top-left corner.
    #[serde(default)]
    pub top_left: MathKern,
    /// Kern function for the top-right corner.
    #[serde(default)]
    pub top_right: MathKern,
    /// Kern function for the bottom-left corner.
    #[serde(default)]
    pub bottom_left: MathKern,
    /// Kern function for the bottom-right corner.
    #[serde(default)]
    pub bottom_right: MathKern,
}

impl MathKernRecord {
    /// The kern function attached to the given corner.
    pub fn corner(&self, corner: Corner) -> &MathKern {
        match corner {
            Corner::TopRight => &self.top_right,
            Corner::TopLeft => &self.top_left,
            Corner::BottomRight => &self.bottom_right,
            Corner::BottomLeft => &self.bottom_left,
        }
    }
}
