//! Single-character atoms.

use crate::dimensions::units::Em;
use crate::dimensions::Unit;
use crate::font::{Char, FontStyle, MathFont};
use crate::layout::{Env, LayoutGlyph, LayoutNode, LayoutVariant, Scaled};

use super::{AtomType, LimitsType};

/// An atom drawing a single character. This is the capability the script
/// algorithms probe for: it can resolve itself to a glyph under a context
/// and knows whether it stands for a text glyph or a big operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharAtom {
    /// Codepoint to draw
    pub code: char,
    /// Requested font style; [`FontStyle::NONE`] defers to the registry's
    /// math style convention
    pub style: FontStyle,
    is_math_mode: bool,
    atom_type: AtomType,
    limits: LimitsType,
}

impl CharAtom {
    /// An ordinary math-mode character.
    pub fn new(code: char, style: FontStyle) -> CharAtom {
        CharAtom {
            code,
            style,
            is_math_mode: true,
            atom_type: AtomType::Ordinary,
            limits: LimitsType::Never,
        }
    }

    /// A text-mode character, resolved against the main font collection.
    pub fn text(code: char, style: FontStyle) -> CharAtom {
        CharAtom {
            is_math_mode: false,
            ..CharAtom::new(code, style)
        }
    }

    /// A big operator (like ∑), with style-dependent limits placement.
    pub fn big_operator(code: char, style: FontStyle) -> CharAtom {
        CharAtom {
            atom_type: AtomType::BigOperator,
            limits: LimitsType::Normal,
            ..CharAtom::new(code, style)
        }
    }

    /// Overrides the limits preference.
    pub fn with_limits(mut self, limits: LimitsType) -> CharAtom {
        self.limits = limits;
        self
    }

    /// Whether this is a text glyph (as opposed to a math glyph, which
    /// carries an italic correction into script placement).
    pub fn is_text(&self) -> bool {
        !self.is_math_mode
    }

    pub(crate) fn atom_type(&self) -> AtomType {
        self.atom_type
    }

    pub(crate) fn limits_type(&self) -> LimitsType {
        self.limits
    }

    /// Resolves the character to a glyph under the given context.
    pub fn resolve<'f, F: MathFont>(&self, env: &Env<'f, F>) -> Char<'f, F> {
        env.char(self.code, self.style, self.is_math_mode)
    }

    /// Lays the character out as a glyph box.
    pub fn layout<'f, F: MathFont>(&self, env: &Env<'f, F>) -> LayoutNode<'f, F> {
        let chr = self.resolve(env);
        let metrics = chr.metrics();
        LayoutNode {
            width: metrics.advance.scaled(env),
            height: metrics.height.scaled(env),
            depth: metrics.depth.scaled(env),
            shift: Unit::ZERO,
            node: LayoutVariant::Glyph(LayoutGlyph {
                gid: chr.gid,
                size: Unit::<Em>::new(1.0).scaled(env),
                italics: metrics.italics.scaled(env),
                attachment: metrics.attachment.scaled(env),
                font: chr.font,
            }),
        }
    }
}
