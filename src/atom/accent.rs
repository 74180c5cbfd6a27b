//! Accented atoms: a base with an accent mark over it.

use crate::font::{FontStyle, MathFont};
use crate::layout::{builders, Env, LayoutNode, Scaled};

use super::{Atom, CharAtom};

/// An atom carrying an accent mark over a base. The base is laid out in the
/// cramped variant of the current style so it does not grow into the mark;
/// script placement around an accented atom anchors against the bare base
/// (see the corner-script algorithm), which is why the base stays
/// accessible here.
#[derive(Debug, Clone)]
pub struct AccentedAtom {
    /// The accentee
    pub base: Box<Atom>,
    /// Codepoint of the accent mark (usually a combining character)
    pub accent: char,
}

impl AccentedAtom {
    /// Puts `accent` over `base`.
    pub fn new(base: Atom, accent: char) -> AccentedAtom {
        AccentedAtom {
            base: Box::new(base),
            accent,
        }
    }

    pub(crate) fn layout<'f, F: MathFont>(&self, env: &Env<'f, F>) -> LayoutNode<'f, F> {
        let base = env.with_style(env.style().cramped(), |cramp| self.base.layout(cramp));
        let accent = CharAtom::new(self.accent, FontStyle::NONE).layout(env);

        // Attachment points for accent & base are calculated by
        //   (a) Non-symbol: width / 2.0
        //   (b) Symbol: the font's attachment point if there is one,
        //       otherwise (advance + italic correction) / 2.0
        let base_offset = match base.is_symbol() {
            Some(glyph) if !glyph.attachment.is_zero() => glyph.attachment,
            Some(glyph) => (base.width + glyph.italics).scale(0.5),
            None => base.width.scale(0.5),
        };
        let accent_offset = match accent.is_symbol() {
            Some(glyph) if !glyph.attachment.is_zero() => glyph.attachment,
            _ => accent.width.scale(0.5),
        };

        // Do not drop the accent any lower than it would sit on an 'x'-high
        // base in the current style.
        let clearance = base
            .height
            .min(env.constants().accent_base_height.scaled(env));

        // The bottom child's baseline is the box's baseline, so the accented
        // atom sits on the same baseline as its bare base.
        let mut vbox = builders::VBox::new();
        vbox.add_node(hbox![kern!(horz: base_offset - accent_offset), accent]);
        vbox.add_node_with_gap(base, -clearance);
        vbox.build()
    }
}
