//! Over/under stacking: material placed above and below a base, as used for
//! operator limits (`\sum_{k=0}^{n}` in display style).

use crate::dimensions::units::Px;
use crate::dimensions::Unit;
use crate::font::MathFont;
use crate::layout::{builders, Env, LayoutNode, Scaled};

use super::Atom;

/// One stacked element and how to space it from the base. Auto spacing
/// derives the gap from the limit constants of the math font; otherwise the
/// element sits flush against the base.
#[derive(Debug, Clone)]
pub struct StackArgs {
    /// The stacked atom, if any
    pub atom: Option<Box<Atom>>,
    /// Whether to derive the gap from the font's limit constants
    pub auto_space: bool,
}

impl StackArgs {
    /// An element spaced per the font's limit constants.
    pub fn auto_space(atom: Option<Box<Atom>>) -> StackArgs {
        StackArgs {
            atom,
            auto_space: true,
        }
    }

    /// No element on this side.
    pub fn none() -> StackArgs {
        StackArgs {
            atom: None,
            auto_space: false,
        }
    }
}

/// A base with material stacked above and/or below, all centered on the
/// widest of the three, with the base's baseline preserved.
#[derive(Debug, Clone)]
pub struct StackAtom {
    /// The base; an absent base stacks around an empty box
    pub base: Option<Box<Atom>>,
    /// Material above
    pub over: StackArgs,
    /// Material below
    pub under: StackArgs,
}

impl StackAtom {
    /// Stacks `over` and `under` around `base`.
    pub fn new(base: Option<Atom>, over: StackArgs, under: StackArgs) -> StackAtom {
        StackAtom {
            base: base.map(Box::new),
            over,
            under,
        }
    }

    /// Limits arrangement of an operator's scripts: both auto-spaced.
    pub(crate) fn limits(
        base: Atom,
        sup: Option<Box<Atom>>,
        sub: Option<Box<Atom>>,
    ) -> StackAtom {
        StackAtom {
            base: Some(Box::new(base)),
            over: StackArgs::auto_space(sup),
            under: StackArgs::auto_space(sub),
        }
    }

    /// Produces the measured box of the stack.
    pub fn layout<'f, F: MathFont>(&self, env: &Env<'f, F>) -> LayoutNode<'f, F> {
        let base = match &self.base {
            Some(base) => base.layout(env),
            None => kern!(horz: Unit::ZERO),
        };

        // an operator glyph leans by its italic correction; splitting it
        // between the stacked elements centers them on the optical center
        let delta = base.is_symbol().map(|g| g.italics).unwrap_or(Unit::ZERO);

        let over = self.over.atom.as_ref().map(|atom| {
            env.with_style(env.style().superscript_variant(), |e| atom.layout(e))
        });
        let under = self.under.atom.as_ref().map(|atom| {
            env.with_style(env.style().subscript_variant(), |e| atom.layout(e))
        });

        if over.is_none() && under.is_none() {
            return base;
        }

        let consts = env.constants();
        let width = base
            .width
            .max(over.as_ref().map(|o| o.width + delta).unwrap_or(Unit::ZERO))
            .max(under.as_ref().map(|u| u.width + delta).unwrap_or(Unit::ZERO));

        let mut height = base.height;
        let mut depth = base.depth;
        let mut vbox = builders::VBox::new();

        if let Some(mut over) = over {
            let gap = if self.over.auto_space {
                consts
                    .upper_limit_gap_min
                    .scaled(env)
                    .max(consts.upper_limit_baseline_rise_min.scaled(env) - over.depth)
            } else {
                Unit::ZERO
            };
            over.shift = (width - over.width).scale(0.5) + delta.scale(0.5);
            height += gap + over.depth + over.height;
            vbox.add_node(over);
            vbox.add_node_with_gap(base_centered(base, width), gap);
        } else {
            vbox.add_node(base_centered(base, width));
        }

        if let Some(mut under) = under {
            let gap = if self.under.auto_space {
                consts
                    .lower_limit_gap_min
                    .scaled(env)
                    .max(consts.lower_limit_baseline_drop_min.scaled(env) - under.height)
            } else {
                Unit::ZERO
            };
            under.shift = (width - under.width).scale(0.5) - delta.scale(0.5);
            depth += gap + under.height + under.depth;
            vbox.add_node_with_gap(under, gap);
        }

        vbox.set_height(height);
        vbox.set_depth(depth);
        vbox.build()
    }
}

fn base_centered<F>(mut base: LayoutNode<F>, width: Unit<Px>) -> LayoutNode<F> {
    base.shift = (width - base.width).scale(0.5);
    base
}
