//! Side-set placement: scripts flanking a big operator on both sides,
//! as in `\sideset{_a^b}{_c^d}\prod`.
//!
//! Each side reuses the corner-script placement primitives — the same
//! vertical-shift formulas, the same pairwise gap balancing within a side —
//! parameterized by the matching corners of the base's kern record. The two
//! sides occupy disjoint horizontal regions, so no balancing happens
//! *across* them.

use crate::dimensions::units::Px;
use crate::dimensions::Unit;
use crate::font::{Corner, MathFont, MathKernRecord};
use crate::layout::{builders, Env, LayoutNode, Scaled, PREC};

use super::scripts::{
    balance_scripts, classify, corner_kern, script_stack, subscript_shift, superscript_shift,
};
use super::Atom;

/// A big operator base with optional scripts on its left and right flanks.
/// The operator never takes limits placement here.
#[derive(Debug, Clone)]
pub struct SideSetsAtom {
    /// The operator the scripts flank
    pub base: Box<Atom>,
    /// Script below, left of the base
    pub left_sub: Option<Box<Atom>>,
    /// Script above, left of the base
    pub left_sup: Option<Box<Atom>>,
    /// Script below, right of the base
    pub right_sub: Option<Box<Atom>>,
    /// Script above, right of the base
    pub right_sup: Option<Box<Atom>>,
}

impl SideSetsAtom {
    /// A side-set with no scripts yet.
    pub fn new(base: Atom) -> SideSetsAtom {
        SideSetsAtom {
            base: Box::new(base),
            left_sub: None,
            left_sup: None,
            right_sub: None,
            right_sup: None,
        }
    }

    /// Sets the left-flank scripts.
    pub fn with_left(mut self, sub: Option<Atom>, sup: Option<Atom>) -> SideSetsAtom {
        self.left_sub = sub.map(Box::new);
        self.left_sup = sup.map(Box::new);
        self
    }

    /// Sets the right-flank scripts.
    pub fn with_right(mut self, sub: Option<Atom>, sup: Option<Atom>) -> SideSetsAtom {
        self.right_sub = sub.map(Box::new);
        self.right_sup = sup.map(Box::new);
        self
    }

    /// Produces the measured box of the flanked operator.
    pub fn layout<'f, F: MathFont>(&self, env: &Env<'f, F>) -> LayoutNode<'f, F> {
        let cls = classify(&self.base, env);
        let base_box = self.base.layout(env);
        let kernel_depth = base_box.depth;

        // the italic correction is a right-edge phenomenon; the left flank
        // reads the left corners and no delta
        let left = flank(
            env,
            cls.record,
            Unit::ZERO,
            Corner::TopLeft,
            Corner::BottomLeft,
            self.left_sup.as_deref(),
            self.left_sub.as_deref(),
            kernel_depth,
        );
        let right = flank(
            env,
            cls.record,
            cls.delta,
            Corner::TopRight,
            Corner::BottomRight,
            self.right_sup.as_deref(),
            self.right_sub.as_deref(),
            kernel_depth,
        );

        let mut hbox = builders::HBox::new();
        if let Some((script, kern)) = left {
            hbox.add_node(script);
            if kern.abs() > Unit::new(PREC) {
                hbox.add_node(kern!(horz: kern));
            }
        }
        hbox.add_node(base_box);
        if let Some((script, kern)) = right {
            if cls.is_operator && cls.delta > Unit::new(PREC) {
                hbox.add_node(kern!(horz: -cls.delta));
            }
            if kern.abs() > Unit::new(PREC) {
                hbox.add_node(kern!(horz: kern));
            }
            hbox.add_node(script);
            hbox.add_node(kern!(horz: env.constants().space_after_script.scaled(env)));
        }
        hbox.build()
    }
}

/// Places one flank's scripts. Anchors are those of an operator base: the
/// shifts start from the baseline, with no baseline drops. Returns the
/// shifted script box and the horizontal kern to set it off by.
#[allow(clippy::too_many_arguments)]
fn flank<'f, F: MathFont>(
    env: &Env<'f, F>,
    record: Option<&'f MathKernRecord>,
    delta: Unit<Px>,
    top_corner: Corner,
    bottom_corner: Corner,
    sup: Option<&Atom>,
    sub: Option<&Atom>,
    kernel_depth: Unit<Px>,
) -> Option<(LayoutNode<'f, F>, Unit<Px>)> {
    match (sup, sub) {
        (None, None) => None,

        (None, Some(sub)) => {
            let mut x = env.with_style(env.style().subscript_variant(), |e| sub.layout(e));
            x.shift = subscript_shift(env, &x, Unit::ZERO);
            let kern = corner_kern(record, env, -x.shift, bottom_corner);
            Some((x, kern))
        }

        (Some(sup), None) => {
            let mut x = env.with_style(env.style().superscript_variant(), |e| sup.layout(e));
            let u = superscript_shift(env, &x, Unit::ZERO);
            x.shift = -u;
            let kern = corner_kern(record, env, u, top_corner) + delta;
            Some((x, kern))
        }

        (Some(sup), Some(sub)) => {
            let x = env.with_style(env.style().superscript_variant(), |e| sup.layout(e));
            let y = env.with_style(env.style().subscript_variant(), |e| sub.layout(e));
            let mut u = superscript_shift(env, &x, Unit::ZERO);
            let mut v = env.constants().subscript_shift_down.scaled(env);
            let sigma = balance_scripts(env, &x, &y, &mut u, &mut v, kernel_depth);

            let top_kern = corner_kern(record, env, u, top_corner) + delta;
            let bottom_kern = corner_kern(record, env, -v, bottom_corner);
            let kern = top_kern.min(bottom_kern);

            let stack = script_stack(x, y, top_kern - kern, bottom_kern - kern, sigma, u, v);
            Some((stack, kern))
        }
    }
}
