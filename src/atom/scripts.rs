//! Corner-script placement: a base with a superscript and/or subscript.
//!
//! This follows the OpenType MATH conventions: the scripts' vertical shifts
//! start from style-dependent minima, text bases additionally anchor the
//! scripts by baseline drops from their own extents, the pair of scripts is
//! pulled apart until the minimum gap between them is honored, and the
//! corner kern tables of the base glyph nudge both scripts horizontally.
//! See also <https://www.tug.org/tugboat/tb30-1/tb94vieth.pdf>.

use crate::dimensions::units::Px;
use crate::dimensions::Unit;
use crate::font::{Corner, MathFont, MathKernRecord};
use crate::layout::{builders, Env, LayoutNode, Scaled, PREC};

use super::{Atom, AtomType, CharAtom, LimitsType, PhantomAtom, StackAtom};
use crate::font::FontStyle;

/// A base atom (possibly absent) with optional corner scripts.
#[derive(Debug, Clone, Default)]
pub struct ScriptsAtom {
    /// The base the scripts attach to; an absent base anchors the scripts
    /// against an invisible capital-letter placeholder
    pub base: Option<Box<Atom>>,
    /// Subscript
    pub sub: Option<Box<Atom>>,
    /// Superscript
    pub sup: Option<Box<Atom>>,
}

/// What script placement needs to know about the base: its kern record and
/// italic correction when it is a single glyph, and whether that glyph is a
/// text glyph or a big operator.
#[derive(Default)]
pub(crate) struct ScriptBase<'f> {
    pub record: Option<&'f MathKernRecord>,
    pub delta: Unit<Px>,
    pub is_text: bool,
    pub is_operator: bool,
}

/// Width/height/depth of a laid-out box, kept after the box itself moves on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Extents {
    pub width: Unit<Px>,
    pub height: Unit<Px>,
    pub depth: Unit<Px>,
}

impl Extents {
    pub(crate) fn of<F>(node: &LayoutNode<F>) -> Extents {
        Extents {
            width: node.width,
            height: node.height,
            depth: node.depth,
        }
    }
}

/// Inspects an atom for the character-leaf capability and classifies it.
pub(crate) fn classify<'f, F: MathFont>(atom: &Atom, env: &Env<'f, F>) -> ScriptBase<'f> {
    let mut cls = ScriptBase::default();
    if let Some(cs) = atom.char_symbol() {
        let chr = cs.resolve(env);
        cls.record = chr.kern_record();
        if !cs.is_text() {
            cls.delta = chr.italics().scaled(env);
        }
        cls.is_text = atom.atom_type() != AtomType::BigOperator;
        cls.is_operator = atom.atom_type() == AtomType::BigOperator;
    }
    cls
}

/// Kern value of the given corner at the given vertical offset; absent
/// records kern to zero.
pub(crate) fn corner_kern<F: MathFont>(
    record: Option<&MathKernRecord>,
    env: &Env<F>,
    height: Unit<Px>,
    corner: Corner,
) -> Unit<Px> {
    match record {
        Some(record) => record
            .corner(corner)
            .kern_at(env.to_design(height))
            .scaled(env),
        None => Unit::ZERO,
    }
}

/// Upward shift of a superscript: at least the style's shift-up, at least
/// high enough to keep the script's bottom above the minimum, and no lower
/// than the base-derived anchor `u`.
pub(crate) fn superscript_shift<F: MathFont>(
    env: &Env<F>,
    sup: &LayoutNode<F>,
    u: Unit<Px>,
) -> Unit<Px> {
    let consts = env.constants();
    let shift_up = if env.is_cramped() {
        consts.superscript_shift_up_cramped
    } else {
        consts.superscript_shift_up
    };
    u.max(shift_up.scaled(env))
        .max(sup.depth + consts.superscript_bottom_min.scaled(env))
}

/// Downward shift of a lone subscript: at least the style's shift-down, low
/// enough to keep the script's top under the maximum, and no higher than
/// the base-derived anchor `v`.
pub(crate) fn subscript_shift<F: MathFont>(
    env: &Env<F>,
    sub: &LayoutNode<F>,
    v: Unit<Px>,
) -> Unit<Px> {
    let consts = env.constants();
    v.max(consts.subscript_shift_down.scaled(env))
        .max(sub.height - consts.subscript_top_max.scaled(env))
}

/// With both scripts present, pulls them apart until the gap between the
/// superscript's bottom and the subscript's top reaches the minimum,
/// preferring to move the subscript down but giving part of the move back
/// to the superscript when its bottom would exceed the with-subscript
/// maximum and the subscript can afford it. Returns the realized gap.
pub(crate) fn balance_scripts<F: MathFont>(
    env: &Env<F>,
    sup: &LayoutNode<F>,
    sub: &LayoutNode<F>,
    u: &mut Unit<Px>,
    v: &mut Unit<Px>,
    kernel_depth: Unit<Px>,
) -> Unit<Px> {
    let consts = env.constants();
    let theta = consts.sub_superscript_gap_min.scaled(env);
    let mut sigma = (*u - sup.depth) - (sub.height - *v);
    if sigma < theta {
        *v = theta + sub.height + sup.depth - *u;
        let psi = consts.superscript_bottom_max_with_subscript.scaled(env) - (*u - sup.depth);
        if psi > Unit::ZERO && *v - psi + sub.depth <= kernel_depth {
            *u += psi;
            *v -= psi;
        }
        sigma = theta;
    }
    sigma
}

/// Stacks a superscript over a subscript, `sigma` apart, with the box's
/// baseline `u` under the superscript's and `v` above the subscript's.
/// The horizontal shifts align both scripts to their corner kerns.
pub(crate) fn script_stack<'f, F>(
    mut sup: LayoutNode<'f, F>,
    mut sub: LayoutNode<'f, F>,
    sup_shift: Unit<Px>,
    sub_shift: Unit<Px>,
    sigma: Unit<Px>,
    u: Unit<Px>,
    v: Unit<Px>,
) -> LayoutNode<'f, F> {
    let height = sup.height + u;
    let depth = sub.depth + v;
    sup.shift = sup_shift;
    sub.shift = sub_shift;
    let mut vbox = builders::VBox::new();
    vbox.add_node(sup);
    vbox.add_node_with_gap(sub, sigma);
    vbox.set_height(height);
    vbox.set_depth(depth);
    vbox.build()
}

impl ScriptsAtom {
    /// Attaches the given scripts to `base`.
    pub fn new(base: Option<Atom>, sub: Option<Atom>, sup: Option<Atom>) -> ScriptsAtom {
        ScriptsAtom {
            base: base.map(Box::new),
            sub: sub.map(Box::new),
            sup: sup.map(Box::new),
        }
    }

    /// Produces the measured box of the scripted base.
    pub fn layout<'f, F: MathFont>(&self, env: &Env<'f, F>) -> LayoutNode<'f, F> {
        // if no base was given, place the scripts around an invisible
        // capital so they still receive consistent vertical anchors
        let placeholder;
        let base = match self.base.as_deref() {
            Some(base) => base,
            None => {
                placeholder = Atom::Phantom(PhantomAtom::new(
                    Atom::Char(CharAtom::text('M', FontStyle::RM)),
                    false,
                    true,
                    true,
                ));
                &placeholder
            }
        };

        // no scripts
        if self.sub.is_none() && self.sup.is_none() {
            return base.layout(env);
        }

        // display as limits
        if base.limits_type() == LimitsType::Always
            || (base.limits_type() == LimitsType::Normal && env.style().is_display())
        {
            return StackAtom::limits(base.clone(), self.sup.clone(), self.sub.clone())
                .layout(env);
        }

        let consts = env.constants();

        // the kernel is measured against, the base is painted; they differ
        // only for accented bases, where scripts anchor on the bare accentee
        let (kernel, base_box, cls) = match base {
            Atom::Accented(acc) => {
                let (cls, accentee) = env.with_style(env.style().cramped(), |cramp| {
                    (classify(&acc.base, cramp), acc.base.layout(cramp))
                });
                (Extents::of(&accentee), base.layout(env), cls)
            }
            _ => {
                let cls = classify(base, env);
                let base_box = base.layout(env);
                (Extents::of(&base_box), base_box, cls)
            }
        };

        // baseline-drop anchors apply to text glyphs only; operators and
        // non-glyph kernels start from the baseline
        let mut u = Unit::ZERO;
        let mut v = Unit::ZERO;
        if cls.is_text {
            u = kernel.height - consts.superscript_baseline_drop_max.scaled(env);
            v = kernel.depth + consts.subscript_baseline_drop_min.scaled(env);
        }

        let op_delta = if cls.is_operator { cls.delta } else { Unit::ZERO };

        // case 1. only subscript
        if self.sup.is_none() {
            let sub = self.sub.as_ref().unwrap();
            let mut x = env.with_style(env.style().subscript_variant(), |e| sub.layout(e));
            x.shift = subscript_shift(env, &x, v);
            let kern = corner_kern(cls.record, env, -x.shift, Corner::BottomRight);
            return compose(env, base_box, kernel.width, op_delta, x, kern);
        }

        let sup = self.sup.as_ref().unwrap();
        let mut x = env.with_style(env.style().superscript_variant(), |e| sup.layout(e));
        let mut u = superscript_shift(env, &x, u);

        // case 2. only superscript
        if self.sub.is_none() {
            x.shift = -u;
            let kern = corner_kern(cls.record, env, u, Corner::TopRight) + cls.delta;
            return compose(env, base_box, kernel.width, op_delta, x, kern);
        }

        // case 3. both super- & subscript
        let sub = self.sub.as_ref().unwrap();
        let y = env.with_style(env.style().subscript_variant(), |e| sub.layout(e));
        let mut v = v.max(consts.subscript_shift_down.scaled(env));
        let sigma = balance_scripts(env, &x, &y, &mut u, &mut v, kernel.depth);

        let top_kern = corner_kern(cls.record, env, u, Corner::TopRight) + cls.delta;
        let bottom_kern = corner_kern(cls.record, env, -v, Corner::BottomRight);
        let kern = top_kern.min(bottom_kern);

        let stack = script_stack(x, y, top_kern - kern, bottom_kern - kern, sigma, u, v);
        compose(env, base_box, kernel.width, op_delta, stack, kern)
    }
}

/// Paints the base, then the scripted box corrected back to the kernel's
/// right edge, then the trailing script space. A big operator's italic
/// correction pulls the scripted box left to the operator's optical center.
fn compose<'f, F: MathFont>(
    env: &Env<'f, F>,
    base: LayoutNode<'f, F>,
    kernel_width: Unit<Px>,
    op_delta: Unit<Px>,
    script: LayoutNode<'f, F>,
    kern: Unit<Px>,
) -> LayoutNode<'f, F> {
    let correction = kernel_width - base.width + kern;
    let mut hbox = builders::HBox::new();
    hbox.add_node(base);
    if op_delta > Unit::new(PREC) {
        hbox.add_node(kern!(horz: -op_delta));
    }
    if correction.abs() > Unit::new(PREC) {
        hbox.add_node(kern!(horz: correction));
    }
    hbox.add_node(script);
    hbox.add_node(kern!(horz: env.constants().space_after_script.scaled(env)));
    hbox.build()
}
