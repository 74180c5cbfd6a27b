//! The atom tree: the input to layout.
//!
//! An atom is one node of the parsed math expression. The tree is immutable
//! once built; laying it out walks it top-down, each call producing a
//! measured box bottom-up. The variants form a closed set, each implementing
//! the same layout operation; capability probes ("is this a character
//! leaf?") are explicit accessors instead of open-ended type inspection.

pub mod accent;
pub mod char;
pub mod scripts;
pub mod sideset;
pub mod stack;

pub use self::accent::AccentedAtom;
pub use self::char::CharAtom;
pub use self::scripts::ScriptsAtom;
pub use self::sideset::SideSetsAtom;
pub use self::stack::{StackArgs, StackAtom};

use crate::dimensions::Unit;
use crate::font::MathFont;
use crate::layout::{builders, Env, LayoutNode, LayoutVariant};

/// Classification of an atom for script placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomType {
    /// A plain symbol or group
    Ordinary,
    /// A big operator like ∑ or ∫
    BigOperator,
}

/// How an atom prefers its scripts placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitsType {
    /// Scripts always go above/below the base
    Always,
    /// Scripts always go at the base's corners
    Never,
    /// Above/below in display style, at the corners otherwise
    Normal,
}

/// A node of the math expression tree.
#[derive(Debug, Clone)]
pub enum Atom {
    /// A single character
    Char(CharAtom),
    /// A horizontal sequence of atoms
    Row(RowAtom),
    /// An atom with an accent mark over it
    Accented(AccentedAtom),
    /// A zero-ink placeholder keeping some of its content's metrics
    Phantom(PhantomAtom),
    /// A base with corner scripts
    Scripts(ScriptsAtom),
    /// A big operator with scripts flanking it on both sides
    SideSets(SideSetsAtom),
    /// A base with material stacked above and below
    Stack(StackAtom),
}

impl Atom {
    /// Produces the measured box of this atom under the given context.
    pub fn layout<'f, F: MathFont>(&self, env: &Env<'f, F>) -> LayoutNode<'f, F> {
        match self {
            Atom::Char(chr) => chr.layout(env),
            Atom::Row(row) => row.layout(env),
            Atom::Accented(acc) => acc.layout(env),
            Atom::Phantom(ph) => ph.layout(env),
            Atom::Scripts(scripts) => scripts.layout(env),
            Atom::SideSets(sides) => sides.layout(env),
            Atom::Stack(stack) => stack.layout(env),
        }
    }

    /// Classification used for script placement.
    pub fn atom_type(&self) -> AtomType {
        match self {
            Atom::Char(chr) => chr.atom_type(),
            Atom::SideSets(_) => AtomType::BigOperator,
            _ => AtomType::Ordinary,
        }
    }

    /// The atom's preference for limits placement.
    pub fn limits_type(&self) -> LimitsType {
        match self {
            Atom::Char(chr) => chr.limits_type(),
            _ => LimitsType::Never,
        }
    }

    /// The character leaf this atom consists of, if it is one.
    pub fn char_symbol(&self) -> Option<&CharAtom> {
        match self {
            Atom::Char(chr) => Some(chr),
            _ => None,
        }
    }
}

/// A horizontal sequence of atoms, laid out side by side.
#[derive(Debug, Clone, Default)]
pub struct RowAtom {
    /// Atoms in visual order
    pub children: Vec<Atom>,
}

impl RowAtom {
    /// A row over the given atoms.
    pub fn new(children: Vec<Atom>) -> RowAtom {
        RowAtom { children }
    }

    fn layout<'f, F: MathFont>(&self, env: &Env<'f, F>) -> LayoutNode<'f, F> {
        let mut hbox = builders::HBox::new();
        for child in &self.children {
            hbox.add_node(child.layout(env));
        }
        hbox.build()
    }
}

/// A zero-ink placeholder: takes up the space its content would, with any of
/// the three extents optionally suppressed. Used only for metric placement.
#[derive(Debug, Clone)]
pub struct PhantomAtom {
    /// The atom whose metrics are kept
    pub inner: Box<Atom>,
    keep_width: bool,
    keep_height: bool,
    keep_depth: bool,
}

impl PhantomAtom {
    /// Wraps `inner`, keeping only the extents whose flag is set.
    pub fn new(inner: Atom, keep_width: bool, keep_height: bool, keep_depth: bool) -> PhantomAtom {
        PhantomAtom {
            inner: Box::new(inner),
            keep_width,
            keep_height,
            keep_depth,
        }
    }

    fn layout<'f, F: MathFont>(&self, env: &Env<'f, F>) -> LayoutNode<'f, F> {
        let inner = self.inner.layout(env);
        LayoutNode {
            width: if self.keep_width { inner.width } else { Unit::ZERO },
            height: if self.keep_height { inner.height } else { Unit::ZERO },
            depth: if self.keep_depth { inner.depth } else { Unit::ZERO },
            shift: Unit::ZERO,
            node: LayoutVariant::Kern,
        }
    }
}
