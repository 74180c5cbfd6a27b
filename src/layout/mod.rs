//! Measured box nodes and the style lattice.
//!
//! Layout turns atoms into a tree of boxes following the TeX model: a box
//! knows its width, its height (extent above the baseline), its depth
//! (extent below the baseline) and a shift relative to the parent's
//! baseline. Horizontal boxes place children side by side; vertical boxes
//! place them on top of each other with explicit gaps; kern boxes are
//! zero-content spacers realizing kerning and spacing corrections. Once
//! built, a box's geometry is never mutated in place: corrections are
//! always expressed by inserting kerns next to it.

#[macro_use]
pub mod builders;
pub mod env;

pub use env::{Env, Scaled};

use crate::dimensions::units::Px;
use crate::dimensions::Unit;
use crate::font::GlyphId;
use std::fmt;
use std::ops::Deref;

/// Geometric tolerance under which a correction kern is not worth a node.
pub(crate) const PREC: f64 = 1e-7;

/// A sub-part of the box tree: can contain other nodes and may be contained
/// in other nodes.
pub struct LayoutNode<'f, F> {
    /// Type of node
    pub node: LayoutVariant<'f, F>,
    /// Width
    pub width: Unit<Px>,
    /// Height: distance from the baseline to the top of the node
    pub height: Unit<Px>,
    /// Depth: distance from the baseline to the bottom of the node
    pub depth: Unit<Px>,
    /// Displacement relative to the parent baseline. Within a horizontal
    /// box the shift is vertical, positive moving the child downward;
    /// within a vertical box it is horizontal, positive moving the child
    /// rightward.
    pub shift: Unit<Px>,
}

impl<'f, F> Clone for LayoutNode<'f, F> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            width: self.width,
            height: self.height,
            depth: self.depth,
            shift: self.shift,
        }
    }
}

/// Different types of box nodes
pub enum LayoutVariant<'f, F> {
    /// A horizontal box: children laid out side by side
    HorizontalBox(HorizontalBox<'f, F>),
    /// A vertical box: children stacked onto each other
    VerticalBox(VerticalBox<'f, F>),
    /// A symbol (aka glyph) from a font
    Glyph(LayoutGlyph<'f, F>),
    /// Zero-content spacing, possibly negative
    Kern,
}

impl<'f, F> Clone for LayoutVariant<'f, F> {
    fn clone(&self) -> Self {
        match self {
            LayoutVariant::HorizontalBox(hbox) => LayoutVariant::HorizontalBox(hbox.clone()),
            LayoutVariant::VerticalBox(vbox) => LayoutVariant::VerticalBox(vbox.clone()),
            LayoutVariant::Glyph(glyph) => LayoutVariant::Glyph(*glyph),
            LayoutVariant::Kern => LayoutVariant::Kern,
        }
    }
}

/// A horizontal box: children are placed side by side. The width is the sum
/// of the children's widths; height and depth are the envelope over the
/// children's vertically shifted extents.
pub struct HorizontalBox<'f, F> {
    /// Children nodes
    pub contents: Vec<LayoutNode<'f, F>>,
}

impl<'f, F> Clone for HorizontalBox<'f, F> {
    fn clone(&self) -> Self {
        Self { contents: self.contents.clone() }
    }
}

impl<'f, F> Default for HorizontalBox<'f, F> {
    fn default() -> Self {
        Self { contents: Vec::default() }
    }
}

/// A vertical box: children are stacked top to bottom, separated by the
/// vertical kerns interleaved with them. Which child's baseline becomes the
/// box's baseline is up to the builder: height and depth are assigned
/// explicitly by whoever stacks the children.
pub struct VerticalBox<'f, F> {
    /// Children nodes, vertical kerns included
    pub contents: Vec<LayoutNode<'f, F>>,
}

impl<'f, F> Clone for VerticalBox<'f, F> {
    fn clone(&self) -> Self {
        Self { contents: self.contents.clone() }
    }
}

impl<'f, F> Default for VerticalBox<'f, F> {
    fn default() -> Self {
        Self { contents: Vec::default() }
    }
}

/// Glyph: this node has no children; simply specifies a glyph to draw.
pub struct LayoutGlyph<'f, F> {
    /// Glyph id
    pub gid: GlyphId,
    /// Em size the glyph is drawn at, in surface units
    pub size: Unit<Px>,
    /// Italic correction, in surface units
    pub italics: Unit<Px>,
    /// Accent attachment position, in surface units
    pub attachment: Unit<Px>,
    /// Font to render the glyph with
    pub font: &'f F,
}

impl<'f, F> Clone for LayoutGlyph<'f, F> {
    fn clone(&self) -> Self { *self }
}
impl<'f, F> Copy for LayoutGlyph<'f, F> {}

impl<'f, F> LayoutNode<'f, F> {
    /// The glyph this node consists of, if it wraps exactly one.
    pub fn is_symbol(&self) -> Option<LayoutGlyph<'f, F>> {
        match self.node {
            LayoutVariant::Glyph(gly) => Some(gly),
            LayoutVariant::HorizontalBox(ref hb) => is_symbol(&hb.contents),
            LayoutVariant::VerticalBox(ref vb) => is_symbol(&vb.contents),
            LayoutVariant::Kern => None,
        }
    }
}

/// Determines if a set of nodes is a singleton set containing a symbol node.
pub fn is_symbol<'a, 'b: 'a, F>(contents: &'a [LayoutNode<'b, F>]) -> Option<LayoutGlyph<'b, F>> {
    if contents.len() != 1 {
        return None;
    }
    contents[0].is_symbol()
}

impl<'f, F> Deref for HorizontalBox<'f, F> {
    type Target = [LayoutNode<'f, F>];
    fn deref(&self) -> &Self::Target {
        &self.contents
    }
}

impl<'f, F> Deref for VerticalBox<'f, F> {
    type Target = [LayoutNode<'f, F>];
    fn deref(&self) -> &Self::Target {
        &self.contents
    }
}

impl<'f, F> fmt::Debug for HorizontalBox<'f, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HorizontalBox({:?})", self.contents)
    }
}

impl<'f, F> fmt::Debug for VerticalBox<'f, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "VerticalBox({:?})", self.contents)
    }
}

impl<'f, F> fmt::Debug for LayoutGlyph<'f, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LayoutGlyph({})", u16::from(self.gid))
    }
}

impl<'f, F> fmt::Debug for LayoutNode<'f, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.node {
            LayoutVariant::HorizontalBox(ref hb) => write!(f, "HBox({:?})", hb.contents),
            LayoutVariant::VerticalBox(ref vb) => write!(f, "VBox({:?})", vb.contents),
            LayoutVariant::Glyph(ref gly) => write!(f, "Glyph({:?})", gly),
            LayoutVariant::Kern => {
                let kern = if self.width.is_zero() {
                    self.height
                } else {
                    self.width
                };
                write!(f, "Kern({:.1})", kern)
            }
        }
    }
}

/// Display styles which are used in scaling glyphs. The associated methods
/// are taken from pg. 441 of the TeXBook.
#[derive(Serialize, Deserialize)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Style {
    /// script of a script, cramped
    ScriptScriptCramped,
    /// script of a script
    ScriptScript,
    /// first-level script, cramped
    ScriptCramped,
    /// first-level script
    Script,
    /// running text, cramped
    TextCramped,
    /// running text
    Text,
    /// displayed formula, cramped
    DisplayCramped,
    /// displayed formula
    Display,
}

impl Default for Style {
    fn default() -> Style {
        Style::Display
    }
}

impl Style {
    /// Same level, forced cramped. Cramped styles suppress some upward
    /// growth, as beneath radicals or inside scripts of scripts.
    pub fn cramped(self) -> Style {
        match self {
            Style::ScriptScriptCramped |
            Style::ScriptScript => Style::ScriptScriptCramped,
            Style::ScriptCramped | Style::Script => Style::ScriptCramped,
            Style::TextCramped | Style::Text => Style::TextCramped,
            Style::DisplayCramped | Style::Display => Style::DisplayCramped,
        }
    }

    /// One level smaller; cramped iff the enclosing style is cramped.
    pub fn superscript_variant(self) -> Style {
        match self {
            Style::Display | Style::Text => Style::Script,
            Style::DisplayCramped | Style::TextCramped => Style::ScriptCramped,
            Style::Script | Style::ScriptScript => Style::ScriptScript,
            Style::ScriptCramped |
            Style::ScriptScriptCramped => Style::ScriptScriptCramped,
        }
    }

    /// One level smaller, always cramped.
    pub fn subscript_variant(self) -> Style {
        match self {
            Style::Display | Style::Text | Style::DisplayCramped | Style::TextCramped => {
                Style::ScriptCramped
            }
            Style::Script |
            Style::ScriptScript |
            Style::ScriptCramped |
            Style::ScriptScriptCramped => Style::ScriptScriptCramped,
        }
    }

    /// Whether this is one of the cramped variants.
    pub fn is_cramped(&self) -> bool {
        match *self {
            Style::Display | Style::Text | Style::Script | Style::ScriptScript => false,
            _ => true,
        }
    }

    /// Whether this is the display level (cramped or not).
    pub fn is_display(&self) -> bool {
        *self > Style::Text
    }
}
