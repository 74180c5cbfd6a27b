//! Walks a measured box tree and emits drawing primitives onto a `Backend`.
//!
//! The walker accumulates positions from the widths and shifts baked into
//! the boxes; it knows nothing about rasterization. Everything that touches
//! an actual surface — glyph outlines, canvases, windows — lives behind the
//! [`FontBackend`] and [`GraphicsBackend`] traits supplied by the caller.
//!
//! ## Caveat on coordinate systems
//!
//! The top is oriented along -Y: the Y coordinate of a superscript's
//! position is *less* than the Y coordinate of its base. Font files often
//! use the opposite convention, so implementing [`FontBackend`] typically
//! involves flipping the Y axis.

use crate::dimensions::units::Px;
use crate::font::GlyphId;
use crate::layout::{LayoutNode, LayoutVariant};

/// Position of the cursor in surface units.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Cursor {
    /// x-coordinate
    pub x: f64,
    /// y-coordinate (`cursor1.y < cursor2.y` means `cursor1` is above
    /// `cursor2` on the surface)
    pub y: f64,
}

impl Cursor {
    /// Adds `dx` and `dy` to the x- and y-coordinates respectively.
    pub fn translate(self, dx: f64, dy: f64) -> Cursor {
        Cursor {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Moves the cursor by `dx` in the +X direction.
    pub fn right(self, dx: f64) -> Cursor {
        Cursor {
            x: self.x + dx,
            y: self.y,
        }
    }

    /// Moves the cursor by `dy` in the -Y direction.
    pub fn up(self, dy: f64) -> Cursor {
        Cursor {
            x: self.x,
            y: self.y - dy,
        }
    }

    /// Moves the cursor by `dy` in the +Y direction.
    pub fn down(self, dy: f64) -> Cursor {
        Cursor {
            x: self.x,
            y: self.y + dy,
        }
    }
}

/// The type of box enclosed by a debug rectangle (cf. [`Renderer::debug`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    /// glyph
    Glyph,
    /// horizontal box
    HBox,
    /// vertical box
    VBox,
}

/// A backend that can draw glyphs from fonts of type `F`.
pub trait FontBackend<F> {
    /// Draws the glyph `gid` of `font` with its origin at `pos`, at an em
    /// size of `size` surface units.
    fn symbol(&mut self, pos: Cursor, gid: GlyphId, size: f64, font: &F);
}

/// A backend with some support for non-glyph drawing. The only method is
/// optional: [`GraphicsBackend::bbox`] is called in debug mode to outline
/// the boxes of the tree and does nothing by default.
pub trait GraphicsBackend {
    /// Draws a rectangle whose top-left corner is at `_pos`, only in debug
    /// mode. `_role` says what kind of box the rectangle encloses, so
    /// implementations can style them apart.
    fn bbox(&mut self, _pos: Cursor, _width: f64, _height: f64, _role: Role) {}
}

/// The conjunction of the two backend traits; this is what the renderer
/// drives. Blanket-implemented for anything implementing both.
pub trait Backend<F>: FontBackend<F> + GraphicsBackend {}

impl<F, B: FontBackend<F> + GraphicsBackend> Backend<F> for B {}

/// Walks box trees and issues draw calls.
#[derive(Default)]
pub struct Renderer {
    /// When true, additionally calls [`GraphicsBackend::bbox`] around every
    /// glyph, horizontal and vertical box.
    pub debug: bool,
}

impl Renderer {
    /// Creates a new renderer.
    pub fn new() -> Self {
        Renderer { debug: false }
    }

    /// Renders `node` onto `out`, with the node's baseline-left origin at
    /// (0, 0).
    pub fn render<F>(&self, node: &LayoutNode<F>, out: &mut impl Backend<F>) {
        self.render_node(out, Cursor::default(), node);
    }

    /// Renders one node whose baseline-left origin is `pos`.
    fn render_node<F>(&self, out: &mut impl Backend<F>, pos: Cursor, node: &LayoutNode<F>) {
        match node.node {
            LayoutVariant::Glyph(ref glyph) => {
                if self.debug {
                    out.bbox(
                        pos.up(node.height.unitless(Px)),
                        node.width.unitless(Px),
                        (node.height + node.depth).unitless(Px),
                        Role::Glyph,
                    );
                }
                out.symbol(pos, glyph.gid, glyph.size.unitless(Px), glyph.font);
            }

            LayoutVariant::HorizontalBox(ref hbox) => {
                if self.debug {
                    out.bbox(
                        pos.up(node.height.unitless(Px)),
                        node.width.unitless(Px),
                        (node.height + node.depth).unitless(Px),
                        Role::HBox,
                    );
                }
                let mut pos = pos;
                for child in hbox.contents.iter() {
                    // a child's shift displaces it vertically here
                    self.render_node(out, pos.down(child.shift.unitless(Px)), child);
                    pos = pos.right(child.width.unitless(Px));
                }
            }

            LayoutVariant::VerticalBox(ref vbox) => {
                if self.debug {
                    out.bbox(
                        pos.up(node.height.unitless(Px)),
                        node.width.unitless(Px),
                        (node.height + node.depth).unitless(Px),
                        Role::VBox,
                    );
                }
                // walk children downward from the top edge; a child's shift
                // displaces it horizontally here
                let mut pos = pos.up(node.height.unitless(Px));
                for child in vbox.contents.iter() {
                    if let LayoutVariant::Kern = child.node {
                        pos = pos.down((child.height + child.depth).unitless(Px));
                        continue;
                    }
                    let baseline = pos.down(child.height.unitless(Px));
                    self.render_node(out, baseline.right(child.shift.unitless(Px)), child);
                    pos = pos.down((child.height + child.depth).unitless(Px));
                }
            }

            LayoutVariant::Kern => {}
        }
    }
}
