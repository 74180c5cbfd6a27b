//! Builders composing measured nodes into horizontal and vertical boxes.
//!
//! The horizontal builder derives the box geometry from its children: width
//! is the running sum, height and depth the envelope over the children's
//! shifted extents. The vertical builder is explicit instead: the stacking
//! algorithms already know where the baseline belongs, so they assign the
//! box's height and depth themselves and separate children with explicit
//! gaps.

use super::{HorizontalBox, LayoutNode, LayoutVariant, VerticalBox};
use crate::dimensions::units::Px;
use crate::dimensions::Unit;

/// Zero-content spacer node realizing a horizontal or vertical correction.
macro_rules! kern {
    (horz: $width:expr) => (
        $crate::layout::LayoutNode {
            width: $width,
            height: $crate::dimensions::Unit::ZERO,
            depth: $crate::dimensions::Unit::ZERO,
            shift: $crate::dimensions::Unit::ZERO,
            node: $crate::layout::LayoutVariant::Kern,
        }
    );

    (vert: $height:expr) => (
        $crate::layout::LayoutNode {
            width: $crate::dimensions::Unit::ZERO,
            height: $height,
            depth: $crate::dimensions::Unit::ZERO,
            shift: $crate::dimensions::Unit::ZERO,
            node: $crate::layout::LayoutVariant::Kern,
        }
    );
}

macro_rules! hbox {
    ( $($node:expr),* $(,)? ) => ({
        let mut _hbox = $crate::layout::builders::HBox::new();
        $( _hbox.add_node($node); )*
        _hbox.build()
    });
}

/// Builder for horizontal boxes.
pub struct HBox<'f, F> {
    /// Sum of the children's widths
    pub width: Unit<Px>,
    /// Envelope over `child.height - child.shift`
    pub height: Unit<Px>,
    /// Envelope over `child.depth + child.shift`
    pub depth: Unit<Px>,
    node: HorizontalBox<'f, F>,
}

impl<'f, F> Default for HBox<'f, F> {
    fn default() -> Self {
        Self {
            width: Unit::ZERO,
            height: Unit::ZERO,
            depth: Unit::ZERO,
            node: HorizontalBox::default(),
        }
    }
}

impl<'f, F> HBox<'f, F> {
    pub fn new() -> HBox<'f, F> {
        HBox::default()
    }

    /// Append node at the end (i.e. the right) of the box.
    pub fn add_node(&mut self, node: LayoutNode<'f, F>) {
        self.width += node.width;
        self.height = self.height.max(node.height - node.shift);
        self.depth = self.depth.max(node.depth + node.shift);
        self.node.contents.push(node);
    }

    pub fn build(self) -> LayoutNode<'f, F> {
        LayoutNode {
            width: self.width,
            height: self.height,
            depth: self.depth,
            shift: Unit::ZERO,
            node: LayoutVariant::HorizontalBox(self.node),
        }
    }
}

/// Builder for vertical boxes. Children are stacked top to bottom; by
/// default the baseline of the bottom child becomes the box's baseline, and
/// [`VBox::set_height`]/[`VBox::set_depth`] override that when the stacking
/// algorithm has computed its own extents.
pub struct VBox<'f, F> {
    /// Envelope over `child.width + child.shift`
    pub width: Unit<Px>,
    total: Unit<Px>,
    last_depth: Unit<Px>,
    height: Option<Unit<Px>>,
    depth: Option<Unit<Px>>,
    node: VerticalBox<'f, F>,
}

impl<'f, F> Default for VBox<'f, F> {
    fn default() -> Self {
        Self {
            width: Unit::ZERO,
            total: Unit::ZERO,
            last_depth: Unit::ZERO,
            height: None,
            depth: None,
            node: VerticalBox::default(),
        }
    }
}

impl<'f, F> VBox<'f, F> {
    pub fn new() -> VBox<'f, F> {
        VBox::default()
    }

    /// Append node below the current contents.
    pub fn add_node(&mut self, node: LayoutNode<'f, F>) {
        self.width = self.width.max(node.width + node.shift);
        self.total += node.height + node.depth;
        self.last_depth = node.depth;
        self.node.contents.push(node);
    }

    /// Append node below the current contents, separated by a vertical gap
    /// (which may be negative to overlap).
    pub fn add_node_with_gap(&mut self, node: LayoutNode<'f, F>, gap: Unit<Px>) {
        if !gap.is_zero() {
            self.total += gap;
            self.node.contents.push(kern!(vert: gap));
        }
        self.add_node(node);
    }

    /// Assign the extent above the baseline, overriding the default.
    pub fn set_height(&mut self, height: Unit<Px>) {
        self.height = Some(height);
    }

    /// Assign the extent below the baseline, overriding the default.
    pub fn set_depth(&mut self, depth: Unit<Px>) {
        self.depth = Some(depth);
    }

    pub fn build(self) -> LayoutNode<'f, F> {
        let depth = self.depth.unwrap_or(self.last_depth);
        let height = self.height.unwrap_or(self.total - self.last_depth);
        LayoutNode {
            width: self.width,
            height,
            depth,
            shift: Unit::ZERO,
            node: LayoutVariant::VerticalBox(self.node),
        }
    }
}
