//! Positioned chart geometry.
//!
//! A [`Layout`] is the output of the layout engine: one [`LayoutBox`] per
//! forest node and one [`Connector`] per node that has children. Coordinates
//! are absolute, with the origin at the top-left corner of the leftmost root
//! slot. `y` grows downwards.
//!
//! The layout borrows the [`Forest`] it was computed from and is discarded
//! after rendering; nothing is cached between passes.

mod engine;

pub use engine::{EngineBuilder, compute_layout, fit_box_size};

use orgchart_core::geometry::{Bounds, Point, Segment, Size};

use crate::structure::{Forest, NodeIndex, TreeNode};

/// The box assigned to one node.
#[derive(Debug, Clone, Copy)]
pub struct LayoutBox<'f, 'a> {
    node: TreeNode<'f, 'a>,
    bounds: Bounds,
}

impl<'f, 'a> LayoutBox<'f, 'a> {
    /// Returns the forest node this box belongs to.
    pub fn node(&self) -> TreeNode<'f, 'a> {
        self.node
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Top-left corner of the box.
    pub fn position(&self) -> Point {
        self.bounds.min_point()
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn size(&self) -> Size {
        self.bounds.to_size()
    }
}

/// Lines linking a parent box to its children.
///
/// The stem runs down from the parent's bottom-center. With a single child a
/// single drop continues straight to the child's top-center and there is no
/// bar. With several children a horizontal bar at the stem's end spans the
/// first to the last child's center line, and one drop runs from the bar to
/// each child.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    parent: NodeIndex,
    stem: Segment,
    bar: Option<Segment>,
    drops: Vec<Segment>,
}

impl Connector {
    /// Returns the index of the parent node.
    pub fn parent(&self) -> NodeIndex {
        self.parent
    }

    pub fn stem(&self) -> Segment {
        self.stem
    }

    /// Returns the horizontal bar, present only for more than one child.
    pub fn bar(&self) -> Option<Segment> {
        self.bar
    }

    /// Returns one drop per child, in child order.
    pub fn drops(&self) -> &[Segment] {
        &self.drops
    }

    /// Iterates over every segment: stem, bar (if any), then drops.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        std::iter::once(self.stem)
            .chain(self.bar)
            .chain(self.drops.iter().copied())
    }
}

/// Box positions and connector geometry for a whole forest.
#[derive(Debug)]
pub struct Layout<'f, 'a> {
    forest: &'f Forest<'a>,
    box_size: Size,
    boxes: Vec<LayoutBox<'f, 'a>>,
    /// Position in `boxes` of every node, indexed by [`NodeIndex`].
    slots: Vec<usize>,
    connectors: Vec<Connector>,
}

impl<'f, 'a> Layout<'f, 'a> {
    /// Returns every box in forest pre-order.
    pub fn boxes(&self) -> &[LayoutBox<'f, 'a>] {
        &self.boxes
    }

    /// Returns one connector per node with children, in pre-order of the parents.
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Looks up the box of the node with the given id.
    pub fn box_for(&self, id: &str) -> Option<&LayoutBox<'f, 'a>> {
        let node = self.forest.get(id)?;
        self.box_at(node.index())
    }

    /// Looks up the box of the node at `index`.
    pub fn box_at(&self, index: NodeIndex) -> Option<&LayoutBox<'f, 'a>> {
        self.slots
            .get(index.index())
            .and_then(|&slot| self.boxes.get(slot))
    }

    /// The size shared by every box.
    pub fn box_size(&self) -> Size {
        self.box_size
    }

    /// Returns the forest this layout was computed from.
    pub fn forest(&self) -> &'f Forest<'a> {
        self.forest
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Smallest rectangle containing every box.
    ///
    /// Connectors never extend past their boxes, so they are not included.
    /// An empty layout has default (zero) bounds.
    pub fn bounds(&self) -> Bounds {
        self.boxes
            .iter()
            .map(LayoutBox::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    /// Width and height of [`Self::bounds`].
    pub fn size(&self) -> Size {
        self.bounds().to_size()
    }
}
