//! The tree layout engine.
//!
//! Layout runs in two explicit-stack passes over the forest's pre-order:
//!
//! 1. In reverse pre-order every node's subtree width is computed. A leaf is
//!    one box wide; an internal node is as wide as its children's subtrees
//!    plus the gaps between them, and never narrower than its own box.
//! 2. In pre-order every node is given the left edge of its slot. Roots are
//!    placed left to right with a shared cursor. A parent's children form a
//!    block that is centered inside the parent's slot, and each box is
//!    centered inside its own slot.
//!
//! Rows are fixed: a node at depth `d` has its top edge at
//! `d * (box_height + vertical_spacing)`.

use log::{debug, info, trace};

use orgchart_core::{
    draw::{PositionBox, PositionBoxDefinition},
    geometry::{Bounds, Point, Segment, Size},
};

use super::{Connector, Layout, LayoutBox};
use crate::{
    config::LayoutConfig,
    structure::{Forest, TreeNode},
};

/// Builder for the layout engine.
///
/// Starts from the [`LayoutConfig`] defaults: 180×60 boxes, 32 units between
/// sibling subtrees and 48 units between rows.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    box_size: Size,
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the box size and spacing from `config`.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            box_size: config.box_size(),
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
        }
    }

    /// Set the size used for every box
    pub fn with_box_size(mut self, size: Size) -> Self {
        self.box_size = size;
        self
    }

    /// Set the gap between adjacent sibling subtrees (and between root subtrees)
    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing.max(0.0);
        self
    }

    /// Set the gap between a parent's bottom edge and its children's top edge
    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing.max(0.0);
        self
    }

    pub fn box_size(&self) -> Size {
        self.box_size
    }

    /// Lays out `forest`.
    ///
    /// Identical forests always produce identical layouts.
    pub fn build<'f, 'a>(&self, forest: &'f Forest<'a>) -> Layout<'f, 'a> {
        info!(
            nodes_count = forest.len(),
            roots_count = forest.root_count();
            "Computing layout",
        );

        let preorder: Vec<TreeNode<'f, 'a>> = forest.iter_preorder().collect();
        let widths = self.subtree_widths(forest, &preorder);
        let slot_lefts = self.slot_lefts(forest, &preorder, &widths);

        let mut slots = vec![0; forest.len()];
        let boxes: Vec<LayoutBox<'f, 'a>> = preorder
            .iter()
            .enumerate()
            .map(|(slot, &node)| {
                let index = node.index().index();
                slots[index] = slot;
                LayoutBox {
                    node,
                    bounds: self.box_bounds(node, slot_lefts[index], widths[index]),
                }
            })
            .collect();

        let connectors: Vec<Connector> = preorder
            .iter()
            .filter(|node| !node.is_leaf())
            .map(|node| self.connector(*node, &boxes, &slots))
            .collect();

        let layout = Layout {
            forest,
            box_size: self.box_size,
            boxes,
            slots,
            connectors,
        };

        debug!(
            boxes_count = layout.boxes.len(),
            connectors_count = layout.connectors.len(),
            width = layout.size().width(),
            height = layout.size().height();
            "Layout computed",
        );
        trace!(layout:?; "Computed layout");

        layout
    }

    /// Width of the slot a node's subtree occupies, indexed by node index.
    fn subtree_widths(&self, forest: &Forest<'_>, preorder: &[TreeNode<'_, '_>]) -> Vec<f32> {
        let mut widths = vec![0.0; forest.len()];

        // Children always follow their parent in pre-order
        for node in preorder.iter().rev() {
            let children_width = self.children_block_width(*node, &widths);
            widths[node.index().index()] = children_width.max(self.box_size.width());
        }

        widths
    }

    /// Width of a node's children laid side by side with their gaps.
    ///
    /// Zero for a leaf.
    fn children_block_width(&self, node: TreeNode<'_, '_>, widths: &[f32]) -> f32 {
        let count = node.child_count();
        if count == 0 {
            return 0.0;
        }

        let sum: f32 = node
            .children()
            .map(|child| widths[child.index().index()])
            .sum();
        sum + (count - 1) as f32 * self.horizontal_spacing
    }

    /// Left edge of every node's slot, indexed by node index.
    fn slot_lefts(
        &self,
        forest: &Forest<'_>,
        preorder: &[TreeNode<'_, '_>],
        widths: &[f32],
    ) -> Vec<f32> {
        let mut lefts = vec![0.0; forest.len()];

        let mut cursor = 0.0;
        for root in forest.roots() {
            let index = root.index().index();
            lefts[index] = cursor;
            cursor += widths[index] + self.horizontal_spacing;
        }

        // A parent's slot is always assigned before its children are visited
        for node in preorder {
            let index = node.index().index();
            let block_width = self.children_block_width(*node, widths);
            let mut child_left = lefts[index] + (widths[index] - block_width) / 2.0;

            for child in node.children() {
                let child_index = child.index().index();
                lefts[child_index] = child_left;
                child_left += widths[child_index] + self.horizontal_spacing;
            }
        }

        lefts
    }

    fn box_bounds(&self, node: TreeNode<'_, '_>, slot_left: f32, slot_width: f32) -> Bounds {
        let row_height = self.box_size.height() + self.vertical_spacing;
        let top_left = Point::new(
            slot_left + (slot_width - self.box_size.width()) / 2.0,
            node.depth() as f32 * row_height,
        );
        Bounds::new_from_top_left(top_left, self.box_size)
    }

    fn connector(
        &self,
        parent: TreeNode<'_, '_>,
        boxes: &[LayoutBox<'_, '_>],
        slots: &[usize],
    ) -> Connector {
        let box_of = |node: TreeNode<'_, '_>| boxes[slots[node.index().index()]].bounds;

        let stem_start = box_of(parent).bottom_center();
        let stem_end = stem_start.with_y(stem_start.y() + self.vertical_spacing / 2.0);
        let stem = Segment::new(stem_start, stem_end);

        let child_tops: Vec<Point> = parent
            .children()
            .map(|child| box_of(child).top_center())
            .collect();

        let bar = match child_tops.as_slice() {
            [first, .., last] => Some(Segment::new(
                Point::new(first.x(), stem_end.y()),
                Point::new(last.x(), stem_end.y()),
            )),
            _ => None,
        };

        let drops = child_tops
            .iter()
            .map(|&top| Segment::new(top.with_y(stem_end.y()), top))
            .collect();

        Connector {
            parent: parent.index(),
            stem,
            bar,
            drops,
        }
    }
}

/// Lays out `forest` with the default box size and spacing.
///
/// Shorthand for `EngineBuilder::default().build(forest)`.
pub fn compute_layout<'f, 'a>(forest: &'f Forest<'a>) -> Layout<'f, 'a> {
    EngineBuilder::default().build(forest)
}

/// Returns the box size that fits every node's labels.
///
/// The result is the larger of `minimum` and the biggest measured title and
/// name block plus the definition's padding. One size is returned for the
/// whole forest so boxes stay uniform.
pub fn fit_box_size(
    forest: &Forest<'_>,
    definition: &PositionBoxDefinition,
    minimum: Size,
) -> Size {
    let size = forest
        .iter_preorder()
        .map(|node| PositionBox::new(definition, node.title(), node.name(), minimum))
        .fold(minimum, |size, position_box| {
            size.max(position_box.fitted_size(minimum))
        });

    debug!(width = size.width(), height = size.height(); "Fitted box size");
    size
}
