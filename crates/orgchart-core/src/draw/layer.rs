//! Layer-based rendering system for SVG output.
//!
//! Drawables decide which z-order layer each of their SVG elements belongs
//! to; [`LayeredOutput`] collects them and emits one `<g>` group per layer in
//! bottom-to-top order.
//!
//! # Example
//!
//! ```
//! # use orgchart_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Box, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));
//!
//! // Connectors render first, boxes on top of them
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Chart background and empty-state panels - renders first
    Background,
    /// Stems, sibling bars and drops between positions
    Connector,
    /// Position boxes
    Box,
    /// Titles and names
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Connector => "connector",
            Self::Box => "box",
            Self::Text => "text",
        }
    }
}

/// Represents SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes keep their insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside each layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle};

    use super::*;

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_merge() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Box, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));

        output1.merge(output2);
        assert!(!output1.is_empty());

        let nodes = output1.render();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));

        output1.merge(output2);

        assert_eq!(output1.render().len(), 1);
    }

    #[test]
    fn test_layers_render_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Box, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output
            .render()
            .into_iter()
            .map(|node| node.to_string())
            .collect();

        assert_eq!(rendered.len(), 4);
        assert!(rendered[0].contains(r#"data-layer="background""#));
        assert!(rendered[1].contains(r#"data-layer="connector""#));
        assert!(rendered[2].contains(r#"data-layer="box""#));
        assert!(rendered[3].contains(r#"data-layer="text""#));
    }
}
