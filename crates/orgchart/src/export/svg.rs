//! SVG rendering of a [`Layout`].
//!
//! Every box and connector renders into a shared [`LayeredOutput`], which
//! orders the elements into `background`, `connector`, `box` and `text`
//! groups. The document's `viewBox` is the layout bounds grown by the style
//! padding, so the chart keeps its layout coordinates.

mod style;

pub use style::ChartStyle;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use orgchart_core::{
    draw::{
        ConnectorLines, Drawable, LayeredOutput, PositionBox, PositionedDrawable, RenderLayer,
        Text,
    },
    geometry::{Bounds, Insets, Point},
};

use crate::layout::{Connector, Layout, LayoutBox};

/// Message shown in place of a chart with no positions.
pub const EMPTY_STATE_MESSAGE: &str = "No positions in the organizational chart";

/// Renders layouts to SVG documents with one [`ChartStyle`].
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    style: ChartStyle,
}

impl SvgRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Renders `layout` to a complete SVG document.
    ///
    /// An empty layout renders the empty-state message instead of boxes.
    pub fn render(&self, layout: &Layout<'_, '_>) -> Document {
        let mut output = LayeredOutput::new();

        let content_bounds = if layout.is_empty() {
            info!("Rendering empty-state chart");
            self.render_empty_state(&mut output)
        } else {
            for connector in layout.connectors() {
                output.merge(self.render_connector(connector));
            }
            for layout_box in layout.boxes() {
                output.merge(self.render_box(layout_box));
            }
            layout.bounds()
        };

        let view = content_bounds.add_padding(Insets::uniform(self.style.padding()));
        debug!(
            min_x = view.min_x(),
            min_y = view.min_y(),
            width = view.width(),
            height = view.height();
            "SVG view box",
        );

        output.add_to_layer(RenderLayer::Background, Box::new(self.background(view)));

        output.render().into_iter().fold(
            Document::new()
                .set("xmlns", "http://www.w3.org/2000/svg")
                .set(
                    "viewBox",
                    format!(
                        "{} {} {} {}",
                        view.min_x(),
                        view.min_y(),
                        view.width(),
                        view.height()
                    ),
                )
                .set("width", view.width())
                .set("height", view.height()),
            |document, node| document.add(node),
        )
    }

    /// Renders `layout` to an SVG string.
    pub fn render_to_string(&self, layout: &Layout<'_, '_>) -> String {
        self.render(layout).to_string()
    }

    fn render_box(&self, layout_box: &LayoutBox<'_, '_>) -> LayeredOutput {
        let node = layout_box.node();
        let definition = self.style.box_definition(node.parent().is_none());

        PositionedDrawable::new(PositionBox::new(
            definition,
            node.title(),
            node.name(),
            layout_box.size(),
        ))
        .with_position(layout_box.center())
        .render_to_layers()
    }

    fn render_connector(&self, connector: &Connector) -> LayeredOutput {
        ConnectorLines::new(self.style.connector(), connector.segments().collect())
            .render_to_layers(Point::default())
    }

    /// Adds the empty-state message and returns the bounds it occupies.
    fn render_empty_state(&self, output: &mut LayeredOutput) -> Bounds {
        let text = Text::new(self.style.empty_state(), EMPTY_STATE_MESSAGE);
        let bounds = Bounds::new_from_top_left(Point::default(), text.size());

        output.merge(text.render_to_layers(bounds.center()));
        bounds
    }

    fn background(&self, view: Bounds) -> svg_element::Rectangle {
        let color = self.style.background();
        svg_element::Rectangle::new()
            .set("x", view.min_x())
            .set("y", view.min_y())
            .set("width", view.width())
            .set("height", view.height())
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha())
    }
}
