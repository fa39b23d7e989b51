//! Connector lines linking a parent box to its children.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Segment, Size},
};

/// Visual definition for connector lines.
#[derive(Debug, Clone)]
pub struct ConnectorDefinition {
    stroke: StrokeDefinition,
}

impl ConnectorDefinition {
    /// Creates a connector definition with the given line color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            stroke: StrokeDefinition::new(color, width).with_square_cap(),
        }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

impl Default for ConnectorDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 2.0)
    }
}

/// The set of line segments connecting one parent to its children.
///
/// Segments are expressed in layout coordinates; the position passed to
/// [`Drawable::render_to_layers`] is the offset of the layout origin.
#[derive(Debug, Clone)]
pub struct ConnectorLines<'a> {
    definition: &'a ConnectorDefinition,
    segments: Vec<Segment>,
}

impl<'a> ConnectorLines<'a> {
    pub fn new(definition: &'a ConnectorDefinition, segments: Vec<Segment>) -> Self {
        Self {
            definition,
            segments,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl Drawable for ConnectorLines<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        for segment in &self.segments {
            let start = segment.start().add_point(position);
            let end = segment.end().add_point(position);

            let line = svg_element::Line::new()
                .set("x1", start.x())
                .set("y1", start.y())
                .set("x2", end.x())
                .set("y2", end.y());
            let line = crate::apply_stroke!(line, self.definition.stroke);

            output.add_to_layer(RenderLayer::Connector, Box::new(line));
        }

        output
    }

    fn size(&self) -> Size {
        self.segments
            .iter()
            .map(|segment| segment.bounds())
            .reduce(|acc, bounds| acc.merge(&bounds))
            .map(|bounds| bounds.to_size())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn tee() -> Vec<Segment> {
        vec![
            Segment::new(Point::new(106.0, 60.0), Point::new(106.0, 84.0)),
            Segment::new(Point::new(90.0, 84.0), Point::new(122.0, 84.0)),
        ]
    }

    #[test]
    fn test_size_spans_all_segments() {
        let definition = ConnectorDefinition::default();
        let lines = ConnectorLines::new(&definition, tee());

        let size = lines.size();
        assert_approx_eq!(f32, size.width(), 32.0);
        assert_approx_eq!(f32, size.height(), 24.0);
    }

    #[test]
    fn test_empty_connector_has_no_output() {
        let definition = ConnectorDefinition::default();
        let lines = ConnectorLines::new(&definition, Vec::new());

        assert!(lines.size().is_zero());
        assert!(lines.render_to_layers(Point::default()).is_empty());
    }

    #[test]
    fn test_render_translates_by_position() {
        let definition = ConnectorDefinition::new(Color::new("#9ca3af").unwrap(), 2.0);
        let lines = ConnectorLines::new(&definition, tee());
        assert_eq!(lines.segments().len(), 2);

        let rendered: String = lines
            .render_to_layers(Point::new(10.0, 20.0))
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect();

        assert!(rendered.contains(r#"data-layer="connector""#));
        assert!(rendered.contains(r#"x1="116""#));
        assert!(rendered.contains(r#"y1="80""#));
        assert!(rendered.contains(r#"y2="104""#));
        assert!(rendered.contains(r#"stroke-linecap="square""#));
    }
}
