//! The box drawn for a single position: a rounded rectangle with the
//! position title stacked above the holder's name.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, FontWeight, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Insets, Point, Size},
};

/// Visual definition shared by every box of one kind (root or regular).
#[derive(Debug, Clone)]
pub struct PositionBoxDefinition {
    fill_color: Color,
    stroke: StrokeDefinition,
    corner_radius: f32,
    padding: Insets,
    line_gap: f32,
    title: TextDefinition,
    name: TextDefinition,
}

impl PositionBoxDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = stroke;
    }

    /// Mutable access to the title text style.
    pub fn title_mut(&mut self) -> &mut TextDefinition {
        &mut self.title
    }

    /// Mutable access to the name text style.
    pub fn name_mut(&mut self) -> &mut TextDefinition {
        &mut self.name
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn title(&self) -> &TextDefinition {
        &self.title
    }

    pub fn name(&self) -> &TextDefinition {
        &self.name
    }
}

impl Default for PositionBoxDefinition {
    fn default() -> Self {
        let mut title = TextDefinition::new();
        title.set_font_weight(FontWeight::Semibold);

        let mut name = TextDefinition::new();
        name.set_font_size(11);

        Self {
            fill_color: Color::new("white").expect("'white' is a valid CSS color"),
            stroke: StrokeDefinition::default(),
            corner_radius: 8.0,
            padding: Insets::uniform(8.0),
            line_gap: 4.0,
            title,
            name,
        }
    }
}

/// A box for one position, sized by the layout engine.
#[derive(Debug, Clone)]
pub struct PositionBox<'a> {
    definition: &'a PositionBoxDefinition,
    title: Text<'a>,
    name: Text<'a>,
    size: Size,
}

impl<'a> PositionBox<'a> {
    /// Creates a box of the given outer size.
    pub fn new(definition: &'a PositionBoxDefinition, title: &'a str, name: &'a str, size: Size) -> Self {
        Self {
            definition,
            title: Text::new(&definition.title, title),
            name: Text::new(&definition.name, name),
            size,
        }
    }

    /// Measured size of the stacked title and name, without padding.
    pub fn content_size(&self) -> Size {
        let gap = Size::new(0.0, self.definition.line_gap);
        self.title
            .calculate_size()
            .merge_vertical(gap)
            .merge_vertical(self.name.calculate_size())
    }

    /// Smallest outer size that fits the labels, never below `minimum`.
    pub fn fitted_size(&self, minimum: Size) -> Size {
        self.content_size()
            .add_padding(self.definition.padding)
            .max(minimum)
    }

    /// Center positions of the title and name lines for a box centered at `center`.
    fn label_centers(&self, center: Point) -> (Point, Point) {
        let title_height = self.title.calculate_size().height();
        let name_height = self.name.calculate_size().height();
        let top = center.y() - self.content_size().height() / 2.0;

        let title_center = center.with_y(top + title_height / 2.0);
        let name_center =
            center.with_y(top + title_height + self.definition.line_gap + name_height / 2.0);
        (title_center, name_center)
    }
}

impl Drawable for PositionBox<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = position.to_bounds(self.size);
        let fill = self.definition.fill_color;

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("rx", self.definition.corner_radius)
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha());
        let rect = crate::apply_stroke!(rect, self.definition.stroke);
        output.add_to_layer(RenderLayer::Box, Box::new(rect));

        let (title_center, name_center) = self.label_centers(position);
        output.merge(self.title.render_to_layers(title_center));
        output.merge(self.name.render_to_layers(name_center));

        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_fitted_size_respects_minimum() {
        let definition = PositionBoxDefinition::new();
        let position_box = PositionBox::new(&definition, "CEO", "A", Size::default());

        let fitted = position_box.fitted_size(Size::new(180.0, 60.0));
        assert!(fitted.width() >= 180.0);
        assert!(fitted.height() >= 60.0);
    }

    #[test]
    fn test_fitted_size_grows_for_long_labels() {
        let definition = PositionBoxDefinition::new();
        let title = "Head of Clinical Laboratory Quality Assurance and Regulatory Affairs";
        let position_box = PositionBox::new(&definition, title, "Dr Mudasar Hussain", Size::default());

        let fitted = position_box.fitted_size(Size::new(10.0, 10.0));
        let content = position_box.content_size();
        assert_approx_eq!(f32, fitted.width(), content.width() + 16.0, epsilon = 0.01);
        assert!(fitted.width() > 10.0);
    }

    #[test]
    fn test_title_renders_above_name() {
        let definition = PositionBoxDefinition::new();
        let position_box = PositionBox::new(&definition, "HRO", "Bashart Gill", Size::new(180.0, 60.0));

        let (title_center, name_center) = position_box.label_centers(Point::new(90.0, 30.0));
        assert!(title_center.y() < name_center.y());
        assert_approx_eq!(f32, title_center.x(), 90.0);
        assert_approx_eq!(f32, name_center.x(), 90.0);
    }

    #[test]
    fn test_render_to_layers_emits_box_and_text() {
        let definition = PositionBoxDefinition::new();
        let position_box = PositionBox::new(&definition, "HRO", "Bashart Gill", Size::new(180.0, 60.0));
        assert_eq!(position_box.size(), Size::new(180.0, 60.0));

        let rendered: Vec<String> = position_box
            .render_to_layers(Point::new(90.0, 30.0))
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect();

        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].contains(r#"data-layer="box""#));
        assert!(rendered[0].contains(r#"x="0""#));
        assert!(rendered[0].contains(r#"width="180""#));
        assert!(rendered[1].contains("HRO"));
        assert!(rendered[1].contains("Bashart Gill"));
    }
}
