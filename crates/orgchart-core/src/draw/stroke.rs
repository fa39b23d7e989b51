//! Stroke definitions for box borders and connector lines.
//!
//! Use the [`apply_stroke!`](crate::apply_stroke!) macro to apply a
//! [`StrokeDefinition`] to any SVG element:
//!
//! ```
//! use orgchart_core::color::Color;
//! use orgchart_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("#9ca3af").unwrap(), 2.0);
//! let line = svg_element::Line::new()
//!     .set("x1", 0)
//!     .set("y1", 0)
//!     .set("x2", 0)
//!     .set("y2", 24);
//!
//! let line = orgchart_core::apply_stroke!(line, &stroke);
//! ```

use crate::color::Color;

/// A stroke definition for rendering lines and borders.
///
/// Chart strokes are always solid; connectors use square caps so that the
/// sibling bar and the drops meet without a visible notch at the corners.
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    square_cap: bool,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width and butt caps.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            square_cap: false,
        }
    }

    /// Returns a copy of this stroke that renders square line caps.
    pub fn with_square_cap(mut self) -> Self {
        self.square_cap = true;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the SVG `stroke-linecap` value.
    pub fn cap_svg_value(&self) -> &'static str {
        if self.square_cap { "square" } else { "butt" }
    }

    /// Sets the stroke color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the stroke width.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets `stroke`, `stroke-opacity`, `stroke-width` and `stroke-linecap`.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap_svg_value())
    }};
}
