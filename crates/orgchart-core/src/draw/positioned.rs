//! Provides `PositionedDrawable`, a wrapper for a Drawable and its absolute position.

use crate::{
    draw::{Drawable, LayeredOutput},
    geometry::{Bounds, Point, Size},
};

/// A drawable object together with an absolute center position.
#[derive(Debug, Clone)]
pub struct PositionedDrawable<D: Drawable> {
    drawable: D,
    position: Point,
}

impl<D: Drawable> PositionedDrawable<D> {
    /// Construct a new `PositionedDrawable` from a drawable (position defaults to zero).
    pub fn new(drawable: D) -> Self {
        Self {
            drawable,
            position: Point::default(),
        }
    }

    /// Set the position for this drawable (builder style).
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Render this positioned drawable to layers, using the inner drawable's implementation.
    pub fn render_to_layers(&self) -> LayeredOutput {
        self.drawable.render_to_layers(self.position)
    }

    /// Calculate the bounds of this positioned drawable.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.drawable.size())
    }

    /// Get a reference to the inner drawable
    pub fn inner(&self) -> &D {
        &self.drawable
    }

    /// Get the position of this drawable
    pub fn position(&self) -> Point {
        self.position
    }
}

impl<D: Drawable> Drawable for PositionedDrawable<D> {
    fn render_to_layers(&self, _position: Point) -> LayeredOutput {
        // The stored position wins over the one passed in
        self.render_to_layers()
    }

    fn size(&self) -> Size {
        self.drawable.size()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::{PositionBox, PositionBoxDefinition};

    #[test]
    fn test_positioned_drawable_new_default_position() {
        let definition = PositionBoxDefinition::new();
        let position_box = PositionBox::new(&definition, "CEO", "A", Size::new(180.0, 60.0));

        let positioned = PositionedDrawable::new(position_box);

        assert_approx_eq!(f32, positioned.position().x(), 0.0);
        assert_approx_eq!(f32, positioned.position().y(), 0.0);
    }

    #[test]
    fn test_positioned_drawable_bounds() {
        let definition = PositionBoxDefinition::new();
        let position_box = PositionBox::new(&definition, "CEO", "A", Size::new(180.0, 60.0));

        let positioned = PositionedDrawable::new(position_box).with_position(Point::new(122.0, 30.0));

        let bounds = positioned.bounds();
        assert_approx_eq!(f32, bounds.min_x(), 32.0);
        assert_approx_eq!(f32, bounds.min_y(), 0.0);
        assert_approx_eq!(f32, bounds.max_x(), 212.0);
        assert_eq!(positioned.size(), positioned.inner().size());
    }
}
