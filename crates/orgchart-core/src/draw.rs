//! Drawable Components for Chart Rendering
//!
//! This module provides drawable abstractions for the visual elements of an
//! organizational chart. All drawable components implement the [`Drawable`]
//! trait, which provides a consistent interface for rendering to layered SVG
//! output and calculating size.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically
//! ordered during final SVG generation so connectors always sit beneath boxes
//! and labels always sit on top.

mod connector;
mod layer;
mod position_box;
mod positioned;
mod stroke;
mod text;

pub use connector::{ConnectorDefinition, ConnectorLines};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use position_box::{PositionBox, PositionBoxDefinition};
pub use positioned::PositionedDrawable;
pub use stroke::StrokeDefinition;
pub use text::{FontWeight, Text, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for drawable chart elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// # Arguments
    ///
    /// * `position` - The center position where this drawable should be rendered
    ///
    /// # Returns
    ///
    /// A [`LayeredOutput`] containing the SVG nodes organized by layer.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
