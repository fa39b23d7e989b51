//! Export of laid-out charts.
//!
//! This is the final stage of the pipeline:
//!
//! ```text
//! JSON records
//!     ↓ input
//! Vec<PositionRecord>
//!     ↓ structure
//! Forest
//!     ↓ layout
//! Layout (boxes + connectors)
//!     ↓ export (this module)
//! SVG document ──▶ PNG bytes
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: builds an SVG document from a [`Layout`](crate::layout::Layout).
//! - [`png`]: rasterizes an SVG document behind the [`png::Rasterizer`] seam.
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. It converts into
//! [`OrgChartError::Export`] at the crate boundary.
//!
//! [`OrgChartError::Export`]: crate::OrgChartError::Export

pub mod png;
pub mod svg;

use thiserror::Error;

/// Errors that can occur while exporting a chart.
///
/// Any failure leaves no partial output behind: callers receive either the
/// complete encoded image or this error.
#[derive(Debug, Error)]
pub enum Error {
    /// The SVG document could not be parsed for rasterization.
    #[error("Failed to read SVG for rasterization: {0}")]
    Parse(String),

    /// The raster scale is zero, negative or not finite.
    #[error("Invalid export scale: {0}")]
    InvalidScale(f32),

    /// The target image is too large to allocate.
    #[error("Cannot allocate a {width}x{height} pixel image")]
    Allocation { width: u32, height: u32 },

    /// Encoding the rendered pixels failed.
    #[error("Failed to encode PNG: {0}")]
    Encode(String),
}
