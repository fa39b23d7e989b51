//! Rasterization of rendered charts.
//!
//! [`Rasterizer`] is the "rendered region to image bytes" seam. The chart
//! pipeline only ever hands it a finished SVG document and gets back encoded
//! image bytes or an [`Error`]; nothing is written until the whole image has
//! been encoded.

use log::{debug, info};

use orgchart_core::color::Color;

use super::Error;
use crate::config::ExportConfig;

/// Turns a rendered SVG document into encoded image bytes.
pub trait Rasterizer {
    /// Rasterizes `svg`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the document cannot be read, the image cannot be
    /// allocated, or encoding fails.
    fn rasterize(&self, svg: &str) -> Result<Vec<u8>, Error>;
}

/// PNG rasterizer backed by resvg.
///
/// Renders at `scale` pixels per layout unit over an opaque background fill.
#[derive(Debug, Clone)]
pub struct ResvgRasterizer {
    scale: f32,
    background: Color,
}

impl ResvgRasterizer {
    /// Creates a rasterizer with an explicit scale and background.
    pub fn new(scale: f32, background: Color) -> Self {
        Self { scale, background }
    }

    /// Creates a rasterizer with the configured scale and `background`.
    pub fn from_config(config: &ExportConfig, background: Color) -> Self {
        Self::new(config.scale(), background)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn render_pixmap(&self, svg: &str) -> Result<tiny_skia::Pixmap, Error> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidScale(self.scale));
        }

        let mut opt = usvg::Options::default();
        opt.fontdb_mut().load_system_fonts();

        let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| Error::Parse(err.to_string()))?;

        let size = tree.size();
        let width = (size.width() * self.scale).ceil().max(1.0) as u32;
        let height = (size.height() * self.scale).ceil().max(1.0) as u32;
        debug!(width, height, scale = self.scale; "Allocating pixmap");

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(Error::Allocation { width, height })?;

        let [r, g, b, a] = self.background.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(self.scale, self.scale),
            &mut pixmap.as_mut(),
        );

        Ok(pixmap)
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new(ExportConfig::default().scale(), Color::new("#ffffff").unwrap_or_default())
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str) -> Result<Vec<u8>, Error> {
        let pixmap = self.render_pixmap(svg)?;
        let png = pixmap
            .encode_png()
            .map_err(|err| Error::Encode(err.to_string()))?;

        info!(
            width = pixmap.width(),
            height = pixmap.height(),
            bytes = png.len();
            "PNG rasterized",
        );
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="5" viewBox="0 0 10 5"><rect x="0" y="0" width="5" height="5" fill="#3b82f6"/></svg>"##;

    /// Reads width and height from the IHDR chunk.
    fn png_dimensions(png: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (width, height)
    }

    #[test]
    fn test_default_scale_is_four() {
        let png = ResvgRasterizer::default().rasterize(SQUARE).unwrap();

        assert_eq!(png[..8], PNG_SIGNATURE);
        assert_eq!(png_dimensions(&png), (40, 20));
    }

    #[test]
    fn test_custom_scale() {
        let rasterizer = ResvgRasterizer::new(1.5, Color::new("white").unwrap());
        let png = rasterizer.rasterize(SQUARE).unwrap();

        assert_eq!(png_dimensions(&png), (15, 8));
    }

    #[test]
    fn test_invalid_scale() {
        let rasterizer = ResvgRasterizer::new(0.0, Color::default());
        assert!(matches!(
            rasterizer.rasterize(SQUARE),
            Err(Error::InvalidScale(_))
        ));
    }

    #[test]
    fn test_unparsable_svg() {
        let err = ResvgRasterizer::default().rasterize("<not-svg").unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "{err:?}");
    }
}
