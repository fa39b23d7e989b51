//! Orgchart - organizational charts from flat position records.
//!
//! Decoding, tree building, layout and export for organizational charts. A
//! chart is described by a list of positions, each naming the position it
//! reports to; the library turns that list into a forest, lays the forest out
//! as rows of uniform boxes joined by connector lines, and renders the result
//! to SVG or PNG.

pub mod config;
pub mod export;
pub mod input;
pub mod layout;
pub mod structure;

mod error;

pub use orgchart_core::{color, draw, geometry, record};

pub use error::OrgChartError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{
    png::{Rasterizer, ResvgRasterizer},
    svg::{ChartStyle, SvgRenderer},
};
use layout::{EngineBuilder, Layout};
use record::PositionRecord;
use structure::Forest;

/// Builder for decoding, laying out and rendering charts.
///
/// Each stage is exposed on its own so callers can stop at the forest or the
/// layout, and the `render_*` methods run the whole pipeline.
///
/// # Examples
///
/// ```rust,no_run
/// use orgchart::{ChartBuilder, config::AppConfig};
///
/// let source = r#"[
///     {"id": "1", "name": "Mansoor Ahmad", "title": "CEO"},
///     {"id": "2", "name": "Bashart Gill", "title": "HRO", "parentId": "1"}
/// ]"#;
///
/// let builder = ChartBuilder::new(AppConfig::default());
///
/// // Decode source to position records
/// let records = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render records to SVG or PNG
/// let svg = builder.render_svg(&records)
///     .expect("Failed to render");
/// let png = builder.render_png(&records)
///     .expect("Failed to rasterize");
///
/// // Or use default config
/// let builder = ChartBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode JSON source into validated position records.
    ///
    /// Accepts a JSON array or line-delimited JSON; see [`input::parse_records`].
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Input`] carrying the source text for syntax
    /// errors and records with blank fields.
    pub fn parse(&self, source: &str) -> Result<Vec<PositionRecord>, OrgChartError> {
        info!("Parsing position records");

        let records = input::parse_records(source)
            .map_err(|err| OrgChartError::new_input_error(err, source))?;

        debug!(records_count = records.len(); "Records parsed successfully");
        Ok(records)
    }

    /// Build the reporting-line forest.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Structure`] for duplicate ids and cyclic
    /// reporting lines.
    pub fn build_forest<'a>(
        &self,
        records: &'a [PositionRecord],
    ) -> Result<Forest<'a>, OrgChartError> {
        info!(records_count = records.len(); "Building chart structure");
        let forest = Forest::build(records)?;
        debug!(roots_count = forest.root_count(); "Structure built successfully");
        Ok(forest)
    }

    /// Lay out a forest with the configured box size and spacing.
    ///
    /// With `fit_labels` enabled the box size grows to fit the longest labels.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Config`] for invalid layout values, or for an
    /// invalid style when labels have to be measured.
    pub fn layout<'f, 'a>(&self, forest: &'f Forest<'a>) -> Result<Layout<'f, 'a>, OrgChartError> {
        let layout_config = self.config.layout();
        layout_config.validate().map_err(OrgChartError::Config)?;

        let mut engine_builder = EngineBuilder::from_config(layout_config);
        if layout_config.fit_labels() {
            let style = self.chart_style()?;
            let box_size = layout::fit_box_size(
                forest,
                style.box_definition(false),
                layout_config.box_size(),
            );
            engine_builder = engine_builder.with_box_size(box_size);
        }

        let layout = engine_builder.build(forest);
        info!(boxes_count = layout.boxes().len(); "Layout calculated");
        Ok(layout)
    }

    /// Render records to an SVG string.
    ///
    /// Runs structure building, layout and SVG rendering. No records renders
    /// the empty-state chart.
    ///
    /// # Errors
    ///
    /// Returns `OrgChartError` for structure, configuration or layout errors.
    pub fn render_svg(&self, records: &[PositionRecord]) -> Result<String, OrgChartError> {
        let forest = self.build_forest(records)?;
        let layout = self.layout(&forest)?;

        let renderer = SvgRenderer::new(self.chart_style()?);
        let svg = renderer.render_to_string(&layout);
        trace!(svg; "Rendered SVG");

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render records to PNG bytes with the configured scale and background.
    ///
    /// # Errors
    ///
    /// Returns `OrgChartError` for any [`Self::render_svg`] error, or
    /// [`OrgChartError::Export`] if rasterization fails.
    pub fn render_png(&self, records: &[PositionRecord]) -> Result<Vec<u8>, OrgChartError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(OrgChartError::Config)?;
        let rasterizer = ResvgRasterizer::from_config(self.config.export(), background);
        self.render_with(records, &rasterizer)
    }

    /// Render records with a caller-supplied rasterizer.
    ///
    /// # Errors
    ///
    /// Returns `OrgChartError` for any [`Self::render_svg`] error, or
    /// [`OrgChartError::Export`] if rasterization fails.
    pub fn render_with<R: Rasterizer + ?Sized>(
        &self,
        records: &[PositionRecord],
        rasterizer: &R,
    ) -> Result<Vec<u8>, OrgChartError> {
        let svg = self.render_svg(records)?;

        info!("Rasterizing chart");
        let bytes = rasterizer.rasterize(&svg)?;
        Ok(bytes)
    }

    fn chart_style(&self) -> Result<ChartStyle, OrgChartError> {
        ChartStyle::from_config(self.config.style()).map_err(OrgChartError::Config)
    }
}
