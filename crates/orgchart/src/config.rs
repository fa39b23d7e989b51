//! Configuration types for chart layout, styling and export.
//!
//! Every type implements [`serde::Deserialize`] and every field is optional:
//! a missing section or key falls back to the defaults documented on each
//! getter, which reproduce the classic professional chart (180×60 boxes, a
//! blue highlighted root, grey connectors on a white background).
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the three sections.
//! - [`LayoutConfig`] - Box size, spacing and label fitting.
//! - [`StyleConfig`] - Colors, font family and the padding around the chart.
//! - [`ExportConfig`] - Raster scale and default output file name.
//!
//! # Example
//!
//! ```
//! # use orgchart::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.export().file_name(), "organizational-chart.png");
//! assert!(config.style().root_fill_color().is_ok());
//! ```

use serde::Deserialize;

use orgchart_core::{color::Color, geometry::Size};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, export: ExportConfig) -> Self {
        Self {
            layout,
            style,
            export,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Box size and spacing used by the layout engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    box_width: f32,
    box_height: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    fit_labels: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: 180.0,
            box_height: 60.0,
            horizontal_spacing: 32.0,
            vertical_spacing: 48.0,
            fit_labels: false,
        }
    }
}

impl LayoutConfig {
    /// Returns a copy with `fit_labels` set (builder style).
    pub fn with_fit_labels(mut self, fit_labels: bool) -> Self {
        self.fit_labels = fit_labels;
        self
    }

    /// Size of every box. Defaults to 180×60.
    pub fn box_size(&self) -> Size {
        Size::new(self.box_width, self.box_height)
    }

    /// Gap between sibling subtrees. Defaults to 32.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Gap between rows. Defaults to 48.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Whether boxes grow to fit the longest labels. Defaults to `false`.
    ///
    /// When enabled, [`Self::box_size`] is a minimum.
    pub fn fit_labels(&self) -> bool {
        self.fit_labels
    }

    /// Checks that the box is non-empty and no spacing is negative.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending key.
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            ("box_width", self.box_width, self.box_width > 0.0),
            ("box_height", self.box_height, self.box_height > 0.0),
            (
                "horizontal_spacing",
                self.horizontal_spacing,
                self.horizontal_spacing >= 0.0,
            ),
            (
                "vertical_spacing",
                self.vertical_spacing,
                self.vertical_spacing >= 0.0,
            ),
        ];

        match checks.into_iter().find(|(_, _, valid)| !valid) {
            Some((key, value, _)) => Err(format!("Invalid layout.{key} in config: {value}")),
            None => Ok(()),
        }
    }
}

/// Colors and typography.
///
/// Colors are stored as CSS color strings and parsed on access so that a bad
/// value is reported with the key it came from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    box_fill_color: String,
    box_line_color: String,
    root_fill_color: String,
    root_text_color: String,
    connector_color: String,
    title_color: String,
    name_color: String,
    font_family: String,
    padding: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            box_fill_color: "white".to_string(),
            box_line_color: "#d1d5db".to_string(),
            root_fill_color: "#3b82f6".to_string(),
            root_text_color: "white".to_string(),
            connector_color: "#9ca3af".to_string(),
            title_color: "#2563eb".to_string(),
            name_color: "#1f2937".to_string(),
            font_family: "Arial".to_string(),
            padding: 32.0,
        }
    }
}

impl StyleConfig {
    fn parse_color(key: &str, value: &str) -> Result<Color, String> {
        Color::new(value).map_err(|err| format!("Invalid style.{key} in config: {err}"))
    }

    /// Chart background. Defaults to `#ffffff`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn background_color(&self) -> Result<Color, String> {
        Self::parse_color("background_color", &self.background_color)
    }

    /// Fill of regular boxes. Defaults to `white`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn box_fill_color(&self) -> Result<Color, String> {
        Self::parse_color("box_fill_color", &self.box_fill_color)
    }

    /// Border of every box. Defaults to `#d1d5db`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn box_line_color(&self) -> Result<Color, String> {
        Self::parse_color("box_line_color", &self.box_line_color)
    }

    /// Fill of root boxes. Defaults to `#3b82f6`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn root_fill_color(&self) -> Result<Color, String> {
        Self::parse_color("root_fill_color", &self.root_fill_color)
    }

    /// Title and name color inside root boxes. Defaults to `white`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn root_text_color(&self) -> Result<Color, String> {
        Self::parse_color("root_text_color", &self.root_text_color)
    }

    /// Connector lines. Defaults to `#9ca3af`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn connector_color(&self) -> Result<Color, String> {
        Self::parse_color("connector_color", &self.connector_color)
    }

    /// Title text in regular boxes. Defaults to `#2563eb`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn title_color(&self) -> Result<Color, String> {
        Self::parse_color("title_color", &self.title_color)
    }

    /// Name text in regular boxes. Defaults to `#1f2937`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn name_color(&self) -> Result<Color, String> {
        Self::parse_color("name_color", &self.name_color)
    }

    /// Font family for all labels. Defaults to `Arial`.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Space between the chart content and the image edge. Defaults to 32.
    pub fn padding(&self) -> f32 {
        self.padding
    }
}

/// Raster export settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    scale: f32,
    file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            file_name: "organizational-chart.png".to_string(),
        }
    }
}

impl ExportConfig {
    /// Pixels per layout unit in PNG output. Defaults to 4.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Output file name used when none is given. Defaults to
    /// `organizational-chart.png`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.layout().box_size(), Size::new(180.0, 60.0));
        assert_approx_eq!(f32, config.layout().horizontal_spacing(), 32.0);
        assert_approx_eq!(f32, config.layout().vertical_spacing(), 48.0);
        assert!(!config.layout().fit_labels());
        assert!(config.layout().validate().is_ok());

        assert_eq!(
            config.style().background_color().unwrap().to_rgba8(),
            [255, 255, 255, 255]
        );
        assert_eq!(
            config.style().root_fill_color().unwrap().to_rgba8(),
            [0x3b, 0x82, 0xf6, 255]
        );
        assert_eq!(config.style().font_family(), "Arial");
        assert_approx_eq!(f32, config.style().padding(), 32.0);

        assert_approx_eq!(f32, config.export().scale(), 4.0);
        assert_eq!(config.export().file_name(), "organizational-chart.png");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"layout": {"box_width": 220.0}, "style": {"connector_color": "black"}}"#,
        )
        .unwrap();

        assert_eq!(config.layout().box_size(), Size::new(220.0, 60.0));
        assert_approx_eq!(f32, config.layout().vertical_spacing(), 48.0);
        assert_eq!(
            config.style().connector_color().unwrap().to_rgba8(),
            [0, 0, 0, 255]
        );
        assert_eq!(
            config.style().title_color().unwrap().to_rgba8(),
            [0x25, 0x63, 0xeb, 255]
        );
        assert_eq!(config.export().file_name(), "organizational-chart.png");
    }

    #[test]
    fn test_invalid_color_names_key() {
        let config: AppConfig =
            serde_json::from_str(r#"{"style": {"root_fill_color": "bluish"}}"#).unwrap();

        let err = config.style().root_fill_color().unwrap_err();
        assert!(err.starts_with("Invalid style.root_fill_color in config"), "{err}");
    }

    #[test]
    fn test_invalid_layout_values() {
        let config: AppConfig =
            serde_json::from_str(r#"{"layout": {"box_height": 0.0}}"#).unwrap();
        let err = config.layout().validate().unwrap_err();
        assert!(err.contains("layout.box_height"), "{err}");

        let config: AppConfig =
            serde_json::from_str(r#"{"layout": {"vertical_spacing": -1.0}}"#).unwrap();
        let err = config.layout().validate().unwrap_err();
        assert!(err.contains("layout.vertical_spacing"), "{err}");
    }
}
