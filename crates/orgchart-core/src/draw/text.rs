//! Text definitions for position titles and names.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A measurable, renderable label combining content with a [`TextDefinition`]
//!
//! Text is measured with real font metrics through `cosmic-text`, which is
//! what allows charts to size their boxes to fit the longest label.
//!
//! ```
//! # use orgchart_core::draw::{FontWeight, Text, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_size(12);
//! style.set_font_weight(FontWeight::Semibold);
//!
//! let text = Text::new(&style, "Lab Manager");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Font weight used for a label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Semibold,
}

impl FontWeight {
    /// Returns the numeric CSS weight.
    pub fn value(self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Semibold => 600,
        }
    }
}

/// Defines the visual style for chart labels.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `12` |
/// | Font weight | [`FontWeight::Normal`] |
/// | Text color | `None` (SVG default, typically black) |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    font_weight: FontWeight,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the font weight for the text.
    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = weight;
    }

    /// Sets the text color. `None` leaves the SVG default in place.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 12,
            font_weight: FontWeight::Normal,
            color: None,
        }
    }
}

/// A renderable label combining content with styling.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    /// Creates a new text element with the given definition and content.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Calculate the size required to display this text.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .add(SvgText::new(self.content));

        if self.definition.font_weight() != FontWeight::Normal {
            rendered_text = rendered_text.set("font-weight", self.definition.font_weight().value());
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// TextManager handles text measurement and font operations
/// It maintains a reusable FontSystem instance to avoid expensive recreation
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Calculate the rendered size of text in pixels using cosmic-text.
    ///
    /// Falls back to an average-glyph estimate when shaping produces no runs
    /// (for example when no system fonts are installed).
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(Weight(text_def.font_weight().value()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        } else {
            max_width = text.chars().count() as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
