//! Resolved drawing definitions for a chart.

use orgchart_core::{
    color::Color,
    draw::{ConnectorDefinition, FontWeight, PositionBoxDefinition, StrokeDefinition, TextDefinition},
};

use crate::config::StyleConfig;

const CONNECTOR_WIDTH: f32 = 2.0;
const BOX_LINE_WIDTH: f32 = 1.0;
const EMPTY_STATE_FONT_SIZE: u16 = 14;

/// Every definition the SVG renderer needs, parsed once from a [`StyleConfig`].
#[derive(Debug, Clone)]
pub struct ChartStyle {
    background: Color,
    regular_box: PositionBoxDefinition,
    root_box: PositionBoxDefinition,
    connector: ConnectorDefinition,
    empty_state: TextDefinition,
    padding: f32,
}

impl ChartStyle {
    /// Parses the colors in `style` and builds the box, connector and text
    /// definitions.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first color key that fails to parse.
    pub fn from_config(style: &StyleConfig) -> Result<Self, String> {
        let line_color = style.box_line_color()?;

        let mut regular_box = PositionBoxDefinition::new();
        regular_box.set_fill_color(style.box_fill_color()?);
        regular_box.set_stroke(StrokeDefinition::new(line_color, BOX_LINE_WIDTH));
        Self::set_labels(
            &mut regular_box,
            style.font_family(),
            style.title_color()?,
            style.name_color()?,
        );

        let root_fill = style.root_fill_color()?;
        let root_text = style.root_text_color()?;
        let mut root_box = PositionBoxDefinition::new();
        root_box.set_fill_color(root_fill);
        root_box.set_stroke(StrokeDefinition::new(root_fill, BOX_LINE_WIDTH));
        Self::set_labels(&mut root_box, style.font_family(), root_text, root_text);

        let mut empty_state = TextDefinition::new();
        empty_state.set_font_family(style.font_family());
        empty_state.set_font_size(EMPTY_STATE_FONT_SIZE);
        empty_state.set_color(Some(style.name_color()?));

        Ok(Self {
            background: style.background_color()?,
            regular_box,
            root_box,
            connector: ConnectorDefinition::new(style.connector_color()?, CONNECTOR_WIDTH),
            empty_state,
            padding: style.padding().max(0.0),
        })
    }

    fn set_labels(definition: &mut PositionBoxDefinition, font_family: &str, title: Color, name: Color) {
        let title_text = definition.title_mut();
        title_text.set_font_family(font_family);
        title_text.set_font_weight(FontWeight::Semibold);
        title_text.set_color(Some(title));

        let name_text = definition.name_mut();
        name_text.set_font_family(font_family);
        name_text.set_color(Some(name));
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Returns the definition for a box, highlighted when it is a root.
    pub fn box_definition(&self, is_root: bool) -> &PositionBoxDefinition {
        if is_root {
            &self.root_box
        } else {
            &self.regular_box
        }
    }

    pub fn connector(&self) -> &ConnectorDefinition {
        &self.connector
    }

    pub fn empty_state(&self) -> &TextDefinition {
        &self.empty_state
    }

    /// Space around the chart content.
    pub fn padding(&self) -> f32 {
        self.padding
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
            .unwrap_or_else(|err| unreachable!("default style colors are valid: {err}"))
    }
}
