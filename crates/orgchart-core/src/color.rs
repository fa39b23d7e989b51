//! Color handling for organizational charts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are written into SVG attributes as CSS strings
//! and converted to 8-bit RGBA when a raster background has to be filled.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgchart_core::color::Color;
    ///
    /// let accent = Color::new("#2563eb").unwrap();
    /// let white = Color::new("white").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    ///
    /// The value is between 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Converts this color to 8-bit sRGB components in `[r, g, b, a]` order.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgchart_core::color::Color;
    ///
    /// let white = Color::new("#ffffff").unwrap();
    /// assert_eq!(white.to_rgba8(), [255, 255, 255, 255]);
    /// ```
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#3b82f6").is_ok());
        assert!(Color::new("rgb(59, 130, 246)").is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
        assert!(invalid.unwrap_err().contains("not-a-color"));
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_alpha() {
        assert!((Color::new("red").unwrap().alpha() - 1.0).abs() < 0.001);
        assert!(Color::new("transparent").unwrap().alpha().abs() < 0.001);
    }

    #[test]
    fn test_color_to_rgba8() {
        assert_eq!(Color::new("#ff0000").unwrap().to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::new("black").unwrap().to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
