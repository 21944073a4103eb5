//! Upset plot style: physical layout constants, colors and font sizes.
//!
//! Defaults reproduce the classic upset layout. With the `config` feature the
//! style can be loaded from YAML; missing keys fall back to defaults.
//!
//! ```yaml
//! dpi: 144
//! bar_color: "#336699"
//! highlight_marker_pt: 12
//! ```

use crate::color::Rgba;
#[cfg(feature = "config")]
use crate::error::{Error, Result};
#[cfg(feature = "config")]
use std::path::Path;

/// Layout and appearance settings for an upset plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct UpsetStyle {
    /// Height of one category row, in inches.
    pub row_height_in: f32,
    /// Width of one group column, in inches.
    pub column_width_in: f32,
    /// Height of the intersection bar chart, in inches.
    pub bar_chart_height_in: f32,
    /// Pixels per inch for raster and SVG output.
    pub dpi: f32,
    /// Figure background.
    pub background: Rgba,
    /// Fill of the intersection-size bars.
    pub bar_color: Rgba,
    /// Fill of the category-total bars.
    pub category_bar_color: Rgba,
    /// Edge drawn around highlighted bars.
    pub highlight_edge: Rgba,
    /// Bar thickness in data units (1.0 = touching bars).
    pub bar_width: f32,
    /// Background dot for a category absent from a group.
    pub inactive_dot: Rgba,
    /// Dot and connector for a category present in a group.
    pub active_dot: Rgba,
    /// Stripe shading behind every other category label.
    pub label_stripe: Rgba,
    /// Stripe shading behind every other dot-matrix row.
    pub matrix_stripe: Rgba,
    /// Dot diameter, in points.
    pub marker_pt: f32,
    /// Highlight dot diameter, in points.
    pub highlight_marker_pt: f32,
    /// Connector line width, in points.
    pub connector_pt: f32,
    /// Title font size, in points.
    pub title_font_pt: f32,
    /// Font size for labels and ticks, in points.
    pub label_font_pt: f32,
    /// Upper bound on intervals along the intersection-size axis.
    pub max_y_ticks: usize,
    /// Text color.
    pub text_color: Rgba,
}

impl Default for UpsetStyle {
    fn default() -> Self {
        Self {
            row_height_in: 0.4,
            column_width_in: 0.5,
            bar_chart_height_in: 3.0,
            dpi: 100.0,
            background: Rgba::WHITE,
            bar_color: Rgba::gray(0.4),
            category_bar_color: Rgba::gray(0.5),
            highlight_edge: Rgba::gray(0.4),
            bar_width: 0.8,
            inactive_dot: Rgba::gray(0.9),
            active_dot: Rgba::BLACK,
            label_stripe: Rgba::gray(0.97),
            matrix_stripe: Rgba::gray(0.96),
            marker_pt: 15.0,
            highlight_marker_pt: 13.0,
            connector_pt: 3.0,
            title_font_pt: 11.0,
            label_font_pt: 10.0,
            max_y_ticks: 4,
            text_color: Rgba::BLACK,
        }
    }
}

impl UpsetStyle {
    /// Default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output resolution.
    #[must_use]
    pub fn dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the intersection bar fill.
    #[must_use]
    pub fn bar_color(mut self, color: Rgba) -> Self {
        self.bar_color = color;
        self
    }

    /// Set the category-total bar fill.
    #[must_use]
    pub fn category_bar_color(mut self, color: Rgba) -> Self {
        self.category_bar_color = color;
        self
    }

    /// Set the active dot/connector color.
    #[must_use]
    pub fn active_dot(mut self, color: Rgba) -> Self {
        self.active_dot = color;
        self
    }

    /// Set row height and column width, in inches.
    #[must_use]
    pub fn cell_size(mut self, row_height_in: f32, column_width_in: f32) -> Self {
        self.row_height_in = row_height_in;
        self.column_width_in = column_width_in;
        self
    }

    /// Set the intersection bar chart height, in inches.
    #[must_use]
    pub fn bar_chart_height(mut self, inches: f32) -> Self {
        self.bar_chart_height_in = inches;
        self
    }

    /// Convert a length in points to pixels at this style's resolution.
    #[must_use]
    pub fn points_to_px(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }

    /// Parse a style from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] with the offending line if parsing fails.
    #[cfg(feature = "config")]
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Load a style from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;
        tracing::debug!(path = %path.display(), "loading upset style");
        Self::parse(&content)
    }

    /// Serialize the style to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if serialization fails.
    #[cfg(feature = "config")]
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::ConfigParse { line: 0, message: e.to_string() })
    }
}


#[cfg(all(test, feature = "config"))]
mod config_tests {
    use super::*;

    #[test]
    fn test_parse_partial_keeps_defaults() {
        let style = UpsetStyle::parse("dpi: 144\nbar_color: \"#336699\"\n").unwrap();
        assert!((style.dpi - 144.0).abs() < f32::EPSILON);
        assert_eq!(style.bar_color, Rgba::rgb(0x33, 0x66, 0x99));
        assert_eq!(style.active_dot, Rgba::BLACK);
    }

    #[test]
    fn test_parse_error_includes_line() {
        let yaml = "dpi: 100\nmarker_pt: 12\nbar_color: not_a_color\n";
        let err = UpsetStyle::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_yaml_round_trip() {
        let style = UpsetStyle::new().bar_color(Rgba::rgb(1, 2, 3));
        let yaml = style.to_yaml().unwrap();
        assert_eq!(UpsetStyle::parse(&yaml).unwrap(), style);
    }

    #[test]
    fn test_load_missing_file() {
        let err = UpsetStyle::load("/nonexistent/upset.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.yaml");
        std::fs::write(&path, "row_height_in: 0.5\n").unwrap();

        let style = UpsetStyle::load(&path).unwrap();
        assert!((style.row_height_in - 0.5).abs() < f32::EPSILON);
    }
}
