//! Plot styling: palette, fonts, figure geometry
//!
//! `PlotStyle` is constructed once and passed by reference into every render
//! call; there is no process-global styling state. `PlotStyle::default()`
//! always yields the same value, so "configuring" twice is harmless.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Default palette: six colors consumed by index when a chart does not carry
/// an explicit color
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#008E5A", "#00A868", "#0FCC7D", "#B5B0AE", "#D0D0D0", "#EFF4F8",
];

/// Font configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 15,
        }
    }
}

/// Margin configuration, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 40,
            left: 60,
        }
    }
}

/// Grid line appearance shared by the charts that draw gridlines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Draw lines perpendicular to the x axis
    pub show_x: bool,
    /// Draw lines perpendicular to the y axis
    pub show_y: bool,
    /// Line opacity, 0.0..=1.0
    pub opacity: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show_x: false,
            show_y: true,
            opacity: 0.3,
        }
    }
}

/// Visual defaults applied to every chart rendered with this style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    /// Ordered palette, consumed by index
    pub palette: Vec<String>,
    /// Figure size in inches (width, height)
    pub figure_size: (f64, f64),
    /// Base resolution used to turn the figure size into pixels
    pub dpi: u32,
    /// Title font
    pub title_font: FontConfig,
    /// Base font for axis labels and annotations
    pub font: FontConfig,
    /// Background color; `None` leaves the canvas unfilled
    pub background: Option<String>,
    /// Outer margins
    pub margins: MarginConfig,
    /// Grid defaults
    pub grid: GridConfig,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            figure_size: (6.0, 4.0),
            dpi: 100,
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 14,
            },
            font: FontConfig::default(),
            background: Some("#FFFFFF".to_string()),
            margins: MarginConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

impl PlotStyle {
    /// Resolve a palette entry to a concrete color; the index wraps around
    pub fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return RGBColor(0, 0, 0);
        }
        parse_color(&self.palette[index % self.palette.len()])
    }

    /// Pixel dimensions of the figure at the given resolution
    pub fn pixel_size(&self, dpi: u32, figure_size: Option<(f64, f64)>) -> (u32, u32) {
        let (width, height) = figure_size.unwrap_or(self.figure_size);
        (
            (width * f64::from(dpi)).round().max(1.0) as u32,
            (height * f64::from(dpi)).round().max(1.0) as u32,
        )
    }
}

/// Parse a color string (hex format) to RGBColor, defaulting to black on
/// malformed input
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_has_six_colors() {
        let style = PlotStyle::default();
        assert_eq!(style.palette.len(), 6);
        assert_eq!(style.palette[0], "#008E5A");
        assert_eq!(style.palette[5], "#EFF4F8");
    }

    #[test]
    fn test_default_is_idempotent() {
        // configuring twice yields the same palette and figure-size state
        assert_eq!(PlotStyle::default(), PlotStyle::default());
    }

    #[test]
    fn test_color_indexing_wraps() {
        let style = PlotStyle::default();
        assert_eq!(style.color(2), RGBColor(0x0F, 0xCC, 0x7D));
        assert_eq!(style.color(8), style.color(2));
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(parse_color("#00FF00"), RGBColor(0, 255, 0));

        // malformed colors fall back to black
        assert_eq!(parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#ZZ0000"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_pixel_size() {
        let style = PlotStyle::default();
        assert_eq!(style.pixel_size(100, None), (600, 400));
        assert_eq!(style.pixel_size(300, None), (1800, 1200));
        assert_eq!(style.pixel_size(100, Some((8.0, 5.0))), (800, 500));
    }
}
