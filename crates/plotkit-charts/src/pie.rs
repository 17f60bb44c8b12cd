//! Pie chart with per-slice explode offsets and value annotations

use crate::render::Chart;
use crate::style::{parse_color, PlotStyle};
use plotkit_common::utils::group_digits;
use plotkit_common::{PlotKitError, Result};
use plotkit_data::TabularData;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Default slice colors, a fixed pair distinct from the global palette
pub const DEFAULT_PIE_COLORS: [&str; 2] = ["#1F6FF0", "#0eafaa"];

/// Input shape for a pie chart, resolved explicitly by the caller
#[derive(Debug, Clone)]
pub enum PieData {
    /// A table plus the columns holding slice labels and values
    Tabular {
        data: TabularData,
        labels: String,
        values: String,
    },
    /// A labeled sequence of values
    Labeled(Vec<(String, f64)>),
}

/// Formatting policy for the in-wedge annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelFormat {
    /// Plain percentage, e.g. "30.0%"
    Percent,
    /// Currency value with digit grouping, e.g. "R$1.234"
    Value,
    /// Percentage stacked over the value
    Both,
}

/// Pie chart over a labeled series of values
#[derive(Debug, Clone)]
pub struct PieChart {
    /// Slice labels and values
    pub data: PieData,
    /// Chart title
    pub title: Option<String>,
    /// Per-slice offset from the center as a fraction of the radius;
    /// defaults to a small uniform offset
    pub explode: Option<Vec<f64>>,
    /// Slice colors, cycled; defaults to [`DEFAULT_PIE_COLORS`]
    pub colors: Option<Vec<String>>,
    /// In-wedge annotation policy
    pub label_format: LabelFormat,
    /// Angle of the first slice edge, in degrees counter-clockwise from 3
    /// o'clock
    pub start_angle: f64,
    /// Group value digits with "." instead of ","
    pub locale_format: bool,
    /// Prefix for formatted values
    pub currency_prefix: String,
    /// Title font size
    pub title_font_size: u32,
    /// In-wedge annotation font size
    pub value_font_size: u32,
    /// Rim label font size
    pub label_font_size: u32,
    /// Figure size override, in inches
    pub figure_size: Option<(f64, f64)>,
}

impl PieChart {
    /// Create a pie chart with default options
    pub fn new(data: PieData) -> Self {
        Self {
            data,
            title: None,
            explode: None,
            colors: None,
            label_format: LabelFormat::Both,
            start_angle: 90.0,
            locale_format: true,
            currency_prefix: "R$".to_string(),
            title_font_size: 12,
            value_font_size: 12,
            label_font_size: 10,
            figure_size: None,
        }
    }

    /// Set the chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the annotation format
    pub fn with_format(mut self, format: LabelFormat) -> Self {
        self.label_format = format;
        self
    }

    /// Resolve the input shape into parallel label and value sequences
    fn resolve(&self) -> Result<(Vec<String>, Vec<f64>)> {
        match &self.data {
            PieData::Tabular {
                data,
                labels,
                values,
            } => Ok((data.text_column(labels)?, data.numeric_column(values)?)),
            PieData::Labeled(pairs) => Ok((
                pairs.iter().map(|(label, _)| label.clone()).collect(),
                pairs.iter().map(|(_, value)| *value).collect(),
            )),
        }
    }

    /// Format the annotation for one wedge, one line per element
    fn wedge_label(&self, percentage: f64, value: f64) -> Vec<String> {
        let amount = || {
            let separator = if self.locale_format { '.' } else { ',' };
            format!(
                "{}{}",
                self.currency_prefix,
                group_digits(value.round() as i64, separator)
            )
        };
        match self.label_format {
            LabelFormat::Percent => vec![format!("{:.1}%", percentage)],
            LabelFormat::Value => vec![amount()],
            LabelFormat::Both => vec![format!("{:.1}%", percentage), format!("({})", amount())],
        }
    }

    /// Per-slice explode offsets, padded with zero when the caller's list
    /// is shorter than the data
    fn explode_offsets(&self, slices: usize) -> Vec<f64> {
        match &self.explode {
            Some(explode) => explode
                .iter()
                .copied()
                .chain(std::iter::repeat(0.0))
                .take(slices)
                .collect(),
            None => vec![0.02; slices],
        }
    }

    /// Slice colors, cycled over the configured or default set
    fn slice_colors(&self, slices: usize) -> Vec<RGBColor> {
        let source: Vec<String> = match &self.colors {
            Some(colors) => colors.clone(),
            None => DEFAULT_PIE_COLORS.iter().map(|c| (*c).to_string()).collect(),
        };
        (0..slices)
            .map(|i| parse_color(&source[i % source.len()]))
            .collect()
    }
}

impl Chart for PieChart {
    fn draw<DB: DrawingBackend>(
        &self,
        style: &PlotStyle,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let (labels, values) = self.resolve()?;
        if values.is_empty() {
            return Err(PlotKitError::validation("pie chart needs at least one value"));
        }
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return Err(PlotKitError::validation(format!(
                "pie chart values must sum to a positive total, got {}",
                total
            )));
        }

        let area = match &self.title {
            Some(title) => area.titled(
                title,
                (style.title_font.family.as_str(), self.title_font_size as i32),
            )?,
            None => area.clone(),
        };

        let (width, height) = area.dim_in_pixel();
        let center_x = f64::from(width) / 2.0;
        let center_y = f64::from(height) / 2.0;
        let radius = 0.35 * f64::from(width.min(height));

        let offsets = self.explode_offsets(values.len());
        let colors = self.slice_colors(values.len());
        let label_style = (style.font.family.as_str(), self.label_font_size as i32)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let value_style = (style.font.family.as_str(), self.value_font_size as i32)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        let mut cursor = self.start_angle.to_radians();
        for (i, value) in values.iter().enumerate() {
            let sweep = value / total * 2.0 * PI;
            let mid = cursor + sweep / 2.0;
            let (slice_x, slice_y) = polar(center_x, center_y, offsets[i] * radius, mid);

            // sector outline: center plus points along the arc
            let steps = (sweep.to_degrees().abs().ceil() as usize).max(2);
            let mut points = vec![(slice_x as i32, slice_y as i32)];
            for step in 0..=steps {
                let angle = cursor + sweep * step as f64 / steps as f64;
                let (x, y) = polar(slice_x, slice_y, radius, angle);
                points.push((x as i32, y as i32));
            }
            area.draw(&Polygon::new(points, colors[i].filled()))?;

            let (label_x, label_y) = polar(slice_x, slice_y, radius * 1.12, mid);
            area.draw(&Text::new(
                labels[i].clone(),
                (label_x as i32, label_y as i32),
                label_style.clone(),
            ))?;

            let lines = self.wedge_label(value / total * 100.0, *value);
            let (value_x, value_y) = polar(slice_x, slice_y, radius * 0.6, mid);
            let line_height = f64::from(self.value_font_size) * 1.2;
            let first_y = value_y - line_height * (lines.len() as f64 - 1.0) / 2.0;
            for (line_index, line) in lines.iter().enumerate() {
                area.draw(&Text::new(
                    line.clone(),
                    (
                        value_x as i32,
                        (first_y + line_height * line_index as f64) as i32,
                    ),
                    value_style.clone(),
                ))?;
            }

            cursor += sweep;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "pie"
    }

    fn figure_size(&self) -> Option<(f64, f64)> {
        self.figure_size
    }
}

/// Point at distance `r` from (cx, cy) under a counter-clockwise angle in
/// radians; the y axis grows downward on screen
fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy - r * angle.sin())
}
