//! Line chart over the rows of a table

use crate::render::{label_transform, Chart};
use crate::style::PlotStyle;
use plotkit_common::{PlotKitError, Result};
use plotkit_data::TabularData;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Point marker drawn at each data point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    None,
    Circle,
}

/// Line chart connecting one point per row, in row order
#[derive(Debug, Clone)]
pub struct LinePlot {
    /// Source table
    pub data: TabularData,
    /// Category column drawn along the x axis
    pub x: String,
    /// Numeric column drawn along the y axis
    pub y: String,
    /// Chart title; defaults to "{y} by {x}"
    pub title: Option<String>,
    /// X axis label; defaults to the column name
    pub x_label: Option<String>,
    /// Y axis label; defaults to the column name
    pub y_label: Option<String>,
    /// Palette index for the line color
    pub color_index: usize,
    /// Marker drawn at each point
    pub marker: Marker,
    /// Line stroke width in pixels
    pub line_width: u32,
    /// Draw horizontal gridlines at low opacity
    pub grid: bool,
    /// Sort a copy of the points descending by `y` before drawing; the
    /// source table keeps its row order
    pub sort_by_y: bool,
    /// Requested tick-label rotation in degrees
    pub rotation: f64,
    /// Tick label font size
    pub tick_font_size: u32,
}

impl LinePlot {
    /// Create a line chart with default options
    pub fn new(data: TabularData, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            data,
            x: x.into(),
            y: y.into(),
            title: None,
            x_label: None,
            y_label: None,
            color_index: 0,
            marker: Marker::Circle,
            line_width: 2,
            grid: true,
            sort_by_y: false,
            rotation: 0.0,
            tick_font_size: 10,
        }
    }

    /// Set the chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sort a copy of the points descending by `y` before drawing
    pub fn sorted_desc(mut self) -> Self {
        self.sort_by_y = true;
        self
    }

    /// Extract (label, value) pairs in drawing order. Sorting happens on
    /// this extracted copy only.
    fn series(&self) -> Result<Vec<(String, f64)>> {
        let labels = self.data.text_column(&self.x)?;
        let values = self.data.numeric_column(&self.y)?;
        let mut pairs: Vec<(String, f64)> = labels.into_iter().zip(values).collect();
        if self.sort_by_y {
            pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        }
        Ok(pairs)
    }

    fn default_title(&self) -> String {
        format!("{} by {}", self.y, self.x)
    }
}

impl Chart for LinePlot {
    fn draw<DB: DrawingBackend>(
        &self,
        style: &PlotStyle,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let series = self.series()?;
        if series.is_empty() {
            return Err(PlotKitError::chart("no data to render in line chart"));
        }

        let n = series.len();
        let (y_min, y_max) = value_range(series.iter().map(|(_, v)| *v));
        let title = self.title.clone().unwrap_or_else(|| self.default_title());
        let title_font = (style.title_font.family.as_str(), style.title_font.size as i32)
            .into_font()
            .style(FontStyle::Bold);

        let mut chart = ChartBuilder::on(area)
            .caption(&title, title_font)
            .margin(style.margins.top as i32)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)?;

        let labels: Vec<String> = series.iter().map(|(label, _)| label.clone()).collect();
        let tick_font = (style.font.family.as_str(), self.tick_font_size as i32)
            .into_font()
            .transform(label_transform(self.rotation));
        let formatter = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() < 0.01 && idx >= 0.0 && (idx as usize) < labels.len() {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        };

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(self.x_label.clone().unwrap_or_else(|| self.x.clone()))
            .y_desc(self.y_label.clone().unwrap_or_else(|| self.y.clone()))
            .x_labels(n.min(24))
            .x_label_style(tick_font)
            .x_label_formatter(&formatter);
        if self.grid {
            mesh.disable_x_mesh()
                .bold_line_style(BLACK.mix(style.grid.opacity))
                .light_line_style(BLACK.mix(style.grid.opacity / 2.0));
        } else {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let color = style.color(self.color_index);
        chart.draw_series(LineSeries::new(
            series.iter().enumerate().map(|(i, (_, v))| (i as f64, *v)),
            color.stroke_width(self.line_width),
        ))?;

        if self.marker == Marker::Circle {
            chart.draw_series(
                series
                    .iter()
                    .enumerate()
                    .map(|(i, (_, v))| Circle::new((i as f64, *v), 4, color.filled())),
            )?;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "line"
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    let padding = ((max - min) * 0.05).max(f64::EPSILON);
    let padding = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        padding
    };
    (min - padding, max + padding)
}
