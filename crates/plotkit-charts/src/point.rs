//! Point chart: discrete markers joined by a line
//!
//! Close sibling of [`crate::line::LinePlot`]; the difference is that the
//! markers carry the emphasis, and a sort by `y` explicitly reorders the
//! categorical axis instead of relying on row order alone.

use crate::line::Marker;
use crate::render::{label_transform, Chart};
use crate::style::PlotStyle;
use plotkit_common::{PlotKitError, Result};
use plotkit_data::TabularData;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::cmp::Ordering;

/// Point chart with one marker per row
#[derive(Debug, Clone)]
pub struct PointPlot {
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
    /// Palette index for markers and connecting line
    pub color_index: usize,
    /// Marker drawn at each point
    pub marker: Marker,
    /// Marker radius in pixels
    pub marker_size: u32,
    /// Connecting line stroke width in pixels
    pub line_width: u32,
    /// Draw horizontal gridlines at low opacity
    pub grid: bool,
    /// Reorder the categorical axis descending by `y`; the source table
    /// keeps its row order
    pub sort_by_y: bool,
    /// Requested tick-label rotation in degrees
    pub rotation: f64,
}

impl PointPlot {
    /// Create a point chart with default options
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
            marker_size: 5,
            line_width: 2,
            grid: true,
            sort_by_y: false,
            rotation: 0.0,
        }
    }

    /// Set the chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Category order for the axis plus the value at each position. When
    /// sorting is requested the order is the sorted one, built from an
    /// extracted copy of the rows.
    fn axis_order(&self) -> Result<(Vec<String>, Vec<f64>)> {
        let labels = self.data.text_column(&self.x)?;
        let values = self.data.numeric_column(&self.y)?;
        let mut rows: Vec<(String, f64)> = labels.into_iter().zip(values).collect();
        if self.sort_by_y {
            rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        }
        let order = rows.iter().map(|(label, _)| label.clone()).collect();
        let values = rows.into_iter().map(|(_, value)| value).collect();
        Ok((order, values))
    }
}

impl Chart for PointPlot {
    fn draw<DB: DrawingBackend>(
        &self,
        style: &PlotStyle,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let (order, values) = self.axis_order()?;
        if order.is_empty() {
            return Err(PlotKitError::chart("no data to render in point chart"));
        }

        let n = order.len();
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for value in &values {
            y_min = y_min.min(*value);
            y_max = y_max.max(*value);
        }
        let padding = if (y_max - y_min).abs() < f64::EPSILON {
            1.0
        } else {
            (y_max - y_min) * 0.05
        };

        let title = self
            .title
            .clone()
            .unwrap_or_else(|| format!("{} by {}", self.y, self.x));
        let title_font = (style.title_font.family.as_str(), style.title_font.size as i32)
            .into_font()
            .style(FontStyle::Bold);

        let mut chart = ChartBuilder::on(area)
            .caption(&title, title_font)
            .margin(style.margins.top as i32)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(
                -0.5f64..(n as f64 - 0.5),
                (y_min - padding)..(y_max + padding),
            )?;

        let tick_font = (style.font.family.as_str(), 10_i32)
            .into_font()
            .transform(label_transform(self.rotation));
        let formatter = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() < 0.01 && idx >= 0.0 && (idx as usize) < order.len() {
                order[idx as usize].clone()
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
            values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
            color.stroke_width(self.line_width),
        ))?;

        if self.marker == Marker::Circle {
            chart.draw_series(values.iter().enumerate().map(|(i, v)| {
                Circle::new((i as f64, *v), self.marker_size as i32, color.filled())
            }))?;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "point"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_data::Column;

    fn sample() -> TabularData {
        TabularData::from_columns(vec![
            Column::from_strs("platform", &["web", "ios", "android"]),
            Column::from_f64s("sessions", &[12.0, 44.0, 31.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_axis_order_follows_rows_by_default() {
        let chart = PointPlot::new(sample(), "platform", "sessions");
        let (order, values) = chart.axis_order().unwrap();
        assert_eq!(order, vec!["web", "ios", "android"]);
        assert_eq!(values, vec![12.0, 44.0, 31.0]);
    }

    #[test]
    fn test_sorted_axis_order_is_reordered() {
        let mut chart = PointPlot::new(sample(), "platform", "sessions");
        chart.sort_by_y = true;

        let (order, values) = chart.axis_order().unwrap();
        assert_eq!(order, vec!["ios", "android", "web"]);
        assert_eq!(values, vec![44.0, 31.0, 12.0]);

        // caller's table is untouched
        assert_eq!(
            chart.data.text_column("platform").unwrap(),
            vec!["web", "ios", "android"]
        );
    }

    #[test]
    fn test_defaults() {
        let chart = PointPlot::new(sample(), "platform", "sessions");
        assert_eq!(chart.marker, Marker::Circle);
        assert_eq!(chart.marker_size, 5);
        assert!(chart.grid);
        assert!(!chart.sort_by_y);
    }
}
