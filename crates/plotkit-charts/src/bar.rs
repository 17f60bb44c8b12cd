//! Vertical bar chart over a category column

use crate::render::{label_transform, Chart};
use crate::style::PlotStyle;
use plotkit_common::{PlotKitError, Result};
use plotkit_data::TabularData;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;

/// Vertical bar chart. With a value column the bars show the per-category
/// mean; without one they show per-category frequency counts.
#[derive(Debug, Clone)]
pub struct BarChart {
    /// Source table
    pub data: TabularData,
    /// Category column
    pub x: String,
    /// Optional value column; counts are plotted when absent
    pub y: Option<String>,
    /// Chart title
    pub title: Option<String>,
    /// X axis label; defaults to the column name
    pub x_label: Option<String>,
    /// Y axis label; defaults to the value column name, or "count"
    pub y_label: Option<String>,
    /// Requested tick-label rotation in degrees
    pub rotation: f64,
    /// Explicit category ordering; first appearance order when absent
    pub order: Option<Vec<String>>,
    /// Palette index for the bar color
    pub color_index: usize,
    /// Figure size override, in inches
    pub figure_size: Option<(f64, f64)>,
}

impl BarChart {
    /// Create a frequency-count bar chart over a category column
    pub fn new(data: TabularData, x: impl Into<String>) -> Self {
        Self {
            data,
            x: x.into(),
            y: None,
            title: None,
            x_label: None,
            y_label: None,
            rotation: 45.0,
            order: None,
            color_index: 2,
            figure_size: None,
        }
    }

    /// Plot per-category means of a value column instead of counts
    pub fn with_values(mut self, y: impl Into<String>) -> Self {
        self.y = Some(y.into());
        self
    }

    /// Set the chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Y axis label, falling back to the value column name or "count"
    fn y_axis_label(&self) -> String {
        self.y_label.clone().unwrap_or_else(|| match &self.y {
            Some(column) => column.clone(),
            None => "count".to_string(),
        })
    }

    /// Resolve category order and the bar height for each category
    fn prepare(&self) -> Result<(Vec<String>, Vec<f64>)> {
        let categories = self.data.text_column(&self.x)?;
        let order = match &self.order {
            Some(order) => order.clone(),
            None => first_appearance(&categories),
        };

        let heights = match &self.y {
            Some(column) => {
                let values = self.data.numeric_column(column)?;
                let mut sums = vec![0.0f64; order.len()];
                let mut counts = vec![0usize; order.len()];
                for (category, value) in categories.iter().zip(&values) {
                    if let Some(position) = order.iter().position(|c| c == category) {
                        sums[position] += value;
                        counts[position] += 1;
                    }
                }
                sums.iter()
                    .zip(&counts)
                    .map(|(sum, count)| if *count == 0 { 0.0 } else { sum / *count as f64 })
                    .collect()
            }
            None => {
                let mut counts = vec![0.0f64; order.len()];
                for category in &categories {
                    if let Some(position) = order.iter().position(|c| c == category) {
                        counts[position] += 1.0;
                    }
                }
                counts
            }
        };

        Ok((order, heights))
    }
}

impl Chart for BarChart {
    fn draw<DB: DrawingBackend>(
        &self,
        style: &PlotStyle,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let (categories, heights) = self.prepare()?;
        if categories.is_empty() {
            return Err(PlotKitError::chart("no data to render in bar chart"));
        }

        let n = categories.len() as i32;
        let max_height = heights.iter().copied().fold(0.0f64, f64::max) * 1.1;
        let max_height = if max_height <= 0.0 { 1.0 } else { max_height };

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(style.margins.top as i32)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left);
        if let Some(title) = &self.title {
            let title_font = (style.title_font.family.as_str(), style.title_font.size as i32)
                .into_font()
                .style(FontStyle::Bold);
            builder.caption(title, title_font);
        }
        let mut chart = builder.build_cartesian_2d((0..n).into_segmented(), 0f64..max_height)?;

        let tick_font = (style.font.family.as_str(), 10_i32)
            .into_font()
            .transform(label_transform(self.rotation));

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(self.x_label.clone().unwrap_or_else(|| self.x.clone()))
            .y_desc(self.y_axis_label())
            .x_label_style(tick_font)
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => categories
                    .get(*index as usize)
                    .cloned()
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .draw()?;

        let color = style.color(self.color_index);
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(5)
                .data(heights.iter().enumerate().map(|(i, h)| (i as i32, *h))),
        )?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "bar"
    }

    fn figure_size(&self) -> Option<(f64, f64)> {
        self.figure_size
    }
}

fn first_appearance(categories: &[String]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for category in categories {
        if !order.contains(category) {
            order.push(category.clone());
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_data::Column;

    fn sample() -> TabularData {
        TabularData::from_columns(vec![
            Column::from_strs("category", &["a", "b", "a", "c", "a", "b"]),
            Column::from_f64s("amount", &[10.0, 20.0, 30.0, 5.0, 20.0, 40.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_counts_match_manual_tally() {
        let chart = BarChart::new(sample(), "category");
        let (categories, heights) = chart.prepare().unwrap();

        assert_eq!(categories, vec!["a", "b", "c"]);
        assert_eq!(heights, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_value_bars_are_category_means() {
        let chart = BarChart::new(sample(), "category").with_values("amount");
        let (categories, heights) = chart.prepare().unwrap();

        assert_eq!(categories, vec!["a", "b", "c"]);
        assert_eq!(heights, vec![20.0, 30.0, 5.0]);
    }

    #[test]
    fn test_explicit_order() {
        let mut chart = BarChart::new(sample(), "category");
        chart.order = Some(vec!["c".to_string(), "a".to_string()]);

        let (categories, heights) = chart.prepare().unwrap();
        assert_eq!(categories, vec!["c", "a"]);
        assert_eq!(heights, vec![1.0, 3.0]);
    }

    #[test]
    fn test_default_y_axis_label() {
        let counts = BarChart::new(sample(), "category");
        assert_eq!(counts.y_axis_label(), "count");

        let values = BarChart::new(sample(), "category").with_values("amount");
        assert_eq!(values.y_axis_label(), "amount");

        let mut labeled = BarChart::new(sample(), "category");
        labeled.y_label = Some("total".to_string());
        assert_eq!(labeled.y_axis_label(), "total");
    }

    #[test]
    fn test_missing_category_column_errors() {
        let chart = BarChart::new(sample(), "missing");
        assert!(chart.prepare().is_err());
    }
}
