//! Histogram over a numeric column

use crate::render::{label_transform, Chart};
use crate::style::{parse_color, PlotStyle};
use plotkit_common::{PlotKitError, Result};
use plotkit_data::TabularData;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use serde::{Deserialize, Serialize};

/// Bin specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bins {
    /// Choose a bin count from the sample size (Sturges' rule)
    Auto,
    /// Fixed number of bins
    Count(usize),
    /// Fixed bin width in data units
    Width(f64),
}

/// Histogram of a numeric column
#[derive(Debug, Clone)]
pub struct HistPlot {
    /// Source table
    pub data: TabularData,
    /// Numeric column to bin
    pub x: String,
    /// Chart title; defaults to "Distribution of {x}"
    pub title: Option<String>,
    /// X axis label; defaults to the column name
    pub x_label: Option<String>,
    /// Y axis label
    pub y_label: String,
    /// Bin specification
    pub bins: Bins,
    /// Bar width as a fraction of the bin width
    pub shrink: f64,
    /// Requested tick-label rotation in degrees
    pub rotation: f64,
    /// Bar fill color
    pub color: String,
}

impl HistPlot {
    /// Create a histogram with default options
    pub fn new(data: TabularData, x: impl Into<String>) -> Self {
        Self {
            data,
            x: x.into(),
            title: None,
            x_label: None,
            y_label: "count".to_string(),
            bins: Bins::Auto,
            shrink: 0.8,
            rotation: 0.0,
            color: "#002768".to_string(),
        }
    }

    /// Set the chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Use a fixed number of bins
    pub fn with_bins(mut self, bins: Bins) -> Self {
        self.bins = bins;
        self
    }

    fn default_title(&self) -> String {
        format!("Distribution of {}", self.x)
    }

    /// Resolve the bin count for a sample of `n` values spanning `span`
    fn bin_count(&self, n: usize, span: f64) -> usize {
        match self.bins {
            Bins::Auto => sturges(n),
            Bins::Count(count) => count.max(1),
            Bins::Width(width) => {
                if width <= 0.0 || span <= 0.0 {
                    1
                } else {
                    (span / width).ceil() as usize
                }
            }
        }
    }

    /// Bin the column: returns (bin start, bin width, counts)
    fn histogram(&self) -> Result<(f64, f64, Vec<usize>)> {
        let values = self.data.numeric_column(&self.x)?;
        if values.is_empty() {
            return Err(PlotKitError::chart("no data to render in histogram"));
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        // degenerate single-value sample still gets one visible bin
        let (width, bins) = if span <= 0.0 {
            (1.0, 1)
        } else {
            let bins = self.bin_count(values.len(), span);
            (span / bins as f64, bins)
        };

        let mut counts = vec![0usize; bins];
        for value in &values {
            let index = ((value - min) / width).floor() as usize;
            counts[index.min(bins - 1)] += 1;
        }
        Ok((min, width, counts))
    }
}

impl Chart for HistPlot {
    fn draw<DB: DrawingBackend>(
        &self,
        style: &PlotStyle,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let (min, width, counts) = self.histogram()?;
        let bins = counts.len();
        let max_count = counts.iter().copied().max().unwrap_or(0) as f64 * 1.1;
        let max_count = if max_count <= 0.0 { 1.0 } else { max_count };
        let x_max = min + width * bins as f64;

        let title = self.title.clone().unwrap_or_else(|| self.default_title());
        let title_font = (style.title_font.family.as_str(), style.title_font.size as i32)
            .into_font()
            .style(FontStyle::Bold);

        let mut chart = ChartBuilder::on(area)
            .caption(&title, title_font)
            .margin(style.margins.top as i32)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(min..x_max, 0f64..max_count)?;

        let tick_font = (style.font.family.as_str(), 10_i32)
            .into_font()
            .transform(label_transform(self.rotation));

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(self.x_label.clone().unwrap_or_else(|| self.x.clone()))
            .y_desc(self.y_label.clone())
            .x_label_style(tick_font)
            .draw()?;

        let color = parse_color(&self.color);
        let gap = width * (1.0 - self.shrink.clamp(0.0, 1.0)) / 2.0;
        chart.draw_series(counts.iter().enumerate().map(|(i, count)| {
            let low = min + width * i as f64;
            Rectangle::new(
                [(low + gap, 0.0), (low + width - gap, *count as f64)],
                color.filled(),
            )
        }))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "histogram"
    }
}

/// Sturges' rule: ceil(log2(n)) + 1
fn sturges(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        (n as f64).log2().ceil() as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_data::Column;

    fn sample(values: &[f64]) -> TabularData {
        TabularData::from_columns(vec![Column::from_f64s("age", values)]).unwrap()
    }

    #[test]
    fn test_sturges() {
        assert_eq!(sturges(1), 1);
        assert_eq!(sturges(8), 4);
        assert_eq!(sturges(100), 8);
    }

    #[test]
    fn test_histogram_counts_cover_all_values() {
        let chart = HistPlot::new(sample(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]), "age");
        let (min, width, counts) = chart.histogram().unwrap();

        assert_eq!(min, 1.0);
        assert!(width > 0.0);
        assert_eq!(counts.iter().sum::<usize>(), 8);
    }

    #[test]
    fn test_fixed_bin_count() {
        let chart = HistPlot::new(sample(&[0.0, 1.0, 2.0, 3.0]), "age").with_bins(Bins::Count(2));
        let (_, width, counts) = chart.histogram().unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(width, 1.5);
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn test_bin_width() {
        let chart = HistPlot::new(sample(&[0.0, 10.0]), "age").with_bins(Bins::Width(4.0));
        let (_, _, counts) = chart.histogram().unwrap();
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_single_value_sample() {
        let chart = HistPlot::new(sample(&[5.0, 5.0, 5.0]), "age");
        let (min, width, counts) = chart.histogram().unwrap();

        assert_eq!(min, 5.0);
        assert_eq!(width, 1.0);
        assert_eq!(counts, vec![3]);
    }

    #[test]
    fn test_default_title_names_column() {
        let chart = HistPlot::new(sample(&[1.0]), "age");
        assert_eq!(chart.default_title(), "Distribution of age");
    }

    #[test]
    fn test_empty_column_errors() {
        let chart = HistPlot::new(sample(&[]), "age");
        assert!(chart.histogram().is_err());
    }
}
