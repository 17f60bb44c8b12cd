//! Box-and-whisker chart of a numeric column grouped by category

use crate::render::{label_transform, Chart};
use crate::style::PlotStyle;
use plotkit_common::{PlotKitError, Result};
use plotkit_data::TabularData;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;

/// Box plot with one box per category
#[derive(Debug, Clone)]
pub struct BoxPlot {
    /// Source table
    pub data: TabularData,
    /// Category column
    pub x: String,
    /// Numeric column summarized per category
    pub y: String,
    /// Chart title
    pub title: String,
    /// X axis label; defaults to the column name
    pub x_label: Option<String>,
    /// Y axis label; defaults to the column name
    pub y_label: Option<String>,
    /// Requested tick-label rotation in degrees
    pub rotation: f64,
}

impl BoxPlot {
    /// Create a box plot; the title is required
    pub fn new(
        data: TabularData,
        x: impl Into<String>,
        y: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            data,
            x: x.into(),
            y: y.into(),
            title: title.into(),
            x_label: None,
            y_label: None,
            rotation: 0.0,
        }
    }

    /// Group the numeric column by category, in first-appearance order
    fn groups(&self) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
        let categories = self.data.text_column(&self.x)?;
        let values = self.data.numeric_column(&self.y)?;

        let mut order: Vec<String> = Vec::new();
        let mut groups: Vec<Vec<f64>> = Vec::new();
        for (category, value) in categories.iter().zip(&values) {
            match order.iter().position(|c| c == category) {
                Some(position) => groups[position].push(*value),
                None => {
                    order.push(category.clone());
                    groups.push(vec![*value]);
                }
            }
        }
        Ok((order, groups))
    }
}

impl Chart for BoxPlot {
    fn draw<DB: DrawingBackend>(
        &self,
        style: &PlotStyle,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let (categories, groups) = self.groups()?;
        if categories.is_empty() {
            return Err(PlotKitError::chart("no data to render in box plot"));
        }

        let quartiles: Vec<Quartiles> = groups.iter().map(|values| Quartiles::new(values)).collect();

        let mut y_min = f32::INFINITY;
        let mut y_max = f32::NEG_INFINITY;
        for quartile in &quartiles {
            let fences = quartile.values();
            y_min = y_min.min(fences[0]);
            y_max = y_max.max(fences[4]);
        }
        let padding = if (y_max - y_min).abs() < f32::EPSILON {
            1.0
        } else {
            (y_max - y_min) * 0.05
        };

        let n = categories.len() as i32;
        let title_font = (style.title_font.family.as_str(), style.title_font.size as i32)
            .into_font()
            .style(FontStyle::Bold);

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, title_font)
            .margin(style.margins.top as i32)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(
                (0..n).into_segmented(),
                (y_min - padding)..(y_max + padding),
            )?;

        let tick_font = (style.font.family.as_str(), 10_i32)
            .into_font()
            .transform(label_transform(self.rotation));

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(self.x_label.clone().unwrap_or_else(|| self.x.clone()))
            .y_desc(self.y_label.clone().unwrap_or_else(|| self.y.clone()))
            .x_label_style(tick_font)
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => categories
                    .get(*index as usize)
                    .cloned()
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .draw()?;

        // third palette color, matching the shared bar/box default
        let color = style.color(2);
        chart.draw_series(quartiles.iter().enumerate().map(|(i, quartile)| {
            Boxplot::new_vertical(SegmentValue::CenterOf(i as i32), quartile)
                .width(20)
                .whisker_width(0.5)
                .style(color)
        }))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "box"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_data::Column;

    fn sample() -> TabularData {
        TabularData::from_columns(vec![
            Column::from_strs("group", &["a", "b", "a", "b", "a"]),
            Column::from_f64s("score", &[1.0, 10.0, 2.0, 12.0, 3.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_groups_by_first_appearance() {
        let chart = BoxPlot::new(sample(), "group", "score", "Scores by group");
        let (categories, groups) = chart.groups().unwrap();

        assert_eq!(categories, vec!["a", "b"]);
        assert_eq!(groups[0], vec![1.0, 2.0, 3.0]);
        assert_eq!(groups[1], vec![10.0, 12.0]);
    }

    #[test]
    fn test_missing_value_column_errors() {
        let chart = BoxPlot::new(sample(), "group", "missing", "title");
        assert!(chart.groups().is_err());
    }

    #[test]
    fn test_title_is_required_field() {
        let chart = BoxPlot::new(sample(), "group", "score", "Scores by group");
        assert_eq!(chart.title, "Scores by group");
    }
}
