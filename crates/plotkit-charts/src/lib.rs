//! Opinionated static chart renderers on top of plotters
//!
//! Each chart type is a plain struct whose public fields are its full
//! option surface. A [`PlotStyle`] built once carries the shared visual
//! defaults, and the [`render`] module provides the save-to-file epilogue
//! every chart goes through:
//!
//! ```no_run
//! use plotkit_charts::{BarChart, PlotStyle, SaveOptions};
//! use plotkit_data::{Column, TabularData};
//!
//! # fn main() -> plotkit_common::Result<()> {
//! let style = PlotStyle::default();
//! let data = TabularData::from_columns(vec![
//!     Column::from_strs("category", &["a", "b", "a"]),
//! ])?;
//! let chart = BarChart::new(data, "category").with_title("Counts");
//! plotkit_charts::save_to_file(&chart, &style, &SaveOptions::to_path("counts.png"))?;
//! # Ok(())
//! # }
//! ```

pub mod bar;
pub mod box_plot;
pub mod histogram;
pub mod line;
pub mod pie;
pub mod point;
pub mod render;
pub mod style;

pub use bar::BarChart;
pub use box_plot::BoxPlot;
pub use histogram::{Bins, HistPlot};
pub use line::{LinePlot, Marker};
pub use pie::{LabelFormat, PieChart, PieData, DEFAULT_PIE_COLORS};
pub use point::PointPlot;
pub use render::{render_to_bytes, save_to_file, Chart, SaveOptions};
pub use style::{parse_color, FontConfig, GridConfig, MarginConfig, PlotStyle, DEFAULT_PALETTE};
