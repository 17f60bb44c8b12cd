//! Renders one chart of each type from inline data.
//!
//! Run with: cargo run --example basic_charts

use anyhow::Result;
use plotkit_charts::{
    render_to_bytes, save_to_file, BarChart, BoxPlot, HistPlot, LabelFormat, LinePlot, PieChart,
    PieData, PlotStyle, PointPlot, SaveOptions,
};
use plotkit_data::{Column, TabularData};

fn main() -> Result<()> {
    plotkit_common::init_default_logging().map_err(|err| anyhow::anyhow!(err))?;

    let style = PlotStyle::default();
    let data = TabularData::from_columns(vec![
        Column::from_strs(
            "month",
            &["jan", "feb", "mar", "apr", "may", "jun"],
        ),
        Column::from_f64s("revenue", &[1200.0, 950.0, 1430.0, 1100.0, 1740.0, 1580.0]),
        Column::from_strs("team", &["a", "b", "a", "b", "a", "b"]),
    ])?;

    let bar = BarChart::new(data.clone(), "month")
        .with_values("revenue")
        .with_title("Revenue per month");
    save_to_file(&bar, &style, &SaveOptions::to_path("bar.png"))?;

    let line = LinePlot::new(data.clone(), "month", "revenue").with_title("Revenue trend");
    save_to_file(&line, &style, &SaveOptions::to_path("line.png"))?;

    let mut point = PointPlot::new(data.clone(), "month", "revenue");
    point.sort_by_y = true;
    save_to_file(&point, &style, &SaveOptions::to_path("point.png"))?;

    let hist = HistPlot::new(data.clone(), "revenue");
    save_to_file(&hist, &style, &SaveOptions::to_path("hist.png"))?;

    let boxp = BoxPlot::new(data, "team", "revenue", "Revenue by team");
    save_to_file(&boxp, &style, &SaveOptions::to_path("box.png"))?;

    let pie = PieChart::new(PieData::Labeled(vec![
        ("credit".to_string(), 5400.0),
        ("debit".to_string(), 2600.0),
    ]))
    .with_title("Payment split")
    .with_format(LabelFormat::Both);
    save_to_file(&pie, &style, &SaveOptions::to_path("pie.png"))?;

    // charts can also be rendered straight to PNG bytes
    let png = render_to_bytes(&pie, &style, 100)?;
    println!("in-memory pie chart: {} bytes", png.len());

    Ok(())
}
