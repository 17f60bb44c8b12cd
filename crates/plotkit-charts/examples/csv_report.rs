//! Loads a CSV file given on the command line and renders a small report.
//!
//! Run with: cargo run --example csv_report -- data.csv category_column value_column

use anyhow::{bail, Result};
use plotkit_charts::{save_to_file, BarChart, HistPlot, LinePlot, PlotStyle, SaveOptions};
use plotkit_data::{read_csv, CsvOptions};

fn main() -> Result<()> {
    plotkit_common::init_default_logging().map_err(|err| anyhow::anyhow!(err))?;

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(category), Some(value)) = (args.next(), args.next(), args.next())
    else {
        bail!("usage: csv_report <file.csv> <category_column> <value_column>");
    };

    // the loader is deliberately forgiving: failures are logged and
    // surface here as None
    let Some(data) = read_csv(&path, &CsvOptions::default()) else {
        bail!("could not load '{}'", path);
    };

    let style = PlotStyle::default();

    let bar = BarChart::new(data.clone(), category.as_str())
        .with_values(value.as_str())
        .with_title(format!("{} per {}", value, category));
    save_to_file(&bar, &style, &SaveOptions::to_path("report_bar.png"))?;

    let line = LinePlot::new(data.clone(), category.as_str(), value.as_str()).sorted_desc();
    save_to_file(&line, &style, &SaveOptions::to_path("report_ranking.png"))?;

    let hist = HistPlot::new(data, value.as_str());
    save_to_file(&hist, &style, &SaveOptions::to_path("report_hist.png"))?;

    println!("wrote report_bar.png, report_ranking.png, report_hist.png");
    Ok(())
}
