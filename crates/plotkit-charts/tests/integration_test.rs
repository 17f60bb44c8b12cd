//! End-to-end tests: CSV file in, chart PNGs out

use plotkit_charts::{
    save_to_file, BarChart, BoxPlot, HistPlot, LabelFormat, LinePlot, PieChart, PieData,
    PlotStyle, PointPlot, SaveOptions,
};
use plotkit_data::{read_csv, CsvOptions};
use std::io::Write;
use tempfile::TempDir;

fn fixture_csv(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("payments.csv");
    let mut file = std::fs::File::create(&path).expect("Failed to create fixture");
    file.write_all(
        b"method,amount,region\n\
          credit,120,south\n\
          debit,80,south\n\
          credit,200,north\n\
          pix,40,north\n\
          debit,95,south\n\
          credit,160,north\n",
    )
    .expect("Failed to write fixture");
    path
}

#[test]
fn test_csv_to_charts_end_to_end() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let csv_path = fixture_csv(&dir);

    let data = read_csv(&csv_path, &CsvOptions::default()).expect("fixture CSV should load");
    assert_eq!(data.row_count(), 6);

    let style = PlotStyle::default();
    let out = |name: &str| SaveOptions {
        path: Some(dir.path().join(name)),
        dpi: 100,
        transparent: false,
    };

    let bar = BarChart::new(data.clone(), "method").with_title("Payments per method");
    save_to_file(&bar, &style, &out("bar.png")).expect("bar chart should render");

    let line = LinePlot::new(data.clone(), "method", "amount").with_title("Amounts");
    save_to_file(&line, &style, &out("line.png")).expect("line chart should render");

    let point = PointPlot::new(data.clone(), "method", "amount");
    save_to_file(&point, &style, &out("point.png")).expect("point chart should render");

    let hist = HistPlot::new(data.clone(), "amount");
    save_to_file(&hist, &style, &out("hist.png")).expect("histogram should render");

    let boxp = BoxPlot::new(data.clone(), "region", "amount", "Amount by region");
    save_to_file(&boxp, &style, &out("box.png")).expect("box plot should render");

    let pie = PieChart::new(PieData::Tabular {
        data,
        labels: "method".to_string(),
        values: "amount".to_string(),
    })
    .with_title("Share per method")
    .with_format(LabelFormat::Percent);
    save_to_file(&pie, &style, &out("pie.png")).expect("pie chart should render");

    for name in ["bar.png", "line.png", "point.png", "hist.png", "box.png", "pie.png"] {
        let path = dir.path().join(name);
        assert!(path.exists(), "{} was not created", name);
        let metadata = std::fs::metadata(&path).expect("Failed to read file metadata");
        assert!(metadata.len() > 1000, "{} is too small", name);
    }
}

#[test]
fn test_sorted_line_plot_leaves_loaded_data_intact() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let csv_path = fixture_csv(&dir);
    let data = read_csv(&csv_path, &CsvOptions::default()).expect("fixture CSV should load");

    let before = data.numeric_column("amount").unwrap();
    let chart = LinePlot::new(data, "method", "amount").sorted_desc();

    let options = SaveOptions {
        path: Some(dir.path().join("sorted.png")),
        dpi: 100,
        transparent: false,
    };
    save_to_file(&chart, &PlotStyle::default(), &options).expect("sorted line should render");

    assert_eq!(chart.data.numeric_column("amount").unwrap(), before);
}

#[test]
fn test_unwritable_save_path_propagates() {
    let data = plotkit_data::TabularData::from_columns(vec![
        plotkit_data::Column::from_strs("k", &["a", "b"]),
        plotkit_data::Column::from_f64s("v", &[1.0, 2.0]),
    ])
    .unwrap();
    let chart = LinePlot::new(data, "k", "v");

    let options = SaveOptions::to_path("/nonexistent-dir/deep/chart.png");
    let result = save_to_file(&chart, &PlotStyle::default(), &options);
    assert!(result.is_err(), "unwritable paths must error, not be swallowed");
}
