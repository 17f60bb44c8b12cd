//! Chart trait and the shared save epilogue

use crate::style::{parse_color, PlotStyle};
use plotkit_common::{PlotKitError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters_bitmap::BitMapBackend;
use std::path::PathBuf;

/// A chart that can draw itself into a prepared drawing area
pub trait Chart {
    /// Draw the chart. The area is already sized and background-filled;
    /// implementations must not assume a particular backend.
    fn draw<DB: DrawingBackend>(
        &self,
        style: &PlotStyle,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static;

    /// Short name of this chart type, used in log messages
    fn name(&self) -> &'static str;

    /// Per-chart figure size override, in inches
    fn figure_size(&self) -> Option<(f64, f64)> {
        None
    }
}

/// Output configuration shared by every chart operation
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOptions {
    /// Target file path; `None` makes saving a no-op
    pub path: Option<PathBuf>,
    /// Output resolution
    pub dpi: u32,
    /// Skip the opaque background fill
    pub transparent: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            path: None,
            dpi: 300,
            transparent: false,
        }
    }
}

impl SaveOptions {
    /// Save to the given path with default resolution
    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

/// Persist a chart to the configured path. Does nothing when no path is
/// set. Backend and I/O failures propagate to the caller.
pub fn save_to_file<C: Chart>(chart: &C, style: &PlotStyle, options: &SaveOptions) -> Result<()> {
    let Some(path) = options.path.as_ref() else {
        return Ok(());
    };

    let (width, height) = style.pixel_size(options.dpi, chart.figure_size());
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    fill_background(&root, style, options.transparent)?;
    chart.draw(style, &root)?;
    root.present()?;

    tracing::info!("rendered {} chart to {}", chart.name(), path.display());
    Ok(())
}

/// Render a chart into an in-memory PNG at the given resolution
pub fn render_to_bytes<C: Chart>(chart: &C, style: &PlotStyle, dpi: u32) -> Result<Vec<u8>> {
    let (width, height) = style.pixel_size(dpi, chart.figure_size());
    let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        fill_background(&root, style, false)?;
        chart.draw(style, &root)?;
        root.present()?;
    }

    let img = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| PlotKitError::chart("pixel buffer does not match image dimensions"))?;
    let mut encoded = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut encoded),
        image::ImageOutputFormat::Png,
    )
    .map_err(|err| PlotKitError::chart_with_source("PNG encoding failed", err))?;
    Ok(encoded)
}

fn fill_background<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    style: &PlotStyle,
    transparent: bool,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    if transparent {
        return Ok(());
    }
    if let Some(background) = &style.background {
        root.fill(&parse_color(background))?;
    }
    Ok(())
}

/// Map a requested tick-label rotation in degrees onto the quarter-turn
/// transforms the text backend supports
pub(crate) fn label_transform(rotation: f64) -> FontTransform {
    match rotation.rem_euclid(360.0) {
        r if r < 45.0 => FontTransform::None,
        r if r < 135.0 => FontTransform::Rotate90,
        r if r < 225.0 => FontTransform::Rotate180,
        r if r < 315.0 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotkit_data::{Column, TabularData};
    use tempfile::TempDir;

    fn sample_chart() -> crate::line::LinePlot {
        let data = TabularData::from_columns(vec![
            Column::from_strs("day", &["mon", "tue", "wed"]),
            Column::from_f64s("plays", &[3.0, 7.0, 5.0]),
        ])
        .unwrap();
        crate::line::LinePlot::new(data, "day", "plays")
    }

    #[test]
    fn test_save_without_path_is_noop() {
        let chart = sample_chart();
        let result = save_to_file(&chart, &PlotStyle::default(), &SaveOptions::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_to_file_writes_png() {
        let chart = sample_chart();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("line.png");

        let options = SaveOptions::to_path(&path);
        let result = save_to_file(&chart, &PlotStyle::default(), &options);
        assert!(result.is_ok(), "Failed to render chart: {:?}", result.err());
        assert!(path.exists(), "Chart file was not created");

        let metadata = std::fs::metadata(&path).expect("Failed to read file metadata");
        assert!(metadata.len() > 1000, "Generated chart file is too small");
    }

    #[test]
    fn test_render_to_bytes_produces_png() {
        let chart = sample_chart();
        let bytes = render_to_bytes(&chart, &PlotStyle::default(), 100).unwrap();
        assert!(bytes.len() > 8);
        assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_default_save_options() {
        let options = SaveOptions::default();
        assert!(options.path.is_none());
        assert_eq!(options.dpi, 300);
        assert!(!options.transparent);
    }

    #[test]
    fn test_label_transform_quantizes() {
        assert!(matches!(label_transform(0.0), FontTransform::None));
        assert!(matches!(label_transform(30.0), FontTransform::None));
        assert!(matches!(label_transform(45.0), FontTransform::Rotate90));
        assert!(matches!(label_transform(90.0), FontTransform::Rotate90));
        assert!(matches!(label_transform(180.0), FontTransform::Rotate180));
        assert!(matches!(label_transform(-90.0), FontTransform::Rotate270));
    }
}
