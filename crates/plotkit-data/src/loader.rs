//! CSV loading with overridable parsing options
//!
//! Two entry points: [`try_read_csv`] propagates failures as errors, while
//! [`read_csv`] is deliberately defensive — every failure kind is logged and
//! converted into `None`. The chart layer performs no such recovery; this is
//! the only forgiving surface in the workspace.

use crate::table::{Column, TabularData, Value};
use csv::{ReaderBuilder, StringRecord, Trim};
use plotkit_common::{PlotKitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Text encoding of the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    Utf8,
    Latin1,
}

/// Parsing options passed through to the CSV reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Whether the first record holds column names
    pub has_headers: bool,
    /// Text encoding of the file
    pub encoding: Encoding,
    /// Quote character
    pub quote: u8,
    /// Allow records with differing field counts (short rows are padded
    /// with nulls)
    pub flexible: bool,
    /// Comment character; lines starting with it are skipped
    pub comment: Option<u8>,
    /// Trim whitespace around fields and headers
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            encoding: Encoding::Utf8,
            quote: b'"',
            flexible: false,
            comment: None,
            trim: false,
        }
    }
}

impl CsvOptions {
    /// Options with a non-default field delimiter
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }
}

/// Read a delimited text file into a [`TabularData`], propagating failures
pub fn try_read_csv(path: impl AsRef<Path>, options: &CsvOptions) -> Result<TabularData> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let text = decode(bytes, options.encoding)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .quote(options.quote)
        .flexible(options.flexible)
        .comment(options.comment)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .from_reader(text.as_bytes());

    let header_names: Vec<String> = if options.has_headers {
        reader.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let mut rows: Vec<StringRecord> = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    let width = if options.has_headers {
        header_names.len()
    } else {
        rows.first().map_or(0, StringRecord::len)
    };
    if width == 0 {
        return Err(PlotKitError::data(format!(
            "no columns found in '{}'",
            path.display()
        )));
    }

    let names: Vec<String> = if options.has_headers {
        header_names
    } else {
        (0..width).map(|i| format!("column_{}", i)).collect()
    };

    let columns = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&str> = rows.iter().map(|row| row.get(idx).unwrap_or("")).collect();
            Column::new(name.clone(), typed_cells(&cells))
        })
        .collect();

    TabularData::from_columns(columns)
}

/// Read a delimited text file, logging any failure and returning `None`
/// instead of propagating it
pub fn read_csv(path: impl AsRef<Path>, options: &CsvOptions) -> Option<TabularData> {
    let path = path.as_ref();
    match try_read_csv(path, options) {
        Ok(data) => {
            tracing::info!(
                "loaded '{}': {} rows, {} columns",
                path.display(),
                data.row_count(),
                data.column_count()
            );
            Some(data)
        }
        Err(PlotKitError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!("file '{}' not found", path.display());
            None
        }
        Err(err) => {
            tracing::error!("failed to read '{}': {}", path.display(), err);
            None
        }
    }
}

fn decode(bytes: Vec<u8>, encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Utf8 => String::from_utf8(bytes)
            .map_err(|err| PlotKitError::data_with_source("file is not valid UTF-8", err)),
        Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Type a raw column: all-integer cells make an Int column, otherwise
/// all-float cells make a Float column, otherwise the column stays Text.
/// Empty cells become Null and do not affect detection.
fn typed_cells(cells: &[&str]) -> Vec<Value> {
    let filled: Vec<&str> = cells
        .iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .collect();
    let all_int = !filled.is_empty() && filled.iter().all(|cell| cell.parse::<i64>().is_ok());
    let all_float = !filled.is_empty() && filled.iter().all(|cell| cell.parse::<f64>().is_ok());

    cells
        .iter()
        .map(|raw| {
            let cell = raw.trim();
            if cell.is_empty() {
                Value::Null
            } else if all_int {
                cell.parse().map_or(Value::Null, Value::Int)
            } else if all_float {
                cell.parse().map_or(Value::Null, Value::Float)
            } else {
                Value::Text(raw.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CsvOptions::default();
        assert_eq!(options.delimiter, b',');
        assert!(options.has_headers);
        assert_eq!(options.encoding, Encoding::Utf8);
        assert!(!options.flexible);
    }

    #[test]
    fn test_typed_cells_int_column() {
        let values = typed_cells(&["1", "2", ""]);
        assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Null]);
    }

    #[test]
    fn test_typed_cells_float_column() {
        let values = typed_cells(&["1", "2.5"]);
        assert_eq!(values, vec![Value::Float(1.0), Value::Float(2.5)]);
    }

    #[test]
    fn test_typed_cells_text_column() {
        let values = typed_cells(&["1", "two"]);
        assert_eq!(
            values,
            vec![Value::Text("1".to_string()), Value::Text("two".to_string())]
        );
    }

    #[test]
    fn test_decode_latin1() {
        // 0xE7 is "ç" in latin-1 and invalid UTF-8 on its own
        let text = decode(vec![b'a', 0xE7, b'o'], Encoding::Latin1).unwrap();
        assert_eq!(text, "aço");
        assert!(decode(vec![b'a', 0xE7], Encoding::Utf8).is_err());
    }
}
