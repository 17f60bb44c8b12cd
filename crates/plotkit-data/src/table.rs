//! In-memory tabular data model

use plotkit_common::{PlotKitError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single typed cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Value {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) | Value::Null => None,
        }
    }

    /// Whether this cell is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Null => Ok(()),
        }
    }
}

/// A named, ordered sequence of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from raw values
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a numeric column from floats
    pub fn from_f64s(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().map(|v| Value::Float(*v)).collect())
    }

    /// Create a numeric column from integers
    pub fn from_ints(name: impl Into<String>, values: &[i64]) -> Self {
        Self::new(name, values.iter().map(|v| Value::Int(*v)).collect())
    }

    /// Create a text column from string slices
    pub fn from_strs(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(
            name,
            values.iter().map(|v| Value::Text((*v).to_string())).collect(),
        )
    }

    /// Number of cells in the column
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered collection of named columns; rows correspond positionally
/// across columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularData {
    columns: Vec<Column>,
}

impl TabularData {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking that all columns have the same
    /// number of rows
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for column in &columns {
                if column.len() != rows {
                    return Err(PlotKitError::validation_field(
                        format!(
                            "column '{}' has {} rows, expected {}",
                            column.name,
                            column.len(),
                            rows
                        ),
                        column.name.clone(),
                    ));
                }
            }
        }
        Ok(Self { columns })
    }

    /// Names of all columns, in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Extract a column as floats. Fails if the column is missing or
    /// contains a value with no numeric view.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let column = self
            .column(name)
            .ok_or_else(|| PlotKitError::validation_field(format!("column '{}' not found", name), name))?;
        column
            .values
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    PlotKitError::validation_field(
                        format!("column '{}' contains non-numeric value '{}'", name, v),
                        name,
                    )
                })
            })
            .collect()
    }

    /// Extract a column as display strings. Fails if the column is missing.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>> {
        let column = self
            .column(name)
            .ok_or_else(|| PlotKitError::validation_field(format!("column '{}' not found", name), name))?;
        Ok(column.values.iter().map(Value::to_string).collect())
    }

    /// Return a copy of the table with rows sorted descending by the named
    /// numeric column. The receiver is left untouched.
    pub fn sorted_desc_by(&self, name: &str) -> Result<TabularData> {
        let keys = self.numeric_column(name)?;
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| keys[b].partial_cmp(&keys[a]).unwrap_or(Ordering::Equal));

        let columns = self
            .columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                values: order.iter().map(|&i| column.values[i].clone()).collect(),
            })
            .collect();
        Ok(TabularData { columns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TabularData {
        TabularData::from_columns(vec![
            Column::from_strs("city", &["porto", "recife", "natal"]),
            Column::from_f64s("sales", &[10.0, 30.0, 20.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns_rejects_ragged_columns() {
        let result = TabularData::from_columns(vec![
            Column::from_strs("a", &["x", "y"]),
            Column::from_f64s("b", &[1.0]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_column() {
        let data = sample();
        assert_eq!(data.numeric_column("sales").unwrap(), vec![10.0, 30.0, 20.0]);
        assert!(data.numeric_column("city").is_err());
        assert!(data.numeric_column("missing").is_err());
    }

    #[test]
    fn test_text_column_displays_numbers() {
        let data = TabularData::from_columns(vec![Column::from_ints("n", &[1, 2])]).unwrap();
        assert_eq!(data.text_column("n").unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn test_sorted_desc_by_leaves_source_untouched() {
        let data = sample();
        let sorted = data.sorted_desc_by("sales").unwrap();

        assert_eq!(sorted.numeric_column("sales").unwrap(), vec![30.0, 20.0, 10.0]);
        assert_eq!(
            sorted.text_column("city").unwrap(),
            vec!["recife", "natal", "porto"]
        );
        // the original keeps its row order
        assert_eq!(data.numeric_column("sales").unwrap(), vec![10.0, 30.0, 20.0]);
        assert_eq!(data.text_column("city").unwrap(), vec!["porto", "recife", "natal"]);
    }

    #[test]
    fn test_row_count() {
        let data = sample();
        assert_eq!(data.row_count(), 3);
        assert_eq!(data.column_count(), 2);
        assert!(TabularData::new().is_empty());
    }

    #[test]
    fn test_value_as_f64() {
        assert_eq!(Value::Int(4).as_f64(), Some(4.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Text("x".into()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }
}
