//! Tabular data model and CSV loading for plotkit
//!
//! `TabularData` is an ordered collection of named, typed columns with
//! positionally aligned rows. It is either built directly by the caller or
//! loaded from a delimited text file via [`read_csv`] / [`try_read_csv`].

pub mod loader;
pub mod table;

pub use loader::{read_csv, try_read_csv, CsvOptions, Encoding};
pub use table::{Column, TabularData, Value};
