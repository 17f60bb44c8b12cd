//! Error types and utilities for plotkit

use thiserror::Error;

/// Result type alias for plotkit operations
pub type Result<T> = std::result::Result<T, PlotKitError>;

/// Main error type for plotkit operations
#[derive(Error, Debug)]
pub enum PlotKitError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tabular data loading and access errors
    #[error("Data error: {message}")]
    Data {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart construction and rendering errors
    #[error("Chart error: {message}")]
    Chart {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for caller input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PlotKitError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new data error with source
    pub fn data_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Data {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new chart error
    pub fn chart(msg: impl Into<String>) -> Self {
        Self::Chart {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new chart error with source
    pub fn chart_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Chart {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

// Error conversion implementations for external types

#[cfg(feature = "csv")]
/// Convert from csv::Error to PlotKitError
impl From<csv::Error> for PlotKitError {
    fn from(err: csv::Error) -> Self {
        Self::data_with_source("CSV parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to PlotKitError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for PlotKitError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::chart_with_source("Chart rendering failed", err)
    }
}
