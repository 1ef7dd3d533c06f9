//! Error types for A/B experiment analysis
//!
//! Provides a unified error type for all splitstat crates.

use thiserror::Error;

/// Core error type for experiment analysis operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A required column is absent from the input schema
    #[error("Missing column: {column}")]
    MissingColumn {
        /// Name of the absent column
        column: String,
    },

    /// A metric column holds values the analysis cannot use
    #[error("Invalid column {column}: {invalid_rows} rows contain non-finite values")]
    InvalidColumn {
        /// Name of the offending column
        column: String,
        /// Number of rows with NaN or infinite values in that column
        invalid_rows: usize,
    },

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The sample distribution leaves the test statistic undefined
    #[error("Degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a column absent from the input schema
    pub fn missing_column(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
        }
    }

    /// Create an error for non-finite values in a metric column
    pub fn invalid_column(column: &str, invalid_rows: usize) -> Self {
        Self::InvalidColumn {
            column: column.to_string(),
            invalid_rows,
        }
    }

    /// Create an error for a sample too small to test
    pub fn too_few_samples(expected: usize, actual: usize) -> Self {
        Self::InsufficientData { expected, actual }
    }

    /// Create an error for zero-variance input
    pub fn zero_variance(context: &str) -> Self {
        Self::DegenerateDistribution(format!("{context} has zero variance"))
    }
}
