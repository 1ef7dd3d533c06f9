//! Error types for splitstat-ingest

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] splitstat_core::Error),

    #[error("Missing table: {table}")]
    MissingTable { table: String },

    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    #[error("Invalid value in column {column}, row {row}: {value:?}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
