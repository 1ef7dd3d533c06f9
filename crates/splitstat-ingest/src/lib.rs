//! Session log ingestion
//!
//! Adapters that load experiment session logs into a
//! [`RecordTable`](splitstat_core::RecordTable) for analysis. Two sources
//! are supported: CSV files and SQLite databases. Both check the source
//! schema against [`REQUIRED_COLUMNS`] up front, address parse failures by
//! column and row, and reject non-finite metric values before the table
//! reaches the analysis engine.
//!
//! # Example
//!
//! ```rust
//! use splitstat_ingest::read_csv;
//!
//! let log = "session_id,variant,query,clicks,dwell_time_sec,feedback_score\n\
//!            s1,A,red shoes,3,41.5,1\n\
//!            s2,B,red shoes,0,12.0,-1\n";
//! let table = read_csv(log.as_bytes()).unwrap();
//! assert_eq!(table.len(), 2);
//! ```

mod csv;
mod db;
mod error;
mod schema;

pub use crate::csv::{read_csv, read_csv_path};
pub use crate::db::{read_sqlite, read_table, DEFAULT_TABLE};
pub use crate::error::{Error, Result};
pub use crate::schema::REQUIRED_COLUMNS;
