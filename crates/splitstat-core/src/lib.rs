//! Core types for A/B experiment analysis
//!
//! This crate defines the data contracts shared by the splitstat workspace:
//!
//! - [`SessionRecord`] / [`RecordTable`] — the input: one row per observed
//!   session, with schema validation and content hashing
//! - [`VariantSummary`] / [`SummaryTable`] — the output: per-variant
//!   aggregates plus the shared significance attributes of one comparison
//! - [`Error`] / [`Result`] — the unified error type
//!
//! # Example
//!
//! ```rust
//! use splitstat_core::{RecordTable, SessionRecord};
//!
//! let table = RecordTable::from_records(vec![
//!     SessionRecord::new("s1", "A", "red shoes", 2.0, 10.0, 1.0),
//!     SessionRecord::new("s2", "B", "red shoes", 5.0, 20.0, 1.0),
//! ]);
//!
//! table.validate_metrics().unwrap();
//! assert_eq!(table.distinct_queries(), vec!["red shoes"]);
//! ```

pub mod error;
pub mod record;
pub mod summary;

pub use error::{Error, Result};
pub use record::{RecordTable, SessionRecord, METRIC_COLUMNS};
pub use summary::{NotComputable, Significance, SignificanceSet, SummaryTable, VariantSummary};
