//! Analysis engine for A/B experiments
//!
//! Turns a flat table of session records into a per-variant summary
//! annotated with the significance of the compared pair's differences:
//!
//! 1. validate the metric columns (fail fast, offending column named)
//! 2. partition rows by variant label, in lexicographic order
//! 3. aggregate each group: sample size, click rate, average dwell time,
//!    positive-feedback rate
//! 4. test the compared pair: t-tests on `clicks` and `dwell_time_sec`,
//!    Mann-Whitney U on the `feedback_score > 0` indicator
//! 5. assemble the summary table, with undefined p-values as explicit
//!    markers rather than errors
//!
//! The pass is pure and synchronous. [`SummaryCache`] adds optional
//! memoization keyed by table contents and compared labels.
//!
//! # Examples
//!
//! ```rust
//! use splitstat_core::{RecordTable, SessionRecord};
//! use splitstat_engine::{analyze, Comparison};
//!
//! let table = RecordTable::from_records(vec![
//!     SessionRecord::new("s1", "A", "q", 2.0, 10.0, 1.0),
//!     SessionRecord::new("s2", "A", "q", 1.0, 8.0, -1.0),
//!     SessionRecord::new("s3", "B", "q", 5.0, 20.0, 1.0),
//!     SessionRecord::new("s4", "B", "q", 4.0, 18.0, 1.0),
//! ]);
//!
//! let summary = analyze(&table, &Comparison::default()).unwrap();
//! assert_eq!(summary.get("A").unwrap().sample_size, 2);
//! assert!(summary.significance().click_rate.is_defined());
//! ```

mod analyze;
mod cache;
mod config;

// Re-exports
pub use analyze::{analyze, Analyzer};
pub use cache::{CachePolicy, CacheStats, SummaryCache};
pub use config::{Comparison, DEFAULT_VARIANT_A, DEFAULT_VARIANT_B};
