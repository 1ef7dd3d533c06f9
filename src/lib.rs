//! A/B experiment analysis toolkit
//!
//! Facade over the workspace crates:
//!
//! - [`core`]: session records, summary tables, shared error types
//! - [`hypothesis`]: two-sample significance tests
//! - [`engine`]: the analysis engine, comparison config, summary cache
//! - [`ingest`]: CSV and SQLite session log readers
//! - [`report`]: text and chart-series presentation
//!
//! # Example
//!
//! ```rust
//! use splitstat::engine::{analyze, Comparison};
//! use splitstat::ingest::read_csv;
//! use splitstat::report::render_text;
//!
//! let log = "session_id,variant,query,clicks,dwell_time_sec,feedback_score\n\
//!            s1,A,red shoes,3,41.5,1\n\
//!            s2,A,red shoes,0,12.0,-1\n\
//!            s3,B,red shoes,5,60.5,1\n\
//!            s4,B,blue boots,4,48.0,1\n";
//! let table = read_csv(log.as_bytes()).unwrap();
//! let summary = analyze(&table, &Comparison::default()).unwrap();
//! println!("{}", render_text(&summary));
//! ```

pub use splitstat_core as core;
pub use splitstat_engine as engine;
pub use splitstat_hypothesis as hypothesis;
pub use splitstat_ingest as ingest;
pub use splitstat_report as report;
