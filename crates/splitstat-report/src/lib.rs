//! Presentation boundary for experiment summaries
//!
//! Turns a [`SummaryTable`](splitstat_core::SummaryTable) into the two
//! artifacts a report consumes: a fixed-width text table and per-metric bar
//! chart series, exportable as JSON. No plotting or page layout happens
//! here; those stay in the consuming front-end.
//!
//! # Example
//!
//! ```rust,ignore
//! use splitstat_report::{bar_charts, render_text};
//!
//! let summary = analyzer.analyze(&table, &comparison)?;
//! println!("{}", render_text(&summary));
//! let charts = bar_charts(&summary);
//! ```

mod chart;
mod format;

pub use chart::{bar_chart, bar_charts, charts_json, Bar, BarChart, ChartMetric};
pub use format::{render_text, TextReport};
