//! Common test utilities for splitstat-engine tests

use splitstat_core::{RecordTable, SessionRecord};

/// Build a record whose session id is irrelevant to the scenario
pub fn record(variant: &str, query: &str, clicks: f64, dwell: f64, feedback: f64) -> SessionRecord {
    SessionRecord::new("s", variant, query, clicks, dwell, feedback)
}

/// The four-session table used as the reference scenario: two variants,
/// two sessions each, every metric computable.
pub fn reference_table() -> RecordTable {
    RecordTable::from_records(vec![
        record("A", "red shoes", 2.0, 10.0, 1.0),
        record("A", "blue boots", 1.0, 8.0, -1.0),
        record("B", "red shoes", 5.0, 20.0, 1.0),
        record("B", "blue boots", 4.0, 18.0, 1.0),
    ])
}
