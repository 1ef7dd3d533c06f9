//! Session records and the record table
//!
//! The record table is the analysis engine's sole input: a flat, owned
//! collection of per-session engagement rows. Column presence is structural
//! (every field exists on every row), so schema validation reduces to
//! checking that the metric columns hold finite numbers.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashSet};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Metric columns validated before analysis, in validation order
pub const METRIC_COLUMNS: [&str; 3] = ["clicks", "dwell_time_sec", "feedback_score"];

/// One observed session of the experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque session identifier; only ever counted, never parsed
    pub session_id: String,
    /// Treatment group label, typically "A" or "B"
    pub variant: String,
    /// Query issued during the session
    pub query: String,
    /// Number of result clicks in the session
    pub clicks: f64,
    /// Time spent on results, in seconds
    pub dwell_time_sec: f64,
    /// Signed satisfaction score; positive means satisfied
    pub feedback_score: f64,
}

impl SessionRecord {
    /// Create a record from its six attributes
    pub fn new(
        session_id: impl Into<String>,
        variant: impl Into<String>,
        query: impl Into<String>,
        clicks: f64,
        dwell_time_sec: f64,
        feedback_score: f64,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            variant: variant.into(),
            query: query.into(),
            clicks,
            dwell_time_sec,
            feedback_score,
        }
    }

    /// Whether the session left positive feedback
    pub fn has_positive_feedback(&self) -> bool {
        self.feedback_score > 0.0
    }

    fn hash_content<H: Hasher>(&self, state: &mut H) {
        self.session_id.hash(state);
        self.variant.hash(state);
        self.query.hash(state);
        self.clicks.to_bits().hash(state);
        self.dwell_time_sec.to_bits().hash(state);
        self.feedback_score.to_bits().hash(state);
    }
}

/// An owned, in-memory table of session records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    records: Vec<SessionRecord>,
}

impl RecordTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from a vector of records
    pub fn from_records(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over rows in table order
    pub fn iter(&self) -> std::slice::Iter<'_, SessionRecord> {
        self.records.iter()
    }

    /// Append one row
    pub fn push(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    /// Check that every metric column holds only finite values.
    ///
    /// Columns are checked in [`METRIC_COLUMNS`] order and the first
    /// offending column is reported, together with how many of its rows
    /// are NaN or infinite. An empty table passes trivially.
    pub fn validate_metrics(&self) -> Result<()> {
        let extractors: [fn(&SessionRecord) -> f64; 3] = [
            |r| r.clicks,
            |r| r.dwell_time_sec,
            |r| r.feedback_score,
        ];
        for (column, extract) in METRIC_COLUMNS.iter().zip(extractors) {
            let invalid_rows = self
                .records
                .iter()
                .filter(|r| !extract(r).is_finite())
                .count();
            if invalid_rows > 0 {
                return Err(Error::invalid_column(column, invalid_rows));
            }
        }
        Ok(())
    }

    /// Keep only rows whose `query` appears in `queries`.
    ///
    /// This is the upstream multiselect filter: filtering happens before
    /// grouping, so excluded rows contribute to neither aggregates nor
    /// significance tests. An empty `queries` slice keeps nothing.
    pub fn filter_queries<S: AsRef<str>>(&self, queries: &[S]) -> Self {
        let keep: HashSet<&str> = queries.iter().map(|q| q.as_ref()).collect();
        self.records
            .iter()
            .filter(|r| keep.contains(r.query.as_str()))
            .cloned()
            .collect()
    }

    /// Sorted distinct `query` values, for driving an upstream filter
    pub fn distinct_queries(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.query.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// 64-bit fingerprint of the table contents, for memoization keys.
    ///
    /// Stable for identical contents within one build of the library; not a
    /// cryptographic digest. Row order contributes, so permuted tables hash
    /// differently and memoize separately even though they summarize
    /// identically.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.records.len().hash(&mut hasher);
        for record in &self.records {
            record.hash_content(&mut hasher);
        }
        hasher.finish()
    }
}

impl FromIterator<SessionRecord> for RecordTable {
    fn from_iter<I: IntoIterator<Item = SessionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a SessionRecord;
    type IntoIter = std::slice::Iter<'a, SessionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
