//! Session log schema shared by every ingestion source

/// Columns a session log source must provide, in record-field order.
///
/// Unknown columns in a source are ignored, so logs that carry extra
/// bookkeeping fields still ingest cleanly.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "session_id",
    "variant",
    "query",
    "clicks",
    "dwell_time_sec",
    "feedback_score",
];
