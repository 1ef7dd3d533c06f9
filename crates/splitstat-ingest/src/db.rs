//! SQLite session log reader

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use splitstat_core::{RecordTable, SessionRecord};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::schema::REQUIRED_COLUMNS;

/// Table a session log is stored under when no name is given
pub const DEFAULT_TABLE: &str = "ab_test_logs";

/// Read a session log from a SQLite database file.
///
/// The database is opened read-only, so a missing file is an error rather
/// than a silently created empty database.
pub fn read_sqlite<P: AsRef<Path>>(path: P, table: &str) -> Result<RecordTable> {
    let conn = Connection::open_with_flags(path.as_ref(), OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    read_table(&conn, table)
}

/// Read a session log from a table in an open SQLite connection.
///
/// The table must contain every column in [`REQUIRED_COLUMNS`]; extra
/// columns are ignored. Integer metric columns are widened to floats.
#[instrument(skip(conn))]
pub fn read_table(conn: &Connection, table: &str) -> Result<RecordTable> {
    check_schema(conn, table)?;

    let mut stmt = conn.prepare(&format!(
        "SELECT session_id, variant, query, clicks, dwell_time_sec, feedback_score FROM {}",
        table
    ))?;
    let records = stmt
        .query_map([], |row| {
            Ok(SessionRecord::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let log = RecordTable::from_records(records);
    log.validate_metrics()?;

    debug!(table, rows = log.len(), "SQLite ingest complete");
    Ok(log)
}

/// Check that the table exists and carries every required column.
fn check_schema(conn: &Connection, table: &str) -> Result<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    // table_info yields no rows for an unknown table
    if present.is_empty() {
        return Err(Error::MissingTable {
            table: table.to_string(),
        });
    }
    for column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(Error::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    fn sample_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE ab_test_logs (
                session_id TEXT,
                variant TEXT,
                query TEXT,
                clicks INTEGER,
                dwell_time_sec REAL,
                feedback_score REAL
            );",
        )
        .unwrap();

        let rows = [
            ("s1", "A", "red shoes", 3i64, 45.2, 1.0),
            ("s2", "B", "red shoes", 0, 12.5, -1.0),
            ("s3", "A", "blue boots", 1, 30.0, 0.0),
        ];
        for (id, variant, query, clicks, dwell, feedback) in rows {
            conn.execute(
                "INSERT INTO ab_test_logs VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, variant, query, clicks, dwell, feedback],
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_read_table_round_trip() {
        let conn = sample_db();
        let table = read_table(&conn, DEFAULT_TABLE).unwrap();
        assert_eq!(table.len(), 3);

        let first = table.iter().next().unwrap();
        assert_eq!(first.session_id, "s1");
        assert_eq!(first.variant, "A");
        assert_eq!(first.query, "red shoes");
        // INTEGER storage widens to f64
        assert_eq!(first.clicks, 3.0);
        assert_eq!(first.dwell_time_sec, 45.2);
        assert_eq!(first.feedback_score, 1.0);
    }

    #[test]
    fn test_missing_column_is_named() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE ab_test_logs (
                session_id TEXT,
                variant TEXT,
                query TEXT,
                clicks INTEGER,
                dwell_time_sec REAL
            );",
        )
        .unwrap();

        match read_table(&conn, DEFAULT_TABLE) {
            Err(Error::MissingColumn { column }) => assert_eq!(column, "feedback_score"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_table_is_reported() {
        let conn = Connection::open_in_memory().unwrap();
        match read_table(&conn, "no_such_table") {
            Err(Error::MissingTable { table }) => assert_eq!(table, "no_such_table"),
            other => panic!("expected MissingTable, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE custom_log (
                session_id TEXT,
                variant TEXT,
                query TEXT,
                clicks INTEGER,
                dwell_time_sec REAL,
                feedback_score REAL,
                country TEXT
            );",
        )
        .unwrap();
        conn.execute(
            "INSERT INTO custom_log VALUES ('s1', 'A', 'q', 2, 10.0, 1.0, 'DE')",
            [],
        )
        .unwrap();

        let table = read_table(&conn, "custom_log").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter().next().unwrap().clicks, 2.0);
    }

    #[test]
    fn test_null_metric_is_rejected() {
        let conn = sample_db();
        conn.execute(
            "INSERT INTO ab_test_logs VALUES ('s4', 'B', 'q', NULL, 1.0, 1.0)",
            [],
        )
        .unwrap();

        assert!(matches!(
            read_table(&conn, DEFAULT_TABLE),
            Err(Error::Sqlite(_))
        ));
    }

    #[test]
    fn test_missing_database_file_is_an_error() {
        assert!(read_sqlite("/nonexistent/experiment.db", DEFAULT_TABLE).is_err());
    }
}
