//! Append-only SQLite store of submitted reports.
//!
//! The notifier bot owns the database for everything else; this side only
//! ever issues one parameterized insert per report. `CREATE TABLE IF NOT
//! EXISTS` on open keeps the in-memory sentinel and fresh databases usable
//! and is a no-op against the bot's own schema.

use rusqlite::Connection;
use std::path::Path;

use crate::error::{RelayError, Result};
use crate::utils::config::{MEMORY_SENTINEL, STORE_BUSY_TIMEOUT};

/// Schema for the issues table. Labels and assignees are newline-joined text.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS issues (
    title TEXT,
    body TEXT,
    milestone TEXT,
    labels TEXT,
    assignees TEXT,
    created_at INTEGER
);
"#;

/// Insert statement for the issues table.
pub(crate) const INSERT_REPORT_SQL: &str =
    "INSERT INTO issues (title, body, milestone, labels, assignees, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

/// One row as stored: fields normalized, label/assignee lists already joined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub title: String,
    pub body: String,
    pub milestone: String,
    /// Newline-joined label list ("" when empty).
    pub labels: String,
    /// Newline-joined assignee list ("" when empty).
    pub assignees: String,
    /// Unix seconds, always > 0 by the time a row is written.
    pub created_at: i64,
}

/// Open handle to the report store. Opened once per process lifetime and
/// shared behind the environment lock; never explicitly torn down.
#[derive(Debug)]
pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    /// Open the store at `location`. The `:memory:` sentinel opens an
    /// ephemeral database; any other value must name an existing path.
    pub fn open(location: &str) -> Result<Self> {
        let conn = if location == MEMORY_SENTINEL {
            Connection::open_in_memory()?
        } else {
            let path = Path::new(location);
            if !path.exists() {
                return Err(RelayError::ResourceNotFound(path.to_path_buf()));
            }
            Connection::open(path)?
        };
        conn.busy_timeout(STORE_BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert one report row. The statement is scoped to this call; the
    /// busy timeout set at open bounds how long it may wait.
    pub fn insert(&self, row: &ReportRow) -> Result<()> {
        let mut stmt = self.conn.prepare(INSERT_REPORT_SQL)?;
        stmt.execute(rusqlite::params![
            row.title,
            row.body,
            row.milestone,
            row.labels,
            row.assignees,
            row.created_at,
        ])?;
        Ok(())
    }

    /// Number of stored reports.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM issues", [], |row| row.get(0))?;
        Ok(n.max(0) as usize)
    }

    /// Load all stored reports in insertion order.
    pub fn load_reports(&self) -> Result<Vec<ReportRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, body, milestone, labels, assignees, created_at FROM issues ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ReportRow {
                title: row.get(0)?,
                body: row.get(1)?,
                milestone: row.get(2)?,
                labels: row.get(3)?,
                assignees: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}
