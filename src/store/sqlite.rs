use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::{timestamp_text, AnalysisRecord, AnalysisStatus, AnalysisStore};
use crate::error::{Result, UxaError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS analysis (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    analysis_id          TEXT    NOT NULL,
    project_id           INTEGER NOT NULL,
    status               TEXT    NOT NULL,
    results_json         TEXT    NOT NULL,
    raw_data             TEXT    NOT NULL,
    summary              TEXT    NOT NULL,
    opinion              TEXT    NOT NULL,
    recommendations_json TEXT    NOT NULL,
    created_at           TEXT    NOT NULL,
    updated_at           TEXT    NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_analysis_project_created
    ON analysis (project_id, created_at);
"#;

/// SQLite-backed store. One connection behind a mutex; every insert is a
/// single statement.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening analysis store");
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;\nPRAGMA busy_timeout = 5000;")?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| UxaError::Unknown("analysis store lock poisoned".to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<AnalysisRecord> {
        Ok(AnalysisRecord {
            analysis_id: row.get(0)?,
            project_id: row.get(1)?,
            status: parse_column(row, 2, |s: &str| s.parse::<AnalysisStatus>())?,
            results_json: row.get(3)?,
            raw_data: row.get(4)?,
            summary: row.get(5)?,
            opinion: row.get(6)?,
            recommendations_json: row.get(7)?,
            created_at: parse_column(row, 8, parse_timestamp)?,
            updated_at: parse_column(row, 9, parse_timestamp)?,
        })
    }
}

fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|ts| ts.with_timezone(&Utc))
}

fn parse_column<T, E, F>(row: &Row<'_>, idx: usize, parse: F) -> rusqlite::Result<T>
where
    F: FnOnce(&str) -> std::result::Result<T, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let text: String = row.get(idx)?;
    parse(&text).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

impl AnalysisStore for SqliteStore {
    fn insert(&self, record: &AnalysisRecord) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO analysis (analysis_id, project_id, status, results_json, raw_data,
                                   summary, opinion, recommendations_json, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.analysis_id,
                record.project_id,
                record.status.as_str(),
                record.results_json,
                record.raw_data,
                record.summary,
                record.opinion,
                record.recommendations_json,
                timestamp_text(&record.created_at),
                timestamp_text(&record.updated_at),
            ],
        )?;
        Ok(())
    }

    fn latest(&self, project_id: i64) -> Result<Option<AnalysisRecord>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT analysis_id, project_id, status, results_json, raw_data,
                        summary, opinion, recommendations_json, created_at, updated_at
                 FROM analysis
                 WHERE project_id = ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1",
                params![project_id],
                Self::map_row,
            )
            .optional()?;
        Ok(record)
    }
}
