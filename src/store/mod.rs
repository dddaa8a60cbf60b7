//! Append-only persistence of analysis runs.
//!
//! Records are never updated or deleted. Retrieval returns the most recently
//! created record of a project; equal timestamps resolve to the later insert.

mod memory;
mod sqlite;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::AnalysisResult;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Completed,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "completed" => Ok(AnalysisStatus::Completed),
            other => Err(format!("unknown analysis status: {other}")),
        }
    }
}

/// One persisted analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// `A-{project}-{unix seconds}`
    pub analysis_id: String,
    pub project_id: i64,
    pub status: AnalysisStatus,
    /// Serialized [`AnalysisResult`]
    pub results_json: String,
    /// The payload exactly as received
    pub raw_data: String,
    pub summary: String,
    pub opinion: String,
    pub recommendations_json: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn completed(
        project_id: i64,
        result: &AnalysisResult,
        raw: &Value,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            analysis_id: format!("A-{}-{}", project_id, now.timestamp()),
            project_id,
            status: AnalysisStatus::Completed,
            results_json: serde_json::to_string(result)?,
            raw_data: serde_json::to_string(raw)?,
            summary: result.summary.clone(),
            opinion: result.opinion.clone(),
            recommendations_json: serde_json::to_string(&result.recommendations)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn result(&self) -> Result<AnalysisResult> {
        Ok(serde_json::from_str(&self.results_json)?)
    }
}

pub trait AnalysisStore: Send + Sync {
    /// Append one record. Each insert is atomic.
    fn insert(&self, record: &AnalysisRecord) -> Result<()>;

    /// The most recently created record for `project_id`.
    fn latest(&self, project_id: i64) -> Result<Option<AnalysisRecord>>;
}

/// Storage form of a timestamp: RFC 3339, UTC, fixed microsecond precision.
/// Fixed width keeps text ordering identical to time ordering.
pub(crate) fn timestamp_text(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
