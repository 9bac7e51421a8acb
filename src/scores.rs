//! Score persistence.
//!
//! One record per username: saving replaces the previous record for that
//! name. Stores never fail outward. A store that cannot be read reports no
//! scores, and a write that fails is logged and skipped.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::StoreError;

/// A stored result for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Player name, the record key.
    pub username: String,
    /// Level being played when the record was saved.
    pub level: u32,
    /// Levels finished.
    pub completed_levels: u32,
    /// Whole seconds since the run started.
    pub total_time: u64,
    /// When the record was saved (RFC 3339).
    pub date: String,
}

impl ScoreRecord {
    /// Create a record stamped with the current UTC time.
    #[must_use]
    pub fn new(username: impl Into<String>, level: u32, completed_levels: u32, total_time: u64) -> Self {
        Self {
            username: username.into(),
            level,
            completed_levels,
            total_time,
            date: now_rfc3339(),
        }
    }
}

/// Current UTC time as an RFC 3339 string.
#[must_use]
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"))
}

/// Keyed score storage used by the session.
pub trait ScoreStore: fmt::Debug + Send {
    /// Insert `record`, replacing any record with the same username.
    fn save_score(&mut self, record: ScoreRecord);

    /// All stored records in storage order.
    fn scores(&self) -> Vec<ScoreRecord>;

    /// Remove every record.
    fn clear_scores(&mut self);
}

/// Sort records for display: most levels first, then fastest.
pub fn rank(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.completed_levels
            .cmp(&a.completed_levels)
            .then(a.total_time.cmp(&b.total_time))
    });
}

/// The store's records in display order.
#[must_use]
pub fn ranked(store: &dyn ScoreStore) -> Vec<ScoreRecord> {
    let mut records = store.scores();
    rank(&mut records);
    records
}

/// Check whether `username` already has a record.
#[must_use]
pub fn has_user(store: &dyn ScoreStore, username: &str) -> bool {
    store.scores().iter().any(|r| r.username == username)
}

/// Format seconds as `m:ss`.
#[must_use]
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn upsert(records: &mut Vec<ScoreRecord>, record: ScoreRecord) {
    match records.iter_mut().find(|r| r.username == record.username) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

/// Scores kept in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_score(&mut self, record: ScoreRecord) {
        upsert(&mut self.records, record);
    }

    fn scores(&self) -> Vec<ScoreRecord> {
        self.records.clone()
    }

    fn clear_scores(&mut self) {
        self.records.clear();
    }
}

/// Scores kept as a JSON array in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use the file at `path`. The file is created on the first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored records. A missing file holds no records.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a score list.
    pub fn load(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the file's contents with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, records: &[ScoreRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn save_score(&mut self, record: ScoreRecord) {
        let mut records = self.load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable scores");
            Vec::new()
        });
        upsert(&mut records, record);
        if let Err(e) = self.write(&records) {
            tracing::warn!(path = %self.path.display(), error = %e, "score not saved");
        }
    }

    fn scores(&self) -> Vec<ScoreRecord> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "scores unavailable");
            Vec::new()
        })
    }

    fn clear_scores(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "scores not cleared");
            }
        }
    }
}
