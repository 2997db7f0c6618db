//! Flat-file session record store.
//!
//! One pretty-printed JSON array per installation, camelCase keys and
//! ISO-8601 timestamps, matching the historical file format. Every
//! operation is a synchronous whole-file read-modify-write.
//!
//! The public API is deliberately infallible: a read failure degrades to
//! an empty collection and a write failure drops the write, logged either
//! way. The timer must keep working when storage does not.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::StorageError;

use super::data_dir;

/// One completed or in-progress focus session.
///
/// `actual_duration == None` marks a session whose memo was autosaved
/// before the review step ran; it stays reachable by `id` for in-place
/// update. Everything else may be independently absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    /// Planned focus length in seconds.
    pub planned_duration: u32,
    /// Planned length plus overtime, in seconds. Absent while in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// 1-5, set by the review step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meditation_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meditation_seconds: Option<u32>,
}

impl SessionRecord {
    /// A fresh record with the required fields set and everything else
    /// absent.
    pub fn new(start_time: DateTime<Utc>, planned_duration: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            planned_duration,
            actual_duration: None,
            goal: None,
            focus_level: None,
            reflection: None,
            memo: None,
            meditation_count: None,
            meditation_seconds: None,
        }
    }
}

/// JSON-file record store.
///
/// Owns the on-disk collection exclusively; callers hold record ids, not
/// references. Single-threaded use assumed - no file locking.
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Open the store at `<data_dir>/<file_name>`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open(file_name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            path: data_dir()?.join(file_name),
        })
    }

    /// Open a store at an explicit path (tests, scripting).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in file order. Missing or unreadable file yields an
    /// empty collection, never an error.
    pub fn load(&self) -> Vec<SessionRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "record load failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the whole file. Failures are logged and dropped.
    pub fn save(&self, records: &[SessionRecord]) {
        if let Err(e) = self.try_save(records) {
            warn!(error = %e, "record save failed, write dropped");
        }
    }

    pub fn append(&self, record: SessionRecord) {
        let mut records = self.load();
        records.push(record);
        self.save(&records);
    }

    /// Replace the record with a matching id. No-op if none matches.
    pub fn update(&self, record: SessionRecord) {
        let mut records = self.load();
        if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
            self.save(&records);
        }
    }

    /// Remove the record with the given id. No-op if none matches.
    pub fn delete(&self, id: Uuid) {
        let mut records = self.load();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() != before {
            self.save(&records);
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn try_load(&self) -> Result<Vec<SessionRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| StorageError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| StorageError::ParseFailed {
            path: self.path.clone(),
            source,
        })
    }

    fn try_save(&self, records: &[SessionRecord]) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(records).map_err(StorageError::SerializeFailed)?;
        // Write-then-rename so a failed write never truncates the file.
        let tmp = self.path.with_extension("json.tmp");
        let write_err = |source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}
