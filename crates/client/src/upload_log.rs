//! Bulk-upload session log.
//!
//! Keyed map of import outcomes persisted to a JSON file, consumed by the
//! CLI's bulk-import flow so an operator can see what a previous run did.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving the log file.
#[derive(Debug, Error)]
pub enum UploadLogError {
    #[error("upload log I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload log is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Outcome of one bulk upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadEntry {
    /// Source file as given by the operator.
    pub file: String,
    /// Rows seen in the source.
    pub total_rows: u32,
    /// Rows accepted by the backend.
    pub imported: u32,
    /// Rows rejected.
    pub failed: u32,
    /// When the upload finished.
    pub completed_at: DateTime<Utc>,
}

/// Keyed upload log, ordered by key for stable listings.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UploadLog {
    entries: BTreeMap<String, UploadEntry>,
}

impl UploadLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the outcome for one upload key.
    pub fn record(&mut self, key: &str, entry: UploadEntry) {
        self.entries.insert(key.to_string(), entry);
    }

    /// Look up one upload by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&UploadEntry> {
        self.entries.get(key)
    }

    /// Iterate all uploads in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &UploadEntry)> {
        self.entries.iter()
    }

    /// Load a log from disk. A missing file yields an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`UploadLogError`] when the file exists but cannot be
    /// read or parsed.
    pub fn load(path: &Path) -> Result<Self, UploadLogError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Persist the log to disk.
    ///
    /// # Errors
    ///
    /// Returns [`UploadLogError`] on serialization or write failure.
    pub fn save(&self, path: &Path) -> Result<(), UploadLogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(file: &str) -> UploadEntry {
        UploadEntry {
            file: file.to_string(),
            total_rows: 100,
            imported: 97,
            failed: 3,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_and_get() {
        let mut log = UploadLog::new();
        log.record("2026-07-01-catalog", entry("catalog.csv"));
        assert_eq!(log.get("2026-07-01-catalog").unwrap().imported, 97);
        assert!(log.get("other").is_none());
    }

    #[test]
    fn test_record_overwrites() {
        let mut log = UploadLog::new();
        log.record("k", entry("a.csv"));
        log.record("k", entry("b.csv"));
        assert_eq!(log.get("k").unwrap().file, "b.csv");
        assert_eq!(log.entries().count(), 1);
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = std::env::temp_dir().join(format!("pg-upload-{}.json", uuid::Uuid::new_v4()));
        let mut log = UploadLog::new();
        log.record("k1", entry("one.csv"));
        log.save(&path).unwrap();

        let restored = UploadLog::load(&path).unwrap();
        assert_eq!(restored.get("k1").unwrap().total_rows, 100);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let log = UploadLog::load(Path::new("/nonexistent/pg-upload.json")).unwrap();
        assert_eq!(log.entries().count(), 0);
    }
}
