use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BenchResult;
use crate::orchestrator::BenchmarkReport;
use crate::persistence::{atomic_write, HistoryErrorContext};
use crate::scoring::{composite, CompositeResult, RawScores};
use crate::system_info::SystemDescriptor;

/// One completed run as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Millisecond timestamp as a string
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub scores: RawScores,
    pub system: SystemDescriptor,
    pub total_score: u64,
    pub tier_name: String,
    pub tier_color: String,
}

impl HistoryEntry {
    pub fn from_report(report: &BenchmarkReport) -> Self {
        let timestamp = report.completed_at.timestamp_millis();
        Self {
            id: timestamp.to_string(),
            timestamp,
            scores: report.scores,
            system: report.system.clone(),
            total_score: report.composite.total,
            tier_name: report.composite.tier.name.to_string(),
            tier_color: report.composite.tier.color.to_string(),
        }
    }

    /// Recompute the composite from the stored raw scores
    pub fn composite(&self) -> CompositeResult {
        composite(&self.scores)
    }

    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Ordered log of past runs, oldest first
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Read the log at `path`.
    ///
    /// A missing file is an empty log. An unreadable JSON document is logged
    /// and treated as empty; the next append overwrites it.
    pub fn load(path: impl Into<PathBuf>) -> BenchResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!(
                        "[HistoryLog] Ignoring corrupt history file {}: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e).history_context(&path),
        };

        log::debug!(
            "[HistoryLog] Loaded {} entries from {}",
            entries.len(),
            path.display()
        );
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Highest total score; the earliest run wins a tie
    pub fn best(&self) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .rev()
            .max_by_key(|entry| entry.total_score)
    }

    /// Append and persist. The in-memory log is unchanged if the write fails.
    pub fn append(&mut self, entry: HistoryEntry) -> BenchResult<()> {
        self.entries.push(entry);
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Delete the history file and forget every entry
    pub fn clear(&mut self) -> BenchResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e).history_context(&self.path),
        }
        self.entries.clear();
        log::info!("[HistoryLog] Cleared {}", self.path.display());
        Ok(())
    }

    fn save(&self) -> BenchResult<()> {
        let data = serde_json::to_vec_pretty(&self.entries)?;
        atomic_write(&self.path, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(timestamp: i64, scores: RawScores) -> HistoryEntry {
        let result = composite(&scores);
        HistoryEntry {
            id: timestamp.to_string(),
            timestamp,
            scores,
            system: SystemDescriptor::with_threads(8),
            total_score: result.total,
            tier_name: result.tier.name.to_string(),
            tier_color: result.tier.color.to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::load(dir.path().join("history.json")).unwrap();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
        assert!(log.best().is_none());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();
        let log = HistoryLog::load(&path).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_append_persists_camel_case_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let mut log = HistoryLog::load(&path).unwrap();
        log.append(entry(1_700_000_000_000, RawScores::new(10, 10, 10)))
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let first = &json.as_array().unwrap()[0];
        assert_eq!(first["id"], "1700000000000");
        assert_eq!(first["totalScore"], 205);
        assert_eq!(first["tierName"], "Potato / Calculator");
        assert_eq!(first["scores"]["cpuMulti"], 10);

        let reloaded = HistoryLog::load(&path).unwrap();
        assert_eq!(reloaded.entries(), log.entries());
    }

    #[test]
    fn test_latest_and_best() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = HistoryLog::load(dir.path().join("h.json")).unwrap();
        log.append(entry(1, RawScores::new(100, 0, 0))).unwrap();
        log.append(entry(2, RawScores::new(300, 0, 0))).unwrap();
        log.append(entry(3, RawScores::new(200, 0, 0))).unwrap();

        assert_eq!(log.len(), 3);
        assert_eq!(log.latest().unwrap().timestamp, 3);
        assert_eq!(log.best().unwrap().timestamp, 2);
    }

    #[test]
    fn test_best_prefers_earliest_tie() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = HistoryLog::load(dir.path().join("h.json")).unwrap();
        log.append(entry(1, RawScores::new(100, 0, 0))).unwrap();
        log.append(entry(2, RawScores::new(100, 0, 0))).unwrap();
        assert_eq!(log.best().unwrap().timestamp, 1);
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let mut log = HistoryLog::load(&path).unwrap();
        log.append(entry(1, RawScores::default())).unwrap();
        assert!(path.exists());

        log.clear().unwrap();
        assert!(!path.exists());
        assert!(log.is_empty());
        // Clearing twice is fine
        log.clear().unwrap();
    }

    #[test]
    fn test_entry_recomputes_composite() {
        let e = entry(1_700_000_000_000, RawScores::new(41_234, 250_001, 7_321));
        assert_eq!(e.composite().total, e.total_score);
        assert_eq!(e.recorded_at().unwrap().timestamp_millis(), 1_700_000_000_000);
    }
}
