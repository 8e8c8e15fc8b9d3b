//! History log lifecycle across process-like reloads

use chrono::Utc;
use titan_bench::{composite, BenchmarkReport, HistoryEntry, HistoryLog, RawScores, SystemDescriptor};

fn report(scores: RawScores) -> BenchmarkReport {
    BenchmarkReport {
        scores,
        composite: composite(&scores),
        system: SystemDescriptor::cpu_only(),
        completed_at: Utc::now(),
    }
}

#[test]
fn test_runs_survive_reload_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titan_bench_history.json");

    {
        let mut log = HistoryLog::load(&path).unwrap();
        log.append(HistoryEntry::from_report(&report(RawScores::new(50_000, 200_000, 10_000))))
            .unwrap();
        log.append(HistoryEntry::from_report(&report(RawScores::new(60_000, 220_000, 12_000))))
            .unwrap();
    }

    let log = HistoryLog::load(&path).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log.latest().unwrap().scores.cpu_single, 60_000);
    assert_eq!(log.best().unwrap().scores.cpu_single, 60_000);
    for entry in log.entries() {
        assert_eq!(entry.id, entry.timestamp.to_string());
        assert_eq!(entry.composite().total, entry.total_score);
    }
}

#[test]
fn test_corrupt_file_is_replaced_on_next_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "[{\"id\":").unwrap();

    let mut log = HistoryLog::load(&path).unwrap();
    assert!(log.is_empty());
    log.append(HistoryEntry::from_report(&report(RawScores::new(1, 1, 1))))
        .unwrap();

    assert_eq!(HistoryLog::load(&path).unwrap().len(), 1);
}

#[test]
fn test_clear_then_reload_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let mut log = HistoryLog::load(&path).unwrap();
    log.append(HistoryEntry::from_report(&report(RawScores::default())))
        .unwrap();
    log.clear().unwrap();

    assert!(HistoryLog::load(&path).unwrap().is_empty());
}
