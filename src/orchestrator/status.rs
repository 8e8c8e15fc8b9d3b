use serde::{Deserialize, Serialize};

use crate::constants::progress;
use crate::scoring::RawScores;

/// Lifecycle of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenchmarkStatus {
    Idle,
    RunningCpuSingle,
    RunningCpuMulti,
    RunningGpu,
    Calculating,
    Completed,
    Error,
}

impl BenchmarkStatus {
    /// User-facing status line
    pub fn message(&self) -> &'static str {
        match self {
            BenchmarkStatus::Idle => "Ready to Bench",
            BenchmarkStatus::RunningCpuSingle => "Igniting Single Core (Warming Up)...",
            BenchmarkStatus::RunningCpuMulti => "Full Throttle Multi-Core...",
            BenchmarkStatus::RunningGpu => "Heavy Shader Compilation...",
            BenchmarkStatus::Calculating => "Calculating Power Level...",
            BenchmarkStatus::Completed => "Benchmark Complete",
            BenchmarkStatus::Error => "Benchmark Failed",
        }
    }

    /// Progress percentage emitted on entering this status
    pub fn progress(&self) -> Option<u8> {
        match self {
            BenchmarkStatus::RunningCpuSingle => Some(progress::SINGLE_CORE),
            BenchmarkStatus::RunningCpuMulti => Some(progress::MULTI_CORE),
            BenchmarkStatus::RunningGpu => Some(progress::GPU),
            BenchmarkStatus::Calculating => Some(progress::CALCULATING),
            BenchmarkStatus::Completed => Some(progress::COMPLETED),
            BenchmarkStatus::Idle | BenchmarkStatus::Error => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BenchmarkStatus::Completed | BenchmarkStatus::Error)
    }
}

impl std::fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Emitted on every status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub status: BenchmarkStatus,
    /// Last known percentage; unchanged on failure
    pub progress: u8,
    /// Scores so far, zero for phases not yet run
    pub scores: RawScores,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_checkpoints() {
        let sequence = [
            BenchmarkStatus::RunningCpuSingle,
            BenchmarkStatus::RunningCpuMulti,
            BenchmarkStatus::RunningGpu,
            BenchmarkStatus::Calculating,
            BenchmarkStatus::Completed,
        ];
        let values: Vec<u8> = sequence.iter().filter_map(|s| s.progress()).collect();
        assert_eq!(values, vec![10, 40, 70, 95, 100]);
    }

    #[test]
    fn test_messages() {
        assert_eq!(BenchmarkStatus::Idle.to_string(), "Ready to Bench");
        assert_eq!(BenchmarkStatus::Error.message(), "Benchmark Failed");
        assert!(BenchmarkStatus::Error.is_terminal());
        assert!(BenchmarkStatus::Completed.is_terminal());
        assert!(!BenchmarkStatus::RunningGpu.is_terminal());
    }
}
