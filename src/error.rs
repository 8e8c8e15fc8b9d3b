//! Crate-wide error type
//!
//! Probes never surface these for expected degraded conditions (they report a
//! score of 0 instead). Errors here are either configuration/persistence
//! problems or genuinely unexpected failures that end a run.

use thiserror::Error;

/// Result alias used across the crate
pub type BenchResult<T> = Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Failed to read config '{path}': {error}")]
    ConfigIo { path: String, error: std::io::Error },

    #[error("Failed to parse config '{path}': {error}")]
    ConfigParse { path: String, error: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("History I/O error on '{path}': {error}")]
    HistoryIo { path: String, error: std::io::Error },

    #[error("History serialization error: {0}")]
    HistorySerialization(#[from] serde_json::Error),

    #[error("No GPU adapter available")]
    GpuUnavailable,

    #[error("GPU device request failed: {0}")]
    GpuDevice(#[from] wgpu::RequestDeviceError),

    #[error("GPU operation '{operation}' failed: {error}")]
    GpuOperationFailed { operation: String, error: String },

    #[error("Failed to start execution context {index}: {error}")]
    ContextSpawn { index: usize, error: std::io::Error },

    #[error("Benchmark phase '{phase}' failed: {reason}")]
    PhaseFailed { phase: String, reason: String },
}

impl BenchError {
    /// Errors a probe converts into a score of 0 rather than propagating
    pub fn is_degraded_capability(&self) -> bool {
        matches!(
            self,
            BenchError::GpuUnavailable
                | BenchError::GpuDevice(_)
                | BenchError::GpuOperationFailed { .. }
                | BenchError::ContextSpawn { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_classification() {
        assert!(BenchError::GpuUnavailable.is_degraded_capability());
        assert!(BenchError::GpuOperationFailed {
            operation: "compile".to_string(),
            error: "bad".to_string(),
        }
        .is_degraded_capability());
        assert!(!BenchError::PhaseFailed {
            phase: "gpu".to_string(),
            reason: "panic".to_string(),
        }
        .is_degraded_capability());
    }

    #[test]
    fn test_display_includes_context() {
        let err = BenchError::InvalidConfig {
            message: "durations.single_ms must be > 0".to_string(),
        };
        assert!(err.to_string().contains("single_ms"));
    }
}
