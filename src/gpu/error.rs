//! GPU subsystem error helpers
//!
//! Wraps wgpu failures into [`BenchError`] so the GPU probe can decide
//! whether a failure is a degraded capability (score 0) or unexpected.

use crate::error::{BenchError, BenchResult};

/// Type alias for GPU operation results
pub type GpuResult<T> = BenchResult<T>;

/// Create a GPU operation error
pub fn gpu_operation_error(operation: &str, error: impl std::fmt::Display) -> BenchError {
    BenchError::GpuOperationFailed {
        operation: operation.to_string(),
        error: error.to_string(),
    }
}

/// Turn the result of a popped error scope into a GPU operation error
pub fn check_error_scope(operation: &str, scope: Option<wgpu::Error>) -> GpuResult<()> {
    match scope {
        Some(error) => Err(gpu_operation_error(operation, error)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_error_carries_names() {
        let err = gpu_operation_error("render_frame", "adapter lost");
        assert!(err.is_degraded_capability());
        match err {
            BenchError::GpuOperationFailed { operation, error } => {
                assert_eq!(operation, "render_frame");
                assert_eq!(error, "adapter lost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_scope_is_ok() {
        assert!(check_error_scope("compile", None).is_ok());
    }
}
