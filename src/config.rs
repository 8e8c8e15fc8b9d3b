//! Run configuration
//!
//! Loaded from an optional TOML file. Every key has a default, so an empty
//! file (or no file) yields the standard run. CLI flags are applied on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{durations, gpu, multi_core, DEFAULT_HISTORY_FILE};
use crate::error::{BenchError, BenchResult};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub durations: DurationConfig,
    pub multi_core: MultiCoreConfig,
    pub gpu: GpuConfig,
    pub history: HistoryConfig,
}

/// Per-phase measurement windows in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationConfig {
    pub single_ms: u64,
    pub multi_ms: u64,
    pub gpu_ms: u64,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            single_ms: durations::SINGLE_CORE_MS,
            multi_ms: durations::MULTI_CORE_MS,
            gpu_ms: durations::GPU_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiCoreConfig {
    /// Overrides the system descriptor's thread count when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    pub stagger_ms: u64,
    pub grace_ms: u64,
}

impl Default for MultiCoreConfig {
    fn default() -> Self {
        Self {
            threads: None,
            stagger_ms: multi_core::STAGGER_MS,
            grace_ms: multi_core::GRACE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    pub width: u32,
    pub height: u32,
    /// 0 disables frame pacing
    pub refresh_hz: f64,
    pub enabled: bool,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            width: gpu::SURFACE_WIDTH,
            height: gpu::SURFACE_HEIGHT,
            refresh_hz: gpu::DEFAULT_REFRESH_HZ,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_HISTORY_FILE),
            enabled: true,
        }
    }
}

impl BenchConfig {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> BenchResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|error| BenchError::ConfigIo {
            path: path.display().to_string(),
            error,
        })?;
        let config = Self::from_toml_str(&raw).map_err(|error| match error {
            BenchError::ConfigParse { error, .. } => BenchError::ConfigParse {
                path: path.display().to_string(),
                error,
            },
            other => other,
        })?;
        log::debug!("[BenchConfig] Loaded {}", path.display());
        Ok(config)
    }

    /// `load` when a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> BenchResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(raw: &str) -> BenchResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| BenchError::ConfigParse {
            path: "<inline>".to_string(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> BenchResult<String> {
        toml::to_string_pretty(self).map_err(|e| BenchError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Validate against the configured thread count (or the fallback when unset)
    pub fn validate(&self) -> BenchResult<()> {
        let threads = self.multi_core.threads.unwrap_or(multi_core::FALLBACK_THREADS);
        self.validate_for_threads(threads)
    }

    pub fn validate_for_threads(&self, threads: usize) -> BenchResult<()> {
        let d = &self.durations;
        for (name, value) in [
            ("single_ms", d.single_ms),
            ("multi_ms", d.multi_ms),
            ("gpu_ms", d.gpu_ms),
        ] {
            if value == 0 {
                return Err(invalid(format!("durations.{} must be > 0", name)));
            }
        }

        if self.gpu.width == 0 || self.gpu.height == 0 {
            return Err(invalid(format!(
                "gpu surface must be non-empty, got {}x{}",
                self.gpu.width, self.gpu.height
            )));
        }
        if !(self.gpu.refresh_hz >= 0.0) || !self.gpu.refresh_hz.is_finite() {
            return Err(invalid(format!(
                "gpu.refresh_hz must be >= 0, got {}",
                self.gpu.refresh_hz
            )));
        }

        let stagger_span = self.multi_core.stagger_ms.saturating_mul(threads as u64);
        if stagger_span >= d.multi_ms / 2 {
            return Err(invalid(format!(
                "multi_core.stagger_ms ({}) x {} threads must stay below half of durations.multi_ms ({})",
                self.multi_core.stagger_ms, threads, d.multi_ms
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> BenchError {
    BenchError::InvalidConfig { message }
}
