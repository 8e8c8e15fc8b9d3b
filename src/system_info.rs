//! Host description attached to every report
//!
//! Thread count comes from `num_cpus`; GPU strings come from the adapter the
//! GPU probe would pick. Missing values fall back to fixed placeholders so a
//! descriptor can always be built.

use serde::{Deserialize, Serialize};

use crate::constants::multi_core::FALLBACK_THREADS;
use crate::gpu::preferred_adapter_info;

pub const UNKNOWN_RENDERER: &str = "Unknown GPU";
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDescriptor {
    /// Logical threads available to the multi-core probe
    pub threads: usize,
    /// Set when `threads` is a fallback rather than a detected value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads_note: Option<String>,
    pub platform: String,
    pub arch: String,
    pub gpu_renderer: String,
    pub gpu_vendor: String,
    #[serde(default = "unknown")]
    pub gpu_driver: String,
    #[serde(default = "unknown")]
    pub gpu_backend: String,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

impl SystemDescriptor {
    /// Probe the host, including a GPU adapter query
    pub fn collect() -> Self {
        let mut descriptor = Self::cpu_only();
        match preferred_adapter_info() {
            Some(info) => descriptor.apply_adapter(&info),
            None => log::warn!("[SystemDescriptor] No GPU adapter found, using placeholders"),
        }
        descriptor
    }

    /// Probe the host without touching the graphics stack
    pub fn cpu_only() -> Self {
        Self::with_threads(num_cpus::get())
    }

    pub(crate) fn with_threads(detected: usize) -> Self {
        let (threads, threads_note) = if detected == 0 {
            (
                FALLBACK_THREADS,
                Some(format!("not reported, assuming {}", FALLBACK_THREADS)),
            )
        } else {
            (detected, None)
        };

        Self {
            threads,
            threads_note,
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            gpu_renderer: UNKNOWN_RENDERER.to_string(),
            gpu_vendor: UNKNOWN_VENDOR.to_string(),
            gpu_driver: unknown(),
            gpu_backend: unknown(),
        }
    }

    pub fn apply_adapter(&mut self, info: &wgpu::AdapterInfo) {
        self.gpu_renderer = non_empty_or(&info.name, UNKNOWN_RENDERER);
        self.gpu_vendor = if info.vendor == 0 {
            UNKNOWN_VENDOR.to_string()
        } else {
            vendor_name(info.vendor)
        };
        let driver = format!("{} {}", info.driver, info.driver_info);
        self.gpu_driver = non_empty_or(driver.trim(), UNKNOWN);
        self.gpu_backend = format!("{:?}", info.backend);
    }

    /// Thread count with its fallback note, e.g. "8 (not reported, assuming 8)"
    pub fn threads_label(&self) -> String {
        match &self.threads_note {
            Some(note) => format!("{} ({})", self.threads, note),
            None => self.threads.to_string(),
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// PCI vendor id to a readable name
fn vendor_name(id: u32) -> String {
    match id {
        0x10DE => "NVIDIA".to_string(),
        0x1002 | 0x1022 => "AMD".to_string(),
        0x8086 => "Intel".to_string(),
        0x106B => "Apple".to_string(),
        0x13B5 => "ARM".to_string(),
        0x5143 => "Qualcomm".to_string(),
        other => format!("0x{:04X}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter_info(name: &str, vendor: u32) -> wgpu::AdapterInfo {
        wgpu::AdapterInfo {
            name: name.to_string(),
            vendor,
            device: 0,
            device_type: wgpu::DeviceType::DiscreteGpu,
            driver: "test-driver".to_string(),
            driver_info: "1.0".to_string(),
            backend: wgpu::Backend::Vulkan,
        }
    }

    #[test]
    fn test_zero_threads_falls_back() {
        let descriptor = SystemDescriptor::with_threads(0);
        assert_eq!(descriptor.threads, 8);
        assert!(descriptor.threads_note.is_some());
        assert!(descriptor.threads_label().starts_with("8 ("));
    }

    #[test]
    fn test_detected_threads_kept() {
        let descriptor = SystemDescriptor::with_threads(12);
        assert_eq!(descriptor.threads, 12);
        assert_eq!(descriptor.threads_note, None);
        assert_eq!(descriptor.threads_label(), "12");
    }

    #[test]
    fn test_placeholders_without_adapter() {
        let descriptor = SystemDescriptor::cpu_only();
        assert!(descriptor.threads > 0);
        assert_eq!(descriptor.gpu_renderer, UNKNOWN_RENDERER);
        assert_eq!(descriptor.gpu_vendor, UNKNOWN_VENDOR);
        assert_eq!(descriptor.platform, std::env::consts::OS);
    }

    #[test]
    fn test_apply_adapter() {
        let mut descriptor = SystemDescriptor::with_threads(4);
        descriptor.apply_adapter(&adapter_info("GeForce Test", 0x10DE));
        assert_eq!(descriptor.gpu_renderer, "GeForce Test");
        assert_eq!(descriptor.gpu_vendor, "NVIDIA");
        assert_eq!(descriptor.gpu_driver, "test-driver 1.0");
        assert_eq!(descriptor.gpu_backend, "Vulkan");

        descriptor.apply_adapter(&adapter_info("  ", 0));
        assert_eq!(descriptor.gpu_renderer, UNKNOWN_RENDERER);
        assert_eq!(descriptor.gpu_vendor, UNKNOWN_VENDOR);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(SystemDescriptor::with_threads(4)).unwrap();
        assert!(json.get("gpuRenderer").is_some());
        assert!(json.get("threadsNote").is_none());
    }
}
