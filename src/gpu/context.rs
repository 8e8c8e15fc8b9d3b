//! Headless GPU device acquisition
//!
//! No window or surface is involved: the GPU probe renders into an
//! off-screen texture, so any adapter that can rasterise will do.

use crate::error::{BenchError, BenchResult};

/// Adapter, device and queue for one probe run
pub struct GpuContext {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Request a high-performance adapter and a device with downlevel limits.
    ///
    /// Blocks on the wgpu futures with pollster.
    pub fn new_headless() -> BenchResult<Self> {
        let instance = create_instance();

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or(BenchError::GpuUnavailable)?;

        let info = adapter.get_info();
        log::info!(
            "[GpuContext] Using adapter '{}' ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );
        if info.device_type == wgpu::DeviceType::Cpu {
            log::warn!("[GpuContext] Software rasteriser selected, GPU score will be low");
        }

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Titan Bench GPU Probe Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
            },
            None,
        ))?;

        Ok(Self {
            adapter,
            device,
            queue,
        })
    }
}

fn create_instance() -> wgpu::Instance {
    wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

/// Metadata of the adapter the GPU probe would pick, without creating a device
pub fn preferred_adapter_info() -> Option<wgpu::AdapterInfo> {
    let instance = create_instance();
    pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .map(|adapter| adapter.get_info())
}
