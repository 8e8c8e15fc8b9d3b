//! Off-screen render target for the GPU probe
//!
//! Owns every graphics resource of one probe run. Dropping the target
//! destroys the texture and uniform buffer and releases the device.

use bytemuck::{Pod, Zeroable};

use crate::error::BenchResult;
use crate::gpu::context::GpuContext;
use crate::gpu::error::{check_error_scope, gpu_operation_error};

/// Format of the off-screen colour target
const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Uniform block of `stress.wgsl`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub time: f32,
    pub _padding: f32,
    pub resolution: [f32; 2],
}

impl FrameUniforms {
    pub fn new(time: f32, width: u32, height: u32) -> Self {
        Self {
            time,
            _padding: 0.0,
            resolution: [width as f32, height as f32],
        }
    }
}

/// Something the GPU probe can draw frames into
pub trait FrameTarget {
    /// Draw one frame with the given time uniform and block until the GPU has finished it
    fn render_frame(&mut self, time_s: f32) -> BenchResult<()>;
}

pub struct OffscreenTarget {
    context: GpuContext,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl OffscreenTarget {
    /// Compile the stress shader and allocate the surface.
    ///
    /// Any validation error raised while building the pipeline is returned
    /// instead of reaching wgpu's uncaptured error handler.
    pub fn new(context: GpuContext, width: u32, height: u32) -> BenchResult<Self> {
        let max_dim = context.device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max_dim || height > max_dim {
            return Err(gpu_operation_error(
                "allocate surface",
                format!("{}x{} outside supported range 1..={}", width, height, max_dim),
            ));
        }

        let device = &context.device;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Stress Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/stress.wgsl").into()),
        });
        check_error_scope("compile stress shader", pollster::block_on(device.pop_error_scope()))?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("frame_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Stress Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Stress Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Stress Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        check_error_scope("build stress pipeline", pollster::block_on(device.pop_error_scope()))?;

        log::debug!("[OffscreenTarget] Pipeline ready, surface {}x{}", width, height);

        Ok(Self {
            context,
            pipeline,
            bind_group,
            uniform_buffer,
            texture,
            view,
            width,
            height,
        })
    }
}

impl FrameTarget for OffscreenTarget {
    fn render_frame(&mut self, time_s: f32) -> BenchResult<()> {
        let device = &self.context.device;
        let queue = &self.context.queue;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let uniforms = FrameUniforms::new(time_s, self.width, self.height);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Stress Frame"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Stress Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }
        queue.submit(std::iter::once(encoder.finish()));

        // Sync point: the frame is complete when this returns
        device.poll(wgpu::Maintain::Wait);

        check_error_scope("render frame", pollster::block_on(device.pop_error_scope()))
    }
}

impl Drop for OffscreenTarget {
    fn drop(&mut self) {
        self.texture.destroy();
        self.uniform_buffer.destroy();
        log::debug!("[OffscreenTarget] GPU resources released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        // f32 time, f32 padding, vec2<f32> resolution at offset 8
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 16);
        let uniforms = FrameUniforms::new(1.5, 640, 480);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&uniforms));
        assert_eq!(floats, [1.5f32, 0.0, 640.0, 480.0].as_slice());
    }
}
