//! wgpu render pipeline for the point field.
//!
//! Two-phase lifecycle: all buffers and the pipeline are created once at
//! scene construction (the point data is immutable for the scene's
//! lifetime); per frame only the uniform block is rewritten. Overlapping
//! points accumulate via additive blending and there is no depth attachment,
//! so nothing occludes.

use wgpu::util::DeviceExt;

use super::types::{
    CornerVertex, FieldUniforms, PointVertex, CORNER_INDICES, CORNER_VERTICES, SHADER_SOURCE,
};

/// Manages the pipeline, the static point buffer, and the uniform block.
pub struct PointFieldPipeline {
    pipeline: wgpu::RenderPipeline,
    corner_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    point_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    point_count: u32,
}

impl PointFieldPipeline {
    /// Create the pipeline and upload the immutable point data.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        points: &[PointVertex],
        uniforms: &FieldUniforms,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("point field shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let corner_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point field corners"),
            contents: bytemuck::cast_slice(CORNER_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point field indices"),
            contents: bytemuck::cast_slice(CORNER_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Static per-point data: written here, never again.
        let point_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point field points"),
            contents: bytemuck::cast_slice(points),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point field uniforms"),
            contents: bytemuck::bytes_of(uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("point field bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<FieldUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("point field bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("point field pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Additive accumulation for overlap; depth write disabled for this
        // draw (no depth attachment at all).
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("point field pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[
                    // Billboard corner (per-vertex)
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<CornerVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        }],
                    },
                    // Point data (per-instance)
                    PointVertex::LAYOUT,
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            corner_buffer,
            index_buffer,
            point_buffer,
            uniform_buffer,
            bind_group,
            point_count: points.len() as u32,
        }
    }

    /// Upload this frame's uniform block.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &FieldUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Record the point-field draw into an open render pass.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.corner_buffer.slice(..));
        pass.set_vertex_buffer(1, self.point_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..CORNER_INDICES.len() as u32, 0, 0..self.point_count);
    }

    pub fn point_count(&self) -> u32 {
        self.point_count
    }
}
