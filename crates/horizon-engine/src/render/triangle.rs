use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::device::GpuFrame;

/// Built-in colored triangle drawn every frame once its setup task succeeded.
pub struct TriangleDemo {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const VERTICES: [Vertex; 3] = [
    Vertex { position: [0.5, -0.5, 0.0], color: [1.0, 0.0, 0.0] },  // bottom right
    Vertex { position: [-0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] }, // bottom left
    Vertex { position: [0.0, 0.5, 0.0], color: [0.0, 0.0, 1.0] },   // top
];

impl TriangleDemo {
    /// Compiles the shader, builds the pipeline and uploads the vertices.
    ///
    /// Shader diagnostics are surfaced as an error; the caller leaves the demo
    /// disabled in that case.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("horizon triangle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/triangle.wgsl").into()),
        });
        check_compilation(&shader)?;

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("horizon triangle pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("horizon triangle pipeline"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("horizon triangle vbo"),
            contents: bytemuck::cast_slice(&VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!("demo triangle ready");
        Ok(Self { pipeline, vertex_buffer })
    }

    /// Records the triangle into `frame` on top of what is already there.
    pub fn draw(&self, frame: &mut GpuFrame, viewport: Viewport) {
        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("horizon triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, viewport.width as f32, viewport.height as f32, 0.0, 1.0);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..VERTICES.len() as u32, 0..1);
    }

    /// Frees the vertex buffer; the pipeline is released on drop.
    pub fn destroy(self) {
        self.vertex_buffer.destroy();
    }
}

fn check_compilation(shader: &wgpu::ShaderModule) -> Result<()> {
    let info = pollster::block_on(shader.get_compilation_info());

    let mut errors = Vec::new();
    for msg in &info.messages {
        let line = msg.location.as_ref().map_or(0, |l| l.line_number);
        match msg.message_type {
            wgpu::CompilationMessageType::Error => errors.push(format!("line {line}: {}", msg.message)),
            wgpu::CompilationMessageType::Warning => {
                log::warn!("shader warning at line {line}: {}", msg.message)
            }
            _ => {}
        }
    }

    anyhow::ensure!(errors.is_empty(), "shader compile error: {}", errors.join("; "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_stride_matches_attributes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::ATTRS[1].offset, 12);
    }

    #[test]
    fn triangle_has_one_primary_color_per_corner() {
        let colors: Vec<[f32; 3]> = VERTICES.iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }
}
