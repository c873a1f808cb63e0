use super::helpers;
use crate::core::{
    DrawTarget, ShaderInterface, VertexLayout, SCENE_WGSL, VIEW_PROJECTION_UNIFORM,
};
use glam::Mat4;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_projection: [[f32; 4]; 4],
}

pub(crate) struct SceneResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) bind_group_index: u32,
}

/// Build the bar/cuboid pipeline from the bundled shader.
///
/// Attribute and uniform names are resolved against the WGSL source first; a
/// missing name fails setup. Shader and pipeline validation errors are
/// captured with an error scope and reported the same way.
pub(crate) async fn create_scene_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> anyhow::Result<SceneResources> {
    let interface = ShaderInterface::parse(SCENE_WGSL)?;
    let vertex_layout = VertexLayout::scene(&interface)?;
    let view_projection = interface.uniform_binding(VIEW_PROJECTION_UNIFORM)?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: view_projection.binding,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline =
        helpers::make_scene_pipeline(device, &pl, &shader, &vertex_layout, color_format);
    if let Some(err) = device.pop_error_scope().await {
        anyhow::bail!("scene shader/pipeline validation failed: {}", err);
    }

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: view_projection.binding,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    log::info!(
        "[gpu] scene pipeline ready (stride={} view_projection=@group({}) @binding({}))",
        vertex_layout.stride(),
        view_projection.group,
        view_projection.binding
    );

    Ok(SceneResources {
        pipeline,
        uniform_buffer,
        bind_group,
        bind_group_index: view_projection.group,
    })
}

/// Draw target over an open render pass with the scene pipeline bound.
pub(crate) struct ScenePass<'a, 'e> {
    pub(crate) rpass: &'a mut wgpu::RenderPass<'e>,
    pub(crate) queue: &'a wgpu::Queue,
    pub(crate) uniform_buffer: &'a wgpu::Buffer,
}

impl DrawTarget for ScenePass<'_, '_> {
    type Buffer = wgpu::Buffer;

    fn set_view_projection(&mut self, view_projection: &Mat4) {
        // Queued writes land before the encoder that holds this pass is executed
        let u = SceneUniforms {
            view_projection: view_projection.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    fn draw_indexed(&mut self, vertices: &wgpu::Buffer, indices: &wgpu::Buffer, index_count: u32) {
        self.rpass.set_vertex_buffer(0, vertices.slice(..));
        self.rpass
            .set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
        self.rpass.draw_indexed(0..index_count, 0, 0..1);
    }
}
