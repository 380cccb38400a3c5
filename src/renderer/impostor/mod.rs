//! Reusable impostor-pass primitives.
//!
//! Every impostor renderer (planet spheres, star sprites) follows the same
//! pattern: one storage buffer, one bind group, one pipeline, and a
//! `draw(0..6, 0..instance_count)` call. `ImpostorPass<T>` extracts that
//! boilerplate so each renderer just supplies its instance type and shader.

/// Ray-cast planet spheres.
pub mod planet;
/// Additive star sprites.
pub mod star;

use bytemuck::{Pod, Zeroable};

use super::{pipeline_util, DrawBindGroups, PipelineLayouts};
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;

/// Two triangles forming a camera-facing quad.
pub const QUAD_VERTICES: u32 = 6;

/// Shader identity and fixed-function state for one pass.
pub struct ShaderDef<'a> {
    /// Debug label prefix for every GPU object the pass creates.
    pub label: &'a str,
    /// WGSL source with `vs_main` and `fs_main` entry points.
    pub module: wgpu::ShaderModuleDescriptor<'a>,
    /// Color blending; `None` replaces the target.
    pub blend: Option<wgpu::BlendState>,
    /// Whether fragments write depth.
    pub depth_write: bool,
}

/// A single impostor draw pass: pipeline + typed storage buffer + bind group.
///
/// All impostor shaders use the same bind group layout convention:
/// - group(0): storage buffer (instances)
/// - group(1): camera uniform
/// - group(2): lighting uniform
pub struct ImpostorPass<T: Pod + Zeroable> {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: TypedBuffer<T>,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    label: String,
    /// Instances drawn by the next [`draw`](Self::draw).
    pub instance_count: u32,
}

impl<T: Pod + Zeroable> ImpostorPass<T> {
    /// Create a new impostor pass with the given shader.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        shader: ShaderDef<'_>,
        layouts: &PipelineLayouts,
    ) -> Self {
        let label = shader.label.to_owned();
        let instance_buffer = TypedBuffer::with_capacity(
            &context.device,
            &format!("{label} Buffer"),
            64,
            wgpu::BufferUsages::STORAGE,
        );

        let bind_group_layout =
            Self::create_bind_group_layout(&context.device, &label);
        let bind_group = Self::create_bind_group(
            &context.device,
            &bind_group_layout,
            &instance_buffer,
            &label,
        );
        let pipeline =
            Self::create_pipeline(context, shader, &bind_group_layout, layouts);

        Self {
            pipeline,
            instance_buffer,
            bind_group_layout,
            bind_group,
            label,
            instance_count: 0,
        }
    }

    fn create_bind_group_layout(
        device: &wgpu::Device,
        label: &str,
    ) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX
                    | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &TypedBuffer<T>,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.buffer().as_entire_binding(),
            }],
            label: Some(&format!("{label} Bind Group")),
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        shader_def: ShaderDef<'_>,
        bind_group_layout: &wgpu::BindGroupLayout,
        layouts: &PipelineLayouts,
    ) -> wgpu::RenderPipeline {
        let label = shader_def.label;
        let shader = context.device.create_shader_module(shader_def.module);

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} Pipeline Layout")),
                bind_group_layouts: &[
                    bind_group_layout,
                    &layouts.camera,
                    &layouts.lighting,
                ],
                push_constant_ranges: &[],
            },
        );

        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&format!("{label} Pipeline")),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::color_target(
                        context.format(),
                        shader_def.blend,
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(pipeline_util::depth_stencil_state(
                    shader_def.depth_write,
                )),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    /// Write typed instances to the GPU buffer. Recreates the bind group if
    /// the buffer was reallocated.
    ///
    /// Returns `true` if the underlying buffer was reallocated.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[T],
    ) -> bool {
        let reallocated = self.instance_buffer.write(device, queue, instances);
        if reallocated {
            self.bind_group = Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.instance_buffer,
                &self.label,
            );
        }
        self.instance_count =
            u32::try_from(self.instance_buffer.count()).unwrap_or(u32::MAX);
        reallocated
    }

    /// Issue the draw call for this pass.
    ///
    /// Sets the pipeline and bind groups 0–2, then draws.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        bind_groups: &DrawBindGroups<'_>,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_bind_group(1, bind_groups.camera, &[]);
        render_pass.set_bind_group(2, bind_groups.lighting, &[]);
        render_pass.draw(0..QUAD_VERTICES, 0..self.instance_count);
    }
}
