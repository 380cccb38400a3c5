//! Rendering of the scene graph.
//!
//! Planets are drawn as ray-cast sphere impostors and the starfield as
//! additive point sprites. Labels live in the scene graph for layout and
//! orientation but have no glyph pass.

pub mod impostor;
pub(crate) mod pipeline_util;

use wgpu::util::DeviceExt;

use self::impostor::planet::{planet_instances, PlanetInstance};
use self::impostor::star::{star_instances, StarInstance};
use self::impostor::{ImpostorPass, ShaderDef};
use crate::camera::CameraUniform;
use crate::engine::SceneEngine;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTarget;
use crate::util::lighting::Lighting;

/// Background clear color (deep space).
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.002,
    g: 0.002,
    b: 0.006,
    a: 1.0,
};

/// Bind group layouts shared by every pass.
pub struct PipelineLayouts {
    /// group(1): camera uniform.
    pub camera: wgpu::BindGroupLayout,
    /// group(2): lighting uniform.
    pub lighting: wgpu::BindGroupLayout,
}

/// Bind groups shared across all draw calls.
pub struct DrawBindGroups<'a> {
    /// Camera uniform bind group (view-projection, position, etc.).
    pub camera: &'a wgpu::BindGroup,
    /// Lighting uniform bind group.
    pub lighting: &'a wgpu::BindGroup,
}

struct CameraBinding {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[pipeline_util::uniform_buffer(0)],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group"),
        });
        Self {
            buffer,
            layout,
            bind_group,
        }
    }
}

/// Owns the GPU context and every pass needed to draw a [`SceneEngine`].
pub struct SceneRenderer {
    context: RenderContext,
    depth: DepthTarget,
    camera: CameraBinding,
    lighting: Lighting,
    planets: ImpostorPass<PlanetInstance>,
    stars: ImpostorPass<StarInstance>,
}

impl SceneRenderer {
    /// Build every pass for `context`, lit according to the engine's
    /// options.
    #[must_use]
    pub fn new(context: RenderContext, engine: &SceneEngine) -> Self {
        let (width, height) = context.size();
        let depth = DepthTarget::new(&context.device, width, height);
        let camera = CameraBinding::new(&context.device);
        let lighting = Lighting::new(&context, &engine.options().lighting);

        let layouts = PipelineLayouts {
            camera: camera.layout.clone(),
            lighting: lighting.layout.clone(),
        };
        let planets = ImpostorPass::new(
            &context,
            ShaderDef {
                label: "Planet Impostor",
                module: wgpu::include_wgsl!("../../assets/shaders/impostor/planet.wgsl"),
                blend: None,
                depth_write: true,
            },
            &layouts,
        );
        let stars = ImpostorPass::new(
            &context,
            ShaderDef {
                label: "Star Sprite",
                module: wgpu::include_wgsl!("../../assets/shaders/impostor/star.wgsl"),
                blend: Some(pipeline_util::ADDITIVE_BLENDING),
                depth_write: false,
            },
            &layouts,
        );

        Self {
            context,
            depth,
            camera,
            lighting,
            planets,
            stars,
        }
    }

    /// The GPU context.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Resize the surface and depth target. Ignores zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
    }

    /// Upload whatever changed in the engine and draw one frame.
    ///
    /// Instance buffers are only rebuilt when the scene graph is dirty.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain texture could be
    /// acquired.
    pub fn render(&mut self, engine: &mut SceneEngine) -> Result<(), wgpu::SurfaceError> {
        let device = &self.context.device;
        let queue = &self.context.queue;

        queue.write_buffer(
            &self.camera.buffer,
            0,
            bytemuck::cast_slice(&[engine.camera_uniform()]),
        );
        if engine.scene().is_dirty() {
            let _ = self
                .planets
                .write_instances(device, queue, &planet_instances(engine.scene()));
            let _ = self
                .stars
                .write_instances(device, queue, &star_instances(engine.scene()));
            engine.scene_mut().mark_rendered();
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let bind_groups = DrawBindGroups {
                camera: &self.camera.bind_group,
                lighting: &self.lighting.bind_group,
            };
            self.planets.draw(&mut pass, &bind_groups);
            self.stars.draw(&mut pass, &bind_groups);
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Reconfigure the surface after it was lost or became outdated.
    pub fn reconfigure(&self) {
        self.context.reconfigure();
    }
}
