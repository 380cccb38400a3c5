//! Scene lighting: uniform layout and its GPU binding.

use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::LightingOptions;

/// Lighting configuration shared by the planet shader.
/// NOTE: Must match WGSL struct layout exactly (48 bytes)
///
/// WGSL layout:
///   ambient: vec4<f32>        (offset 0,  rgb = linear color, a = intensity)
///   directional: vec4<f32>    (offset 16, rgb = linear color, a = intensity)
///   direction: vec4<f32>      (offset 32, xyz = normalized, w unused)
///   Total: 48 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Ambient color (linear) and intensity.
    pub ambient: [f32; 4],
    /// Directional light color (linear) and intensity.
    pub directional: [f32; 4],
    /// Direction toward the light (normalized).
    pub direction: [f32; 4],
}

impl LightingUniform {
    /// Convert options (sRGB colors, unnormalized direction) to shader form.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        let [ar, ag, ab] = srgb_to_linear(options.ambient_color);
        let [dr, dg, db] = srgb_to_linear(options.directional_color);
        let [x, y, z] = normalize_or_up(options.light_dir);
        Self {
            ambient: [ar, ag, ab, options.ambient_intensity],
            directional: [dr, dg, db, options.directional_intensity],
            direction: [x, y, z, 0.0],
        }
    }
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

/// Convert an sRGB color to linear space.
#[must_use]
pub fn srgb_to_linear(c: [f32; 3]) -> [f32; 3] {
    c.map(|v| {
        if v <= 0.040_45 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    })
}

fn normalize_or_up(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > f32::EPSILON {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [0.0, 1.0, 0.0]
    }
}

/// GPU-side lighting: uniform buffer and its bind group.
///
/// Lighting is fixed for the lifetime of the renderer.
pub struct Lighting {
    /// Uniform buffer bound at group(2), binding 0.
    pub buffer: wgpu::Buffer,
    /// Layout shared with every pipeline that reads lighting.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over `buffer`.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Upload `options` into a new uniform buffer and build its bind group.
    #[must_use]
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from_options(options);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
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
            });

        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Lighting Bind Group"),
            });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_48_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 48);
    }

    #[test]
    fn srgb_endpoints() {
        assert_eq!(srgb_to_linear([0.0, 1.0, 0.02]), [0.0, 1.0, 0.02 / 12.92]);
        let mid = srgb_to_linear([0.5; 3])[0];
        assert!((mid - 0.214).abs() < 1e-3);
    }

    #[test]
    fn default_light_comes_from_above() {
        let u = LightingUniform::default();
        assert_eq!(u.direction, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(u.ambient[3], 1.0);
        assert_eq!(u.directional[3], 2.0);
    }

    #[test]
    fn zero_direction_falls_back_to_up() {
        let options = LightingOptions {
            light_dir: [0.0; 3],
            ..LightingOptions::default()
        };
        let u = LightingUniform::from_options(&options);
        assert_eq!(u.direction, [0.0, 1.0, 0.0, 0.0]);
    }
}
