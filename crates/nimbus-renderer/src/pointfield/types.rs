//! Point-field vertex/uniform types, buffer layouts, and the WGSL source.

use nimbus_config::schema::VisualizerConfig;

/// Static per-point data, uploaded once per scene.
///
/// Index i denotes the same physical point in both poses: the sphere and
/// wave coordinates at one index are two poses of one point and are never
/// reassigned independently.
///
/// Layout: sphere(vec3) + wave(vec3) + color(vec3) = 36 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub sphere_pos: [f32; 3],
    pub wave_pos: [f32; 3],
    pub color: [f32; 3],
}

impl PointVertex {
    /// wgpu per-instance buffer layout for `PointVertex`.
    ///
    /// Locations 1-3; location 0 is the billboard corner from the shared
    /// unit-quad vertex buffer.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PointVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            // sphere_pos: vec3<f32> at offset 0
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 1,
            },
            // wave_pos: vec3<f32> at offset 12
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 2,
            },
            // color: vec3<f32> at offset 24
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 24,
                shader_location: 3,
            },
        ],
    };
}

/// Billboard corner vertex (2D offset in units of point size).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CornerVertex {
    pub position: [f32; 2],
}

pub(crate) const CORNER_VERTICES: &[CornerVertex] = &[
    CornerVertex {
        position: [-0.5, -0.5],
    },
    CornerVertex {
        position: [0.5, -0.5],
    },
    CornerVertex {
        position: [0.5, 0.5],
    },
    CornerVertex {
        position: [-0.5, 0.5],
    },
];

pub(crate) const CORNER_INDICES: &[u16] = &[0, 1, 2, 0, 2, 3];

/// The per-frame global uniform block, matching the WGSL `FieldUniforms`.
///
/// This is the only GPU state rewritten after initialization: the scene is
/// described once, then only these globals mutate.
///
/// Layout: 2 × mat4x4 + 8 × f32 = 160 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FieldUniforms {
    /// Camera view-projection matrix (column-major).
    pub view_proj: [f32; 16],
    /// Formation rotation matrix, rebuilt each frame from the spin axis.
    pub model: [f32; 16],

    /// Elapsed seconds since view activation. Monotonic, never reset.
    pub time: f32,
    /// Sphere↔wave blend factor (near [0, 1]; overshoot allowed).
    pub blend: f32,
    /// Ripple spatial frequency along wave x.
    pub ripple_freq: f32,
    /// Ripple peak displacement.
    pub ripple_amp: f32,

    /// Point footprint in pixels (constant, not distance-attenuated).
    pub point_size: f32,
    /// Viewport width in pixels.
    pub viewport_w: f32,
    /// Viewport height in pixels.
    pub viewport_h: f32,
    pub _pad: f32,
}

impl FieldUniforms {
    /// Create uniforms from config with zeroed runtime fields.
    ///
    /// `time`, `blend`, and the matrices are written each frame; the
    /// viewport is written on resize.
    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self {
            view_proj: crate::matrix::IDENTITY,
            model: crate::matrix::IDENTITY,
            time: 0.0,
            blend: 0.0,
            ripple_freq: config.ripple.frequency as f32,
            ripple_amp: config.ripple.amplitude as f32,
            point_size: config.point_size as f32,
            viewport_w: 0.0,
            viewport_h: 0.0,
            _pad: 0.0,
        }
    }

    /// Update viewport dimensions.
    pub fn update_viewport(&mut self, width: u32, height: u32) {
        self.viewport_w = width.max(1) as f32;
        self.viewport_h = height.max(1) as f32;
    }

    /// Write this frame's globals.
    pub fn set_frame(&mut self, time: f32, blend: f32, model: crate::matrix::Mat4) {
        self.time = time;
        self.blend = blend;
        self.model = model;
    }
}

/// WGSL for the point-field pass. The vertex stage runs the whole per-point
/// transform chain: ripple → blend → rotate → project, then offsets the
/// billboard corner after projection so the footprint stays constant in
/// pixels.
pub(crate) const SHADER_SOURCE: &str = r#"
struct FieldUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    time: f32,
    blend: f32,
    ripple_freq: f32,
    ripple_amp: f32,
    point_size: f32,
    viewport_w: f32,
    viewport_h: f32,
    _pad: f32,
};

@group(0) @binding(0)
var<uniform> u: FieldUniforms;

struct VertexInput {
    @location(0) corner: vec2<f32>,
};

struct PointInput {
    @location(1) sphere_pos: vec3<f32>,
    @location(2) wave_pos: vec3<f32>,
    @location(3) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) corner: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, point: PointInput) -> VertexOutput {
    var out: VertexOutput;

    // Traveling ripple displaces the wave pose only.
    let ripple = sin(point.wave_pos.x * u.ripple_freq + u.time) * u.ripple_amp;
    let wave = vec3<f32>(point.wave_pos.x, point.wave_pos.y + ripple, point.wave_pos.z);

    // Blend between poses, then rotate the whole formation.
    let morphed = mix(point.sphere_pos, wave, u.blend);
    let world = u.model * vec4<f32>(morphed, 1.0);
    var clip = u.view_proj * world;

    // Billboard corner applied after projection, scaled by clip.w, so the
    // on-screen footprint is constant pixels regardless of depth.
    clip.x = clip.x + vertex.corner.x * u.point_size * 2.0 * clip.w / u.viewport_w;
    clip.y = clip.y + vertex.corner.y * u.point_size * 2.0 * clip.w / u.viewport_h;

    out.clip_position = clip;
    out.color = point.color;
    out.corner = vertex.corner;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Soft circular footprint. Additive blending lets overlapping points
    // accumulate instead of occlude.
    let r = length(in.corner) * 2.0;
    let falloff = 1.0 - smoothstep(0.6, 1.0, r);
    return vec4<f32>(in.color * falloff, falloff);
}
"#;

// =============================================================================
// Tests
// =============================================================================
