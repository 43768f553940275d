//! Scene wiring: GPU context + point-field pipeline + per-frame globals.

use std::sync::Arc;
use winit::window::Window;

use nimbus_common::Color;
use nimbus_config::NimbusConfig;

use crate::gpu::{GpuContext, RendererError};
use crate::matrix;
use crate::pointfield::{build_field, FieldUniforms, PointFieldPipeline};
use crate::scheduler::FrameInputs;

/// The formation spins about the vertical axis.
const SPIN_AXIS: [f32; 3] = [0.0, 1.0, 0.0];

/// Camera: fixed perspective looking down -Z at the formation.
const CAMERA_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
const CAMERA_DISTANCE: f32 = 6.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 100.0;

/// Fully initialized render state for one view activation.
///
/// Construction compiles the pipeline and uploads the immutable point
/// buffers; afterwards only the small uniform block changes. Dropping the
/// scene releases every GPU resource.
pub struct SceneRenderer {
    pub gpu: GpuContext,
    field: PointFieldPipeline,
    uniforms: FieldUniforms,
    clear_color: wgpu::Color,
    rotation_speed: f32,
}

impl SceneRenderer {
    /// Create a fully initialized scene from a window and config.
    ///
    /// Fails fast, before any buffer exists, on an invalid point field and
    /// on a missing GPU-class adapter.
    pub async fn new(window: Arc<Window>, config: &NimbusConfig) -> Result<Self, RendererError> {
        // Field construction first: a bad config never touches the GPU.
        let points = build_field(&config.visualizer)?;

        let gpu = GpuContext::new(window, config.window.vsync).await?;

        let mut uniforms = FieldUniforms::from_config(&config.visualizer);
        uniforms.update_viewport(gpu.size.width, gpu.size.height);
        uniforms.view_proj = camera_matrix(gpu.size.width, gpu.size.height);

        let field = PointFieldPipeline::new(&gpu.device, gpu.format(), &points, &uniforms);
        tracing::info!("point field ready: {} points", field.point_count());

        let clear_color = Color::from_hex(&config.visualizer.background)
            .map(|c| {
                let [r, g, b] = c.as_linear_rgb();
                wgpu::Color { r, g, b, a: 1.0 }
            })
            .unwrap_or(wgpu::Color::BLACK);

        Ok(Self {
            gpu,
            field,
            uniforms,
            clear_color,
            rotation_speed: config.visualizer.rotation_speed as f32,
        })
    }

    /// Handle a window resize: reconfigure the surface and the camera.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.uniforms.update_viewport(width, height);
        self.uniforms.view_proj = camera_matrix(width, height);
    }

    /// Render one frame from this tick's global inputs.
    ///
    /// Per-point work happens on the GPU; here we only rebuild the rotation
    /// matrix, rewrite the uniform block, and encode one pass.
    pub fn render_frame(&mut self, inputs: &FrameInputs) -> Result<(), RendererError> {
        let model = spin_matrix(inputs.elapsed, self.rotation_speed)?;
        self.uniforms.set_frame(inputs.elapsed, inputs.blend, model);
        self.field.update_uniforms(&self.gpu.queue, &self.uniforms);

        let output = match self.gpu.current_texture() {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("failed to get surface texture: {e}");
                return Err(RendererError::SurfaceError(e.to_string()));
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("nimbus frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("nimbus point field pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.field.render(&mut pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn point_count(&self) -> u32 {
        self.field.point_count()
    }
}

/// View-projection for the fixed camera at the given viewport size.
fn camera_matrix(width: u32, height: u32) -> matrix::Mat4 {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    let proj = matrix::perspective(CAMERA_FOV_Y, aspect, CAMERA_NEAR, CAMERA_FAR);
    let view = matrix::translate(0.0, 0.0, -CAMERA_DISTANCE);
    matrix::mul(&proj, &view)
}

/// Formation rotation for the given elapsed time.
///
/// The axis is constant, but it is still re-normalized inside
/// `rotate_axis_angle`; a degenerate axis surfaces as an error instead of a
/// NaN frame.
fn spin_matrix(elapsed: f32, rotation_speed: f32) -> Result<matrix::Mat4, RendererError> {
    matrix::rotate_axis_angle(SPIN_AXIS, elapsed * rotation_speed)
        .ok_or(RendererError::DegenerateAxis)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::transform_point;

    #[test]
    fn camera_matrix_depends_on_aspect() {
        let wide = camera_matrix(1920, 1080);
        let square = camera_matrix(800, 800);
        assert!((wide[0] - square[0]).abs() > 1e-6);
    }

    #[test]
    fn camera_matrix_places_origin_in_front_of_camera() {
        let m = camera_matrix(800, 600);
        // Clip coordinates of the formation center (0,0,0,1) are column 3.
        let z = m[14];
        let w = m[15];
        // clip w equals the camera distance; the center sits between the
        // near and far planes (|z/w| < 1).
        assert!((w - CAMERA_DISTANCE).abs() < 1e-4);
        assert!((z / w).abs() < 1.0);
    }

    #[test]
    fn spin_matrix_at_zero_elapsed_is_identity() {
        let m = spin_matrix(0.0, 0.1).unwrap();
        let p = transform_point(&m, [1.0, 2.0, 3.0]);
        assert!((p[0] - 1.0).abs() < 1e-6);
        assert!((p[1] - 2.0).abs() < 1e-6);
        assert!((p[2] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn spin_matrix_preserves_height_and_radius() {
        let m = spin_matrix(37.0, 0.1).unwrap();
        let p = transform_point(&m, [1.5, 0.7, -0.2]);
        // Rotation about Y keeps y and the horizontal radius.
        assert!((p[1] - 0.7).abs() < 1e-5);
        let r_in = (1.5f32 * 1.5 + 0.2 * 0.2).sqrt();
        let r_out = (p[0] * p[0] + p[2] * p[2]).sqrt();
        assert!((r_in - r_out).abs() < 1e-4);
    }

    #[test]
    fn spin_matrix_advances_with_time() {
        let a = spin_matrix(1.0, 0.1).unwrap();
        let b = spin_matrix(20.0, 0.1).unwrap();
        let diff: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum();
        assert!(diff > 0.01, "rotation should change with elapsed time");
    }
}
