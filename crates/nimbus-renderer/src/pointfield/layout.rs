//! Deterministic point-field layout generation.
//!
//! Runs once per scene; pure functions of (count, scale, line geometry,
//! palette). Both layouts are bit-for-bit reproducible for the same inputs.
//! Only color assignment draws randomness, and only palette membership is
//! guaranteed there.

use rand::Rng;

use nimbus_common::Color;
use nimbus_config::schema::VisualizerConfig;

use crate::gpu::RendererError;
use crate::pointfield::PointVertex;

/// `count` points evenly distributed on a sphere of radius `scale`, via the
/// equal-area golden-angle spiral.
pub fn sphere_layout(count: usize, scale: f32) -> Vec<[f32; 3]> {
    let offset = 2.0 / count as f32;
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());

    (0..count)
        .map(|i| {
            let y = i as f32 * offset - 1.0 + offset * 0.5;
            // Guard the sqrt against rounding below zero at the poles.
            let r = (1.0 - y * y).max(0.0).sqrt();
            let phi = i as f32 * golden_angle;
            [phi.cos() * r * scale, y * scale, phi.sin() * r * scale]
        })
        .collect()
}

/// `count` points partitioned into `line_count` equal horizontal lines of
/// total width `width`, vertically centered with `spacing` between lines.
///
/// Requires `count % line_count == 0`; callers validate before invoking.
pub fn wave_layout(count: usize, line_count: usize, spacing: f32, width: f32) -> Vec<[f32; 3]> {
    let per_line = count / line_count;

    (0..count)
        .map(|i| {
            let line = i / per_line;
            let on_line = i % per_line;
            let x = (on_line as f32 / per_line as f32) * width - width / 2.0;
            let y = line as f32 * spacing - (line_count as f32 * spacing) / 2.0;
            [x, y, 0.0]
        })
        .collect()
}

/// One uniformly random palette color per point.
pub fn assign_colors(count: usize, palette: &[[f32; 3]]) -> Vec<[f32; 3]> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| palette[rng.gen_range(0..palette.len())])
        .collect()
}

/// Build the immutable per-point vertex data for a scene.
///
/// Fails before anything is allocated GPU-side: a zero point count, a
/// partition that does not divide evenly, or an unusable palette is a
/// construction error, not a degraded frame.
pub fn build_field(config: &VisualizerConfig) -> Result<Vec<PointVertex>, RendererError> {
    let count = config.point_count as usize;
    if count == 0 {
        return Err(RendererError::InvalidField("point count is zero".into()));
    }

    let line_count = config.lines.line_count as usize;
    if line_count == 0 {
        return Err(RendererError::InvalidField("line count is zero".into()));
    }
    if count % line_count != 0 {
        return Err(RendererError::InvalidField(format!(
            "point count {count} is not divisible by line count {line_count}"
        )));
    }

    let palette: Vec<[f32; 3]> = config
        .palette
        .iter()
        .map(|hex| {
            Color::from_hex(hex)
                .map(|c| c.as_rgb_f32())
                .ok_or_else(|| RendererError::InvalidField(format!("bad palette color: {hex}")))
        })
        .collect::<Result<_, _>>()?;
    if palette.is_empty() {
        return Err(RendererError::InvalidField("palette is empty".into()));
    }

    let spheres = sphere_layout(count, config.sphere_scale as f32);
    let waves = wave_layout(
        count,
        line_count,
        config.lines.spacing as f32,
        config.lines.width as f32,
    );
    let colors = assign_colors(count, &palette);

    Ok(spheres
        .into_iter()
        .zip(waves)
        .zip(colors)
        .map(|((sphere_pos, wave_pos), color)| PointVertex {
            sphere_pos,
            wave_pos,
            color,
        })
        .collect())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn sphere_layout_point_count() {
        assert_eq!(sphere_layout(1, 1.0).len(), 1);
        assert_eq!(sphere_layout(2000, 2.0).len(), 2000);
    }

    #[test]
    fn sphere_layout_points_lie_on_sphere() {
        for count in [1usize, 7, 100, 2000] {
            for scale in [0.5f32, 1.0, 2.0] {
                for p in sphere_layout(count, scale) {
                    assert!(
                        (norm(p) - scale).abs() < 1e-4,
                        "count={count}, scale={scale}, p={p:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn sphere_layout_is_deterministic() {
        let a = sphere_layout(500, 2.0);
        let b = sphere_layout(500, 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn sphere_layout_spans_both_poles() {
        let pts = sphere_layout(1000, 1.0);
        let min_y = pts.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
        let max_y = pts.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max);
        assert!(min_y < -0.99);
        assert!(max_y > 0.99);
    }

    #[test]
    fn wave_layout_reference_geometry() {
        // The reference configuration: 2000 points over 5 lines.
        let pts = wave_layout(2000, 5, 0.3, 5.0);
        assert_eq!(pts.len(), 2000);

        let per_line = 2000 / 5;
        for line in 0..5 {
            let start = line * per_line;
            let slice = &pts[start..start + per_line];

            // Every point on a line shares its y; lines are spaced 0.3 apart.
            let y = slice[0][1];
            assert!(slice.iter().all(|p| (p[1] - y).abs() < 1e-6));
            let expected_y = line as f32 * 0.3 - (5.0 * 0.3) / 2.0;
            assert!((y - expected_y).abs() < 1e-6);

            // x strictly increases along the line.
            for pair in slice.windows(2) {
                assert!(pair[1][0] > pair[0][0]);
            }

            // Full width is centered on the origin.
            assert!((slice[0][0] - (-2.5)).abs() < 1e-6);
            assert!(slice[per_line - 1][0] < 2.5);
        }
    }

    #[test]
    fn wave_layout_is_deterministic() {
        let a = wave_layout(100, 5, 0.3, 5.0);
        let b = wave_layout(100, 5, 0.3, 5.0);
        assert_eq!(a, b);
    }

    #[test]
    fn wave_layout_is_flat_in_z() {
        assert!(wave_layout(60, 3, 0.3, 5.0).iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn assigned_colors_come_from_palette() {
        let palette = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let colors = assign_colors(500, &palette);
        assert_eq!(colors.len(), 500);
        assert!(colors.iter().all(|c| palette.contains(c)));
    }

    #[test]
    fn build_field_pairs_poses_by_index() {
        let config = VisualizerConfig::default();
        let field = build_field(&config).unwrap();
        assert_eq!(field.len(), 2000);

        let spheres = sphere_layout(2000, config.sphere_scale as f32);
        let waves = wave_layout(2000, 5, 0.3, 5.0);
        for (i, v) in field.iter().enumerate() {
            assert_eq!(v.sphere_pos, spheres[i]);
            assert_eq!(v.wave_pos, waves[i]);
        }
    }

    #[test]
    fn build_field_rejects_zero_count() {
        let mut config = VisualizerConfig::default();
        config.point_count = 0;
        let err = build_field(&config).unwrap_err();
        assert!(err.to_string().contains("point count is zero"));
    }

    #[test]
    fn build_field_rejects_uneven_partition() {
        let mut config = VisualizerConfig::default();
        config.point_count = 2001;
        assert!(build_field(&config).is_err());
    }

    #[test]
    fn build_field_rejects_bad_palette() {
        let mut config = VisualizerConfig::default();
        config.palette = vec!["#zzzzzz".into()];
        assert!(build_field(&config).is_err());

        config.palette = vec![];
        assert!(build_field(&config).is_err());
    }

    #[test]
    fn build_field_colors_are_palette_members() {
        let config = VisualizerConfig::default();
        let palette: Vec<[f32; 3]> = config
            .palette
            .iter()
            .map(|h| Color::from_hex(h).unwrap().as_rgb_f32())
            .collect();
        let field = build_field(&config).unwrap();
        assert!(field.iter().all(|v| palette.contains(&v.color)));
    }
}
