//! Point-field visualizer configuration types.

use serde::{Deserialize, Serialize};

/// Layout of the busy-state wave formation: horizontal lines of points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineFieldConfig {
    /// Number of horizontal lines the points are partitioned into.
    pub line_count: u32,
    /// Vertical spacing between adjacent lines, in world units.
    pub spacing: f64,
    /// Total horizontal extent of each line, in world units.
    pub width: f64,
}

impl Default for LineFieldConfig {
    fn default() -> Self {
        Self {
            line_count: 5,
            spacing: 0.3,
            width: 5.0,
        }
    }
}

/// Traveling ripple applied to the wave formation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    /// Spatial frequency along x (radians per world unit).
    pub frequency: f64,
    /// Peak vertical displacement in world units.
    pub amplitude: f64,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            frequency: 2.0,
            amplitude: 0.3,
        }
    }
}

/// Damped spring driving the sphere↔wave blend factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub mass: f64,
    pub tension: f64,
    pub friction: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 2.0,
            tension: 170.0,
            friction: 26.0,
        }
    }
}

/// Point-field visualizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Number of points in the field. Fixed for the lifetime of a scene.
    pub point_count: u32,
    /// Radius of the idle sphere formation, in world units.
    pub sphere_scale: f64,
    /// Hex colors points are randomly assigned from.
    pub palette: Vec<String>,
    /// On-screen footprint of each point, in pixels. Not distance-attenuated.
    pub point_size: f64,
    /// Rotation of the whole formation, radians per second.
    pub rotation_speed: f64,
    /// Background clear color (hex).
    pub background: String,
    pub lines: LineFieldConfig,
    pub ripple: RippleConfig,
    pub spring: SpringConfig,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            point_count: 2000,
            sphere_scale: 2.0,
            palette: vec![
                "#4f8fff".into(),
                "#8f5fff".into(),
                "#2fd0c8".into(),
                "#e0e6ff".into(),
            ],
            point_size: 3.0,
            rotation_speed: 0.1,
            background: "#050510".into(),
            lines: LineFieldConfig::default(),
            ripple: RippleConfig::default(),
            spring: SpringConfig::default(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visualizer_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.point_count, 2000);
        assert_eq!(config.palette.len(), 4);
        assert!((config.point_size - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.background, "#050510");
    }

    #[test]
    fn partial_visualizer_toml_keeps_nested_defaults() {
        let config: VisualizerConfig = toml::from_str(
            r#"
            point_count = 500

            [ripple]
            amplitude = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.point_count, 500);
        assert!((config.ripple.amplitude - 0.5).abs() < f64::EPSILON);
        // Untouched nested fields keep defaults.
        assert!((config.ripple.frequency - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.lines.line_count, 5);
        assert!((config.spring.tension - 170.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_palette_is_valid_hex() {
        for hex in VisualizerConfig::default().palette {
            assert!(
                nimbus_common::Color::from_hex(&hex).is_some(),
                "default palette entry {hex} must parse"
            );
        }
    }
}
