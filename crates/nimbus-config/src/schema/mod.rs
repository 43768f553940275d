//! Configuration schema types for Nimbus.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the reference defaults.

mod logging;
mod signal;
mod visualizer;
mod window;

pub use logging::*;
pub use signal::*;
pub use visualizer::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Nimbus.
///
/// All options have sensible defaults matching the reference behavior.
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct NimbusConfig {
    pub window: WindowConfig,
    pub visualizer: VisualizerConfig,
    pub signal: SignalConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_reference_point_field() {
        let config = NimbusConfig::default();
        assert_eq!(config.visualizer.point_count, 2000);
        assert!((config.visualizer.sphere_scale - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.visualizer.lines.line_count, 5);
        assert!((config.visualizer.lines.spacing - 0.3).abs() < f64::EPSILON);
        assert!((config.visualizer.lines.width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_config_has_reference_spring() {
        let config = NimbusConfig::default();
        assert!((config.visualizer.spring.mass - 2.0).abs() < f64::EPSILON);
        assert!((config.visualizer.spring.tension - 170.0).abs() < f64::EPSILON);
        assert!((config.visualizer.spring.friction - 26.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_config_has_reference_motion() {
        let config = NimbusConfig::default();
        assert!((config.visualizer.rotation_speed - 0.1).abs() < f64::EPSILON);
        assert!((config.visualizer.ripple.frequency - 2.0).abs() < f64::EPSILON);
        assert!((config.visualizer.ripple.amplitude - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn default_config_signal_is_manual_idle() {
        let config = NimbusConfig::default();
        assert_eq!(config.signal.source, SignalSource::Manual);
        assert!(!config.signal.initial_busy);
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let config: NimbusConfig = toml::from_str(
            r#"
            [window]
            title = "Test"
            "#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Test");
        // Untouched sections keep their defaults.
        assert_eq!(config.visualizer.point_count, 2000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = NimbusConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: NimbusConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.visualizer.point_count, config.visualizer.point_count);
        assert_eq!(back.visualizer.palette, config.visualizer.palette);
        assert_eq!(back.signal.source, config.signal.source);
    }
}
