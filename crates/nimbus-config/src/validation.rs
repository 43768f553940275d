//! Full configuration validation.
//!
//! Construction parameters are checked before any GPU buffer is allocated;
//! an invalid config is an error returned to the caller, never a silently
//! substituted default.

use crate::schema::NimbusConfig;
use nimbus_common::{Color, ConfigError};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &NimbusConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    let vis = &config.visualizer;

    // Point field constraints. A zero-point field can never allocate.
    validate_range(&mut errors, "visualizer.point_count", vis.point_count, 1, 200_000);
    if vis.lines.line_count == 0 {
        errors.push("visualizer.lines.line_count must be > 0".into());
    } else if vis.point_count % vis.lines.line_count != 0 {
        errors.push(format!(
            "visualizer.point_count ({}) must be divisible by visualizer.lines.line_count ({})",
            vis.point_count, vis.lines.line_count
        ));
    }
    validate_range_f64(&mut errors, "visualizer.lines.spacing", vis.lines.spacing, 0.01, 10.0);
    validate_range_f64(&mut errors, "visualizer.lines.width", vis.lines.width, 0.1, 100.0);

    validate_range_f64(&mut errors, "visualizer.sphere_scale", vis.sphere_scale, 0.1, 100.0);
    validate_range_f64(&mut errors, "visualizer.point_size", vis.point_size, 0.5, 64.0);
    validate_range_f64(&mut errors, "visualizer.rotation_speed", vis.rotation_speed, 0.0, 5.0);

    // Ripple constraints
    validate_range_f64(&mut errors, "visualizer.ripple.frequency", vis.ripple.frequency, 0.0, 64.0);
    validate_range_f64(&mut errors, "visualizer.ripple.amplitude", vis.ripple.amplitude, 0.0, 5.0);

    // Spring constraints: all strictly positive or the integrator degenerates.
    validate_positive(&mut errors, "visualizer.spring.mass", vis.spring.mass);
    validate_positive(&mut errors, "visualizer.spring.tension", vis.spring.tension);
    validate_positive(&mut errors, "visualizer.spring.friction", vis.spring.friction);

    // Colors
    if vis.palette.is_empty() {
        errors.push("visualizer.palette must contain at least one color".into());
    }
    for (i, hex) in vis.palette.iter().enumerate() {
        if Color::from_hex(hex).is_none() {
            errors.push(format!("visualizer.palette[{i}] is not a valid hex color: {hex}"));
        }
    }
    if Color::from_hex(&vis.background).is_none() {
        errors.push(format!(
            "visualizer.background is not a valid hex color: {}",
            vis.background
        ));
    }

    // Window constraints
    validate_range(&mut errors, "window.width", config.window.width, 64, 16_384);
    validate_range(&mut errors, "window.height", config.window.height, 64, 16_384);

    // Signal constraints
    validate_positive(&mut errors, "signal.auto_period_secs", config.signal.auto_period_secs);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, field: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{field} must be in range {min}..={max}, got {value}"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() || value < min || value > max {
        errors.push(format!("{field} must be in range {min}..={max}, got {value}"));
    }
}

fn validate_positive(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{field} must be > 0, got {value}"));
    }
}

// =============================================================================
// Tests
// =============================================================================
