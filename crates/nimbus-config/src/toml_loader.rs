//! TOML config file loading and creation.

use crate::schema::NimbusConfig;
use crate::validation;
use nimbus_common::ConfigError;
use std::path::Path;
use tracing::info;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields, then
/// validates. A config that fails validation is an error: the caller gets no
/// scene, no buffers, no partially-applied state.
pub fn load_from_path(path: &Path) -> Result<NimbusConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: NimbusConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/nimbus/config.toml`
/// On Linux: `~/.config/nimbus/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<NimbusConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(NimbusConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("nimbus").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> String {
    r##"# Nimbus configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Nimbus"
# width = 960            # 64-16384
# height = 720           # 64-16384
# vsync = true

[visualizer]
# point_count = 2000     # must be divisible by lines.line_count
# sphere_scale = 2.0
# palette = ["#4f8fff", "#8f5fff", "#2fd0c8", "#e0e6ff"]
# point_size = 3.0       # pixels, 0.5-64
# rotation_speed = 0.1   # radians/second, 0-5
# background = "#050510"

[visualizer.lines]
# line_count = 5
# spacing = 0.3
# width = 5.0

[visualizer.ripple]
# frequency = 2.0
# amplitude = 0.3

[visualizer.spring]
# mass = 2.0
# tension = 170.0
# friction = 26.0

[signal]
# source = "manual"      # manual | auto | stdin
# auto_period_secs = 8.0
# initial_busy = false

[logging]
# level = "info"         # trace | debug | info | warn | error
"##
    .to_string()
}

// =============================================================================
// Tests
// =============================================================================
