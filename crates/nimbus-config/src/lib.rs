//! Nimbus configuration system.
//!
//! TOML-based configuration with full validation. All sections use sensible
//! defaults so partial configs work out of the box. Invalid construction
//! parameters (a zero-point field, a broken palette) fail loading outright;
//! the renderer never sees them.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{NimbusConfig, CONFIG_SCHEMA_VERSION};

use nimbus_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating a default file on
/// first run.
pub fn load_config() -> Result<NimbusConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<NimbusConfig, ConfigError> {
    toml_loader::load_from_path(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &NimbusConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = NimbusConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"window\""));
        assert!(json.contains("\"visualizer\""));
        assert!(json.contains("\"signal\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_to_json_contains_reference_constants() {
        let json = config_to_json(&NimbusConfig::default());
        assert!(json.contains("2000"));
        assert!(json.contains("170.0"));
    }
}
