//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log verbosity settings. The CLI `--log-level` flag overrides this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter level: trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_defaults_to_info() {
        assert_eq!(LoggingConfig::default().level, "info");
    }
}
