//! Busy-signal source configuration.

use serde::{Deserialize, Serialize};

/// Where the busy/idle signal comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SignalSource {
    /// Space bar toggles busy/idle.
    #[default]
    Manual,
    /// Demo oscillator that flips on a fixed period.
    Auto,
    /// Line protocol on stdin: `busy`/`idle`/`1`/`0`/`true`/`false`.
    Stdin,
}

/// Busy-signal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub source: SignalSource,
    /// Full busy→idle→busy cycle length for the `auto` source, in seconds.
    pub auto_period_secs: f64,
    /// State the visualizer starts in before the first signal arrives.
    pub initial_busy: bool,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            source: SignalSource::Manual,
            auto_period_secs: 8.0,
            initial_busy: false,
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
    fn signal_defaults() {
        let config = SignalConfig::default();
        assert_eq!(config.source, SignalSource::Manual);
        assert!((config.auto_period_secs - 8.0).abs() < f64::EPSILON);
        assert!(!config.initial_busy);
    }

    #[test]
    fn source_parses_lowercase_names() {
        let config: SignalConfig = toml::from_str(r#"source = "stdin""#).unwrap();
        assert_eq!(config.source, SignalSource::Stdin);
        let config: SignalConfig = toml::from_str(r#"source = "auto""#).unwrap();
        assert_eq!(config.source, SignalSource::Auto);
    }
}
