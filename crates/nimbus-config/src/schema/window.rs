//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Window appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title.
    pub title: String,
    /// Initial logical width in pixels.
    pub width: u32,
    /// Initial logical height in pixels.
    pub height: u32,
    /// Synchronize presentation with the display refresh rate.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Nimbus".into(),
            width: 960,
            height: 720,
            vsync: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
