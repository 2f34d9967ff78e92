//! Game settings and preferences
//!
//! Loaded from a JSON file by the native runner, or handed over as a JSON
//! string by the browser page.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::consts::{PADDLE_INTERVAL_MS, PADDLE_STEP};

/// Keys that drive the paddle and the pause toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Held to move left
    pub left: String,
    /// Held to move right
    pub right: String,
    /// Pressed to toggle pause
    pub pause: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "a".to_string(),
            right: "d".to_string(),
            pause: "p".to_string(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,

    // === Paddle ===
    /// Distance per paddle timer fire
    pub paddle_step: f32,
    /// Paddle timer period (ms)
    pub paddle_interval_ms: u64,

    // === Host ===
    /// Frames per second for the headless runner
    pub frame_rate: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),

            paddle_step: PADDLE_STEP,
            paddle_interval_ms: PADDLE_INTERVAL_MS,

            frame_rate: 60,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn paddle_interval(&self) -> Duration {
        Duration::from_millis(self.paddle_interval_ms)
    }

    /// Wall time of one host frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.paddle_interval_ms == 0 {
            return Err(anyhow!("paddle_interval_ms must be > 0"));
        }
        if !self.paddle_step.is_finite() || self.paddle_step <= 0.0 {
            return Err(anyhow!("paddle_step must be > 0, got {}", self.paddle_step));
        }
        if self.frame_rate == 0 {
            return Err(anyhow!("frame_rate must be > 0"));
        }
        for (name, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("{name} must be within 0.0..=1.0, got {value}"));
            }
        }
        let keys = &self.keys;
        if keys.left.is_empty() || keys.right.is_empty() || keys.pause.is_empty() {
            return Err(anyhow!("key bindings must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize settings")
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("bad settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
