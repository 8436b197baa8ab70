//! Game settings and preferences
//!
//! Read as JSON: LocalStorage on the web, a file named by the
//! `BRICK_BREAKER_SETTINGS` environment variable on native.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Opacity of the final frame once a run has ended
pub const ENDED_ALPHA: f32 = 0.65;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,
    /// Fixed run seed (random per session when unset)
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Drop shadows under bricks, paddle and ball
    pub shadows: bool,
    /// Global alpha for the frame shown after the run ends
    pub ended_alpha: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            seed: None,
            shadows: true,
            ended_alpha: ENDED_ALPHA,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_settings";

    /// Environment variable naming the native settings file
    pub const PATH_ENV: &'static str = "BRICK_BREAKER_SETTINGS";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Ended-frame alpha limited to [0, 1]
    pub fn effective_ended_alpha(&self) -> f32 {
        if self.ended_alpha.is_finite() {
            self.ended_alpha.clamp(0.0, 1.0)
        } else {
            ENDED_ALPHA
        }
    }

    /// Parse stored JSON, falling back to defaults with a warning
    fn parse_or_default(json: &str, source: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", source);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings in {}: {}", source, e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::parse_or_default(&json, "LocalStorage");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `BRICK_BREAKER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_or_default(&json, &path),
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}
