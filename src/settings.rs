//! Game settings and preferences
//!
//! Read from a JSON file at startup. Missing fields take their defaults; a
//! missing or malformed file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::AudioMixer;
use crate::consts::TICK_RATE;
use crate::level::LevelCatalog;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Presentation frames per second
    pub frame_rate: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Content ===
    /// Directory of `level_N.txt` files (built-in levels when unset)
    pub levels_dir: Option<PathBuf>,
    /// RNG seed (random per run when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            frame_rate: 60,
            master_volume: 0.8,
            muted: false,
            levels_dir: None,
            seed: None,
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    pub const DEFAULT_PATH: &'static str = "brick_breaker.json";

    /// Parse settings, sanitizing out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tick_rate = settings.tick_rate.max(1);
        settings.frame_rate = settings.frame_rate.max(1);
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Malformed settings in {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn mixer(&self) -> AudioMixer {
        let mut mixer = AudioMixer::new(self.master_volume);
        mixer.set_muted(self.muted);
        mixer
    }

    pub fn level_catalog(&self) -> LevelCatalog {
        match &self.levels_dir {
            Some(dir) => LevelCatalog::from_dir(dir),
            None => LevelCatalog::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true, "seed": 42 }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.tick_rate, 120);
        assert!(settings.levels_dir.is_none());
        assert!(!settings.mixer().is_audible(SoundEffect::LifeLost));
    }

    #[test]
    fn test_out_of_range_values_sanitized() {
        let settings =
            Settings::from_json(r#"{ "tick_rate": 0, "master_volume": 4.0 }"#).unwrap();
        assert_eq!(settings.tick_rate, 1);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_load_missing_file() {
        let settings = Settings::load(Path::new("/nonexistent/brick_breaker.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join("brick_breaker_malformed_settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let settings = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_defaults_match_tick_rate() {
        let settings = Settings::default();
        assert_eq!(settings.tick_rate, crate::consts::TICK_RATE);
        assert!(settings.mixer().is_audible(SoundEffect::PaddleHit));
    }
}
