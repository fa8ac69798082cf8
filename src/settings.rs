//! Host settings and preferences
//!
//! Gameplay tunables are compile-time constants (`crate::consts`). These are
//! the knobs of the host: seeding, pacing, the demo player and audio. They
//! are read from a JSON file named by `BRICK_BREAKER_SETTINGS`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TICK_HZ;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "BRICK_BREAKER_SETTINGS";

/// Fixed tick rates accepted from a settings file (Hz)
pub const MIN_TICK_HZ: f32 = 1.0;
pub const MAX_TICK_HZ: f32 = 1000.0;

/// How simulation ticks relate to rendered frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Timestep {
    /// One tick per frame; game speed follows the frame rate
    #[default]
    PerFrame,
    /// Fixed tick rate independent of the frame rate
    Fixed { hz: f32 },
}

/// Failure to read or write a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    /// Well-formed but unusable values
    Invalid { path: PathBuf, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "cannot access settings file {}: {}", path.display(), source)
            }
            SettingsError::Parse { path, source } => {
                write!(f, "invalid settings file {}: {}", path.display(), source)
            }
            SettingsError::Invalid { path, reason } => {
                write!(f, "unusable settings in {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Parse { source, .. } => Some(source),
            SettingsError::Invalid { .. } => None,
        }
    }
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,
    pub timestep: Timestep,
    /// Stop after this many frames (unbounded when absent)
    pub max_frames: Option<u64>,
    /// Sleep to hold the frame rate instead of running flat out
    pub realtime: bool,
    /// Let the demo player drive the controls
    pub autopilot: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    /// Output sample rate (Hz)
    pub sample_rate: u32,
    /// Raw 16-bit PCM track looped in the background; silence when absent
    pub music_track: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            timestep: Timestep::PerFrame,
            max_frames: Some(20 * DEFAULT_TICK_HZ as u64 * 60),
            realtime: false,
            autopilot: true,

            // Audio
            master_volume: 0.8,
            music_volume: 0.7,
            muted: false,
            sample_rate: 44_100,
            music_track: None,
        }
    }
}

impl Settings {
    /// Gain applied to music samples
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load from the file named by `BRICK_BREAKER_SETTINGS`, falling back to
    /// defaults when it is unset or unusable
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.check().map_err(|reason| SettingsError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), String> {
        match self.timestep {
            Timestep::Fixed { hz } if !(MIN_TICK_HZ..=MAX_TICK_HZ).contains(&hz) => Err(format!(
                "fixed tick rate {} Hz is outside {}-{} Hz",
                hz, MIN_TICK_HZ, MAX_TICK_HZ
            )),
            _ => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("brick-breaker-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "seed": 7, "timestep": { "mode": "fixed", "hz": 30.0 } }"#)
            .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.timestep, Timestep::Fixed { hz: 30.0 });
        assert_eq!(settings.master_volume, Settings::default().master_volume);
        assert!(settings.autopilot);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        let settings = Settings {
            muted: true,
            music_track: Some(PathBuf::from("music/theme.raw")),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_errors_name_the_file() {
        let missing = temp_path("missing");
        let err = Settings::load_from(&missing).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("missing"));

        let bad = temp_path("bad");
        fs::write(&bad, "{ not json").unwrap();
        let err = Settings::load_from(&bad).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        let _ = fs::remove_file(&bad);
    }

    #[test]
    fn test_rejects_unusable_tick_rate() {
        let path = temp_path("tiny-hz");
        fs::write(&path, r#"{ "timestep": { "mode": "fixed", "hz": 1e-30 } }"#).unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }));
        assert!(err.to_string().contains("tick rate"));

        fs::write(&path, r#"{ "timestep": { "mode": "fixed", "hz": 5000 } }"#).unwrap();
        assert!(Settings::load_from(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_effective_music_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_music_volume() - 0.56).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_music_volume(), 0.0);
    }
}
