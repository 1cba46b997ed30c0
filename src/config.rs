//! Runtime settings loaded from `wave_shooter.toml`.
//!
//! Every key is optional; missing keys fall back to [`Settings::default`], so a
//! file containing only `difficulty = "hard"` is valid.  The path can be
//! overridden with the `WAVE_SHOOTER_CONFIG` environment variable.
//!
//! ```toml
//! difficulty = "normal"        # easy | normal | hard | extreme
//! device_profile = "desktop"   # desktop | tablet | phone
//! particle_quality = "medium"  # low | medium | high
//! playfield_width = 960.0
//! playfield_height = 540.0
//! frame_rate_hz = 60          # redraw rate; the game itself always runs at 60 ticks/s
//! seed = 42                    # omit for a random game
//! log_file = "wave_shooter.log"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::difficulty::Difficulty;
use crate::error::{GameError, GameResult};
use crate::geometry::Playfield;
use crate::tuning::{DeviceProfile, ParticleQuality};

pub const DEFAULT_CONFIG_PATH: &str = "wave_shooter.toml";
pub const CONFIG_PATH_ENV: &str = "WAVE_SHOOTER_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Resolved with [`Difficulty::from_name`]; unknown names mean `normal`.
    pub difficulty: String,
    pub device_profile: DeviceProfile,
    pub particle_quality: ParticleQuality,
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// How often the front-end polls input and redraws.  Game speed is
    /// fixed at [`crate::tuning::TICKS_PER_SECOND`] regardless.
    pub frame_rate_hz: u32,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: "normal".to_string(),
            device_profile: DeviceProfile::Desktop,
            particle_quality: ParticleQuality::Medium,
            playfield_width: 960.0,
            playfield_height: 540.0,
            frame_rate_hz: 60,
            seed: None,
            log_file: PathBuf::from("wave_shooter.log"),
        }
    }
}

impl Settings {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_name(&self.difficulty)
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.playfield_width.max(1.0), self.playfield_height.max(1.0))
    }

    pub fn parse(contents: &str) -> GameResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a settings file.
    pub fn from_file(path: &Path) -> GameResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Load settings, never failing: a missing file or a parse error yields
    /// the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load settings; using defaults");
                Self::default()
            }
        }
    }

    /// The settings path: `$WAVE_SHOOTER_CONFIG` or `wave_shooter.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
