//! Settings
//!
//! Defaults, optionally overridden by a RON settings file, optionally
//! overridden again by command-line flags.
//!
//! ```ron
//! (
//!     player_speed: 2.0,
//!     zoom: 3.0,
//!     window: (width: 1280, height: 720),
//! )
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Highest accepted frame rate
pub const MAX_FPS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Target frames per second; also sets the length of the frame counter
    pub fps: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 480,
            title: "Tilewalk".to_string(),
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pixels per tick along each held direction
    pub player_speed: f32,
    /// Start with the music paused
    pub start_muted: bool,
    pub zoom: f32,
    pub map_file: PathBuf,
    /// Root of the sprite sheets and music
    pub asset_dir: PathBuf,
    /// Background track, relative to `asset_dir`
    pub music_file: PathBuf,
    pub window: WindowSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_speed: 1.4,
            start_muted: false,
            zoom: 2.0,
            map_file: PathBuf::from("res/one.map"),
            asset_dir: PathBuf::from("res"),
            music_file: PathBuf::from("Avery's Farm Loopable.ogg"),
            window: WindowSettings::default(),
        }
    }
}

impl Settings {
    /// Read a RON settings file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text, path)
    }

    /// Parse settings text; `origin` is only used in error messages
    pub fn from_ron(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            let reason = format!("{} is not a non-negative number", self.player_speed);
            return Err(invalid("player_speed", reason));
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(invalid("zoom", format!("{} is not a positive number", self.zoom)));
        }
        if self.window.fps == 0 || self.window.fps > MAX_FPS {
            return Err(invalid(
                "window.fps",
                format!("{} is outside 1..={}", self.window.fps, MAX_FPS),
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid(
                "window",
                format!("{}x{} has no area", self.window.width, self.window.height),
            ));
        }
        Ok(())
    }

    pub fn music_path(&self) -> PathBuf {
        self.asset_dir.join(&self.music_file)
    }
}

fn invalid(name: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { name, reason }
}

#[derive(Parser, Debug)]
#[command(name = "tilewalk", version, about = "Walk around a tile map")]
pub struct Cli {
    /// RON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start the game without background music
    #[arg(long)]
    pub no_music: bool,

    /// Player speed in pixels per tick
    #[arg(short, long)]
    pub speed: Option<f32>,

    /// Camera zoom
    #[arg(short, long)]
    pub zoom: Option<f32>,

    /// Map file to load
    #[arg(long, visible_alias = "mf")]
    pub map_file: Option<PathBuf>,

    /// Directory holding the sprite sheets and music
    #[arg(long)]
    pub asset_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, then the settings file, then flags
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if self.no_music {
            settings.start_muted = true;
        }
        if let Some(speed) = self.speed {
            settings.player_speed = speed;
        }
        if let Some(zoom) = self.zoom {
            settings.zoom = zoom;
        }
        if let Some(map_file) = &self.map_file {
            settings.map_file = map_file.clone();
        }
        if let Some(asset_dir) = &self.asset_dir {
            settings.asset_dir = asset_dir.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}
