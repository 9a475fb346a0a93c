//! Game configuration and level loader.
//!
//! Loads settings and brick layouts from YAML files, so levels can be
//! designed and tuned without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! assets/
//! ├── config/
//! │   └── default.yaml
//! └── levels/
//!     ├── test.yaml
//!     └── wall.yaml
//! ```
//!
//! Every setting has a default, so a file only needs the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::shapes::Rectangle;
use crate::types::Vec2;

/// Error type for configuration loading operations.
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            ConfigError::NotFound(name) => write!(f, "Not found: {}", name),
            ConfigError::Invalid(reason) => write!(f, "Invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Top-level game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation ticks per second
    pub fps: u32,
    pub screen_width: u32,
    pub screen_height: u32,
    pub window_title: String,
    pub world: WorldConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 240,
            screen_width: 1024,
            screen_height: 768,
            window_title: "boo".to_string(),
            world: WorldConfig::default(),
        }
    }
}

impl Config {
    /// Check that the settings describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".to_string()));
        }
        self.world.validate()
    }
}

/// Extent of the playing field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            min_x: -10.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 20.0,
        }
    }
}

impl ArenaBounds {
    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::from_bounds(self.min_x, self.max_x, self.min_y, self.max_y)
    }
}

/// Settings of the simulated world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub arena: ArenaBounds,

    /// Pad at rest; its height above the floor never changes
    pub pad: Rectangle,

    pub ball_radius: f64,

    /// Ball speed in world units per second
    pub ball_speed: f64,

    /// Direction the ball leaves the pad in when served
    pub serve_direction: Vec2,

    pub lives: u32,

    /// Most bounces resolved within a single tick
    pub max_bounces: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            arena: ArenaBounds::default(),
            pad: Rectangle::new(Vec2::new(0.0, 2.0), 5.0, 1.0),
            ball_radius: 0.5,
            ball_speed: 12.0,
            serve_direction: Vec2::new(1.0, 1.0),
            lives: 3,
            max_bounces: 8,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = self.arena.to_rectangle();
        let invalid = |reason: &str| Err(ConfigError::Invalid(reason.to_string()));

        if self.arena.min_x >= self.arena.max_x || self.arena.min_y >= self.arena.max_y {
            return invalid("arena must have a positive area");
        }
        if !(self.ball_radius >= 0.0) {
            return invalid("ball_radius must not be negative");
        }
        if 2.0 * self.ball_radius >= arena.width().min(arena.height()) {
            return invalid("ball does not fit in the arena");
        }
        if self.pad.width() > arena.width() {
            return invalid("pad is wider than the arena");
        }
        if !(self.ball_speed > 0.0) {
            return invalid("ball_speed must be positive");
        }
        if self.serve_direction.try_norm().is_none() {
            return invalid("serve_direction must be non-zero");
        }
        if self.max_bounces == 0 {
            return invalid("max_bounces must be at least 1");
        }
        Ok(())
    }
}

// =============================================================================
// Levels
// =============================================================================

/// A brick layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    #[serde(default)]
    pub bricks: Vec<Rectangle>,
}

// =============================================================================
// Loader
// =============================================================================

/// Config and level loader with configurable base directory.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain `config/` and `levels/` subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load and validate settings by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = ConfigLoader::new("assets");
    /// let config = loader.load_config("default")?;
    /// ```
    pub fn load_config(&self, name: &str) -> Result<Config, ConfigError> {
        let config: Config = self.load("config", name)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a level by name.
    pub fn load_level(&self, name: &str) -> Result<Level, ConfigError> {
        self.load("levels", name)
    }

    /// List all available settings files.
    pub fn list_configs(&self) -> Result<Vec<String>, ConfigError> {
        self.list("config")
    }

    /// List all available levels.
    pub fn list_levels(&self) -> Result<Vec<String>, ConfigError> {
        self.list("levels")
    }

    fn load<T: DeserializeOwned>(&self, subdir: &str, name: &str) -> Result<T, ConfigError> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn list(&self, subdir: &str) -> Result<Vec<String>, ConfigError> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
