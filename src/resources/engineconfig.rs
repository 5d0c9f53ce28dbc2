//! Engine configuration resource.
//!
//! Settings loaded from an INI configuration file, with safe defaults for
//! startup. The animation subsystem reads the pixmap root (the directory
//! image references must stay inside) and the default frame duration here.
//!
//! # Configuration File Format
//!
//! ```ini
//! [resources]
//! pixmap_root = ./assets/pixmaps
//!
//! [animation]
//! default_duration = 1000
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_PIXMAP_ROOT: &str = "./assets/pixmaps";
const DEFAULT_FRAME_DURATION: u32 = 1000;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration resource.
///
/// On startup the host calls [`EngineConfig::load_from_file`]; missing
/// values retain their defaults so a missing or partial file never blocks
/// the game from running.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfig {
    /// Root directory all image references resolve against. Descriptor
    /// lines may never escape it.
    pub pixmap_root: PathBuf,
    /// Display time in milliseconds for frames without an explicit one.
    pub default_frame_duration: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            pixmap_root: PathBuf::from(DEFAULT_PIXMAP_ROOT),
            default_frame_duration: DEFAULT_FRAME_DURATION,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [resources] section
        if let Some(root) = config.get("resources", "pixmap_root") {
            self.pixmap_root = PathBuf::from(root);
        }

        // [animation] section
        if let Some(ms) = config.getuint("animation", "default_duration").ok().flatten() {
            self.default_frame_duration = ms as u32;
        }

        info!(
            "Loaded config: pixmap_root={:?}, default_duration={}ms",
            self.pixmap_root, self.default_frame_duration
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set(
            "resources",
            "pixmap_root",
            Some(self.pixmap_root.display().to_string()),
        );
        config.set(
            "animation",
            "default_duration",
            Some(self.default_frame_duration.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
