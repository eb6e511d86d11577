//! Engine configuration resource.
//!
//! Settings come from an INI file, then environment variables, then CLI
//! flags, each layer overriding the previous one. The file layout:
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! vsync = true
//!
//! [resources]
//! host = ./assets
//! directory = pack
//!
//! [debug]
//! collision = false
//! ```
//!
//! Environment overrides: `PACKHORSE_RES_HOST`, `PACKHORSE_RES_DIR`,
//! `PACKHORSE_DEBUG_COLLISION` (truthy values: `1`, `true`, `yes`, `on`).

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./packhorse.ini";

pub const ENV_RES_HOST: &str = "PACKHORSE_RES_HOST";
pub const ENV_RES_DIR: &str = "PACKHORSE_RES_DIR";
pub const ENV_DEBUG_COLLISION: &str = "PACKHORSE_DEBUG_COLLISION";

/// Engine configuration resource.
///
/// Window settings feed the raylib init; the resource host/directory feed
/// [`ResourceRoot`](crate::resources::resourceroot::ResourceRoot); the
/// collision flag decides whether the
/// [`CollisionDebug`](crate::resources::collisiondebug::CollisionDebug)
/// resource is inserted at startup.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Resource host prefix, if configured.
    pub resource_host: Option<String>,
    /// Resource directory segment, if configured.
    pub resource_directory: Option<String>,
    /// Start with collision overlays enabled.
    pub debug_collision: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            resource_host: None,
            resource_directory: None,
            debug_collision: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration backed by a custom file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Returns an
    /// error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [resources] section
        if let Some(host) = config.get("resources", "host") {
            self.resource_host = Some(host);
        }
        if let Some(directory) = config.get("resources", "directory") {
            self.resource_directory = Some(directory);
        }

        // [debug] section
        if let Some(collision) = config.getbool("debug", "collision").ok().flatten() {
            self.debug_collision = collision;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, host={:?}, dir={:?}, debug_collision={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.resource_host,
            self.resource_directory,
            self.debug_collision
        );

        Ok(())
    }

    /// Save configuration to the INI file. Creates the file if missing.
    #[allow(dead_code)]
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("resources", "host", self.resource_host.clone());
        config.set("resources", "directory", self.resource_directory.clone());

        config.set("debug", "collision", Some(self.debug_collision.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Apply environment-variable overrides on top of whatever the file
    /// provided. Unset variables leave values untouched.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var(ENV_RES_HOST) {
            info!("{} overrides resource host", ENV_RES_HOST);
            self.resource_host = Some(host);
        }
        if let Ok(dir) = std::env::var(ENV_RES_DIR) {
            info!("{} overrides resource directory", ENV_RES_DIR);
            self.resource_directory = Some(dir);
        }
        if let Ok(flag) = std::env::var(ENV_DEBUG_COLLISION) {
            self.debug_collision = is_truthy(&flag);
        }
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(is_truthy("yes"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn defaults_leave_resources_unset() {
        let config = EngineConfig::new();
        assert_eq!(config.resource_host, None);
        assert_eq!(config.resource_directory, None);
        assert!(!config.debug_collision);
        assert_eq!(config.window_size(), (1280, 720));
    }
}
