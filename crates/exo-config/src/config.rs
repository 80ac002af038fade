//! Configuration sections with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";
const APP_DIR: &str = "exoscape";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    /// Starting values for the keyboard-driven local controls.
    pub controls: ControlsConfig,
    pub habitability: HabitabilityConfig,
    pub assistant: AssistantConfig,
    /// Local reflection endpoint.
    pub server: ServerConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Base window title. The stats readout is appended to it.
    pub title: String,
}

/// Scene and rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Width and height segment count of every layer sphere.
    pub sphere_segments: u32,
    /// Number of backdrop stars.
    pub star_count: u32,
    /// Seed for star placement. `None` seeds from the clock.
    pub star_seed: Option<u64>,
    /// Initial camera distance from the planet center.
    pub camera_distance: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Directory that texture paths are resolved against.
    pub asset_dir: PathBuf,
}

/// Defaults and step size for the local parameter controls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub temperature: f32,
    pub sun_proximity: f32,
    pub vegetation: f32,
    pub sea_level: f32,
    pub brightness: f32,
    /// Amount one key press moves a control.
    pub step: f32,
}

/// Habitability scoring service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HabitabilityConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// Quiet period after the last parameter change before a request is sent.
    pub debounce_ms: u64,
    pub timeout_seconds: u64,
}

/// Generative-answer service used by the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,
    pub port: u16,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "Exoscape".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sphere_segments: 50,
            star_count: 1000,
            star_seed: None,
            camera_distance: 15.0,
            fov_degrees: 75.0,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            sun_proximity: 0.5,
            vegetation: 0.2,
            sea_level: 1.0,
            brightness: 1.0,
            step: 0.05,
        }
    }
}

impl Default for HabitabilityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nasaspaceapps-0xn3.onrender.com/receiveData".to_string(),
            debounce_ms: 500,
            timeout_seconds: 10,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "EXOSCAPE_ASSISTANT_KEY".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 5000,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for Exoscape (`<config_dir>/exoscape`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_DIR))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-read the file; `Some(new_config)` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
