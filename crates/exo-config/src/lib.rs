//! Configuration for Exoscape.
//!
//! Settings persist to disk as a RON file in the platform config directory.
//! Every section is `#[serde(default)]`, so older or partial files keep loading
//! as fields are added. Command-line flags override what was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AssistantConfig, Config, ControlsConfig, DebugConfig, HabitabilityConfig, RenderConfig,
    ServerConfig, WindowConfig,
};
pub use error::ConfigError;
