//! On-disk locations for config and logs.

use std::io;
use std::path::{Path, PathBuf};

use exo_config::{Config, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not determine config directory: {0}")]
    NoConfigDir(#[from] ConfigError),

    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where Exoscape keeps `config.ron` and its log files.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Use `override_dir` when given, the OS config directory otherwise.
    /// Nothing is created on disk.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, PlatformError> {
        let config_dir = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => Config::default_dir()?,
        };
        Ok(Self::resolve_with_root(&config_dir))
    }

    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
