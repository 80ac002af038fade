//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Exoscape command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "exoscape", about = "Exoplanet visualizer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Number of backdrop stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Directory containing planet textures.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Habitability service URL.
    #[arg(long)]
    pub habitability_url: Option<String>,

    /// Skip habitability requests entirely.
    #[arg(long)]
    pub offline: bool,

    /// Serve the reflection endpoint on this port.
    #[arg(long)]
    pub serve: Option<u16>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog planet to open with (e.g. "Kepler-22b").
    #[arg(long)]
    pub planet: Option<String>,

    /// Ask the assistant a question about the planet, print the answer and exit.
    #[arg(long)]
    pub ask: Option<String>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(stars) = args.stars {
            self.render.star_count = stars;
        }
        if let Some(ref dir) = args.assets {
            self.render.asset_dir = dir.clone();
        }
        if let Some(ref url) = args.habitability_url {
            self.habitability.endpoint = url.clone();
        }
        if args.offline {
            self.habitability.enabled = false;
        }
        if let Some(port) = args.serve {
            self.server.enabled = true;
            self.server.port = port;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
