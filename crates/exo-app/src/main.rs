//! `exoscape`: opens the visualizer window, or answers one assistant
//! question with `--ask` and exits.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags:
//! `exoscape --planet Kepler-22b --stars 2000 --offline`.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use exo_app::{PlanetSession, PlatformDirs, run_with_config};
use exo_config::{CliArgs, Config};
use exo_habitability::{
    AssistantClient, GenerativeAssistant, HabitabilityWorker, HttpHabitabilityClient,
};
use exo_planet::catalog;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    exo_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let entries = catalog();
    let start = match args.planet.as_deref() {
        Some(name) => match entries.iter().position(|e| e.name.eq_ignore_ascii_case(name)) {
            Some(index) => index,
            None => {
                error!("Unknown planet '{name}'");
                return ExitCode::FAILURE;
            }
        },
        None => 0,
    };

    if let Some(question) = args.ask.as_deref() {
        let assistant = GenerativeAssistant::from_config(&config.assistant);
        return match assistant.answer(question, entries[start].name) {
            Some(answer) => {
                println!("{answer}");
                ExitCode::SUCCESS
            }
            None => {
                error!("The question is empty");
                ExitCode::FAILURE
            }
        };
    }

    let worker = if config.habitability.enabled {
        let client = HttpHabitabilityClient::from_config(&config.habitability);
        info!(endpoint = client.endpoint(), "Habitability scoring enabled");
        match HabitabilityWorker::spawn(Box::new(client)) {
            Ok(worker) => Some(worker),
            Err(e) => {
                warn!("Habitability worker unavailable: {e}");
                None
            }
        }
    } else {
        info!("Habitability scoring disabled");
        None
    };

    let session = match PlanetSession::new(
        entries,
        start,
        &config.controls,
        worker,
        Duration::from_millis(config.habitability.debounce_ms),
        Instant::now(),
    ) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to mount planet: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_with_config(config, session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Event loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
