//! Voxtrim - voice recording trim and effect pipeline.
//!
//! Decodes a compressed recording, keeps a fractional region of it, renders
//! one of a fixed set of voice effects, and encodes the result as a 16-bit
//! PCM WAV file. A min/max waveform summary is available for drawing trim
//! handles over the recording.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{Cli, Command, ConfigAction};
use config::{Config, config_file_path, load_config_file, load_default_config, save_config};
use pipeline::CancellationToken;
use std::path::{Path, PathBuf};
use tracing::warn;

pub use audio::{AudioBuffer, TrimRegion, WaveformPoint};
pub use effects::EffectSpec;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, ProcessOutcome, Stage, process, process_or_fallback};

/// Main entry point for the voxtrim CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    // First Ctrl+C stops the pipeline before its next stage, a second one exits.
    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if handler_token.is_cancelled() {
            std::process::exit(130); // 128 + SIGINT(2)
        }
        handler_token.cancel();
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    match cli.command {
        Command::Config { action } => handle_config_command(action, cli.config.as_deref()),
        Command::Process(args) => {
            let config = load_config(cli.config.as_deref())?;
            cli::run_process(&args, &config, &cancel, !cli.quiet)
        }
        Command::Waveform(args) => {
            let config = load_config(cli.config.as_deref())?;
            cli::run_waveform(&args, &config)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout is reserved for JSON output.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config_file(path),
        None => load_default_config(),
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit.map_or_else(config_file_path, |path| Ok(path.to_path_buf()))
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = resolve_config_path(explicit)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(explicit)?;
            let contents = toml::to_string_pretty(&config)
                .map_err(|source| Error::ConfigSerialize { source })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = resolve_config_path(explicit)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
