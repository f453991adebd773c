//! CLI argument definitions.

use crate::cli::validators::parse_percent;
use crate::constants::MAX_WAVEFORM_WIDTH;
use crate::effects::EffectSpec;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Trim voice recordings, apply a voice effect, and encode them as WAV.
#[derive(Debug, Parser)]
#[command(name = "voxtrim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file (default: platform config directory).
    #[arg(long, global = true, env = "VOXTRIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors, and hide the progress spinner.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Trim a recording, apply an effect, and write a WAV file.
    Process(ProcessArgs),
    /// Print min/max waveform data for a recording as JSON.
    Waveform(WaveformArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the process command.
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Compressed recording to process (mp3, m4a, ogg, flac, wav).
    pub input: PathBuf,

    /// Where to write the result.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Trim start handle, in percent of the recording.
    #[arg(long, default_value = "0", value_parser = parse_percent)]
    pub start: f64,

    /// Trim end handle, in percent of the recording.
    #[arg(long, default_value = "100", value_parser = parse_percent)]
    pub end: f64,

    /// Voice effect (none, storyteller, warm, clear, gentle).
    #[arg(short, long, env = "VOXTRIM_EFFECT")]
    pub effect: Option<EffectSpec>,

    /// Write the original recording if processing fails.
    #[arg(long, overrides_with = "no_fallback")]
    pub fallback: bool,

    /// Fail instead of writing the original recording.
    #[arg(long, overrides_with = "fallback")]
    pub no_fallback: bool,
}

impl ProcessArgs {
    /// Fallback setting from the command line, if one was given.
    #[must_use]
    pub fn fallback_override(&self) -> Option<bool> {
        if self.fallback {
            Some(true)
        } else if self.no_fallback {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the waveform command.
#[derive(Debug, Args)]
pub struct WaveformArgs {
    /// Compressed recording to sample.
    pub input: PathBuf,

    /// Number of pixel buckets.
    #[arg(
        short,
        long,
        env = "VOXTRIM_WAVEFORM_WIDTH",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WAVEFORM_WIDTH))
    )]
    pub width: Option<u32>,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
