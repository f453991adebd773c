//! CLI argument parsing and command handling.

mod args;
mod process;
pub mod validators;
mod waveform;

pub use args::{Cli, Command, ConfigAction, ProcessArgs, WaveformArgs};
pub use process::run_process;
pub use waveform::run_waveform;
