//! Handler for the `waveform` subcommand.

use crate::audio::{decode_with_hint, sample_waveform};
use crate::cli::WaveformArgs;
use crate::cli::process::read_input;
use crate::config::Config;
use crate::error::{ProcessError, Result};
use crate::output::write_waveform_json;
use tracing::debug;

/// Decode a recording and emit its min/max waveform as JSON.
pub fn run_waveform(args: &WaveformArgs, config: &Config) -> Result<()> {
    let width = args.width.unwrap_or(config.waveform.width);
    let compressed = read_input(&args.input)?;

    let hint = args.input.extension().and_then(|e| e.to_str());
    let buffer = decode_with_hint(&compressed, hint).map_err(ProcessError::from)?;
    let points = sample_waveform(&buffer, width);
    debug!(
        "Sampled {} frames into {} waveform points",
        buffer.len(),
        points.len()
    );

    write_waveform_json(&points, args.output.as_deref())
}
