//! Handler for the `process` subcommand.

use crate::cli::ProcessArgs;
use crate::cli::validators::trim_region_from_handles;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::progress;
use crate::pipeline::{CancellationToken, Pipeline, ProcessOutcome};
use std::path::Path;
use tracing::{info, warn};

/// Process one recording and write the result to `args.output`.
///
/// With fallback enabled a failed stage writes the original recording
/// unchanged; cancellation always aborts without writing.
pub fn run_process(
    args: &ProcessArgs,
    config: &Config,
    cancel: &CancellationToken,
    show_progress: bool,
) -> Result<()> {
    let region = trim_region_from_handles(args.start, args.end)?;
    let effect = args.effect.unwrap_or(config.defaults.effect);
    let fallback = args
        .fallback_override()
        .unwrap_or(config.defaults.fallback);

    let compressed = read_input(&args.input)?;
    info!(
        "Processing {} ({} bytes): {:.1}%-{:.1}%, effect '{effect}'",
        args.input.display(),
        compressed.len(),
        args.start,
        args.end
    );

    let file_name = args.input.file_name().map_or_else(
        || args.input.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    let spinner = progress::create_stage_spinner(&file_name, show_progress);

    let mut pipeline = Pipeline::new()
        .with_cancellation(cancel.clone())
        .on_stage(|stage| progress::set_stage(spinner.as_ref(), stage));
    if let Some(extension) = args.input.extension().and_then(|e| e.to_str()) {
        pipeline = pipeline.with_hint(extension);
    }

    let result = if fallback {
        pipeline.run_or_fallback(&compressed, region, effect)
    } else {
        pipeline
            .run(&compressed, region, effect)
            .map(|wav| ProcessOutcome::Processed { wav })
    };
    drop(pipeline);

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            progress::finish_progress(spinner, "Failed");
            return Err(e.into());
        }
    };

    if outcome.is_fallback() {
        progress::finish_progress(spinner, "Kept original");
        warn!(
            "Writing the original recording to {}; it is not a WAV file",
            args.output.display()
        );
    } else {
        progress::finish_progress(spinner, "Done");
    }

    write_output(&args.output, outcome.bytes())?;
    info!(
        "Wrote {} bytes to {}",
        outcome.bytes().len(),
        args.output.display()
    );
    Ok(())
}

/// Read a whole input recording into memory.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::InputRead {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
