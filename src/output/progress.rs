//! Progress spinner for pipeline stages.

use crate::pipeline::Stage;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner labelled with the recording being processed.
pub fn create_stage_spinner(file_name: &str, enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] {{msg}} - {file_name}"
            ))
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Show the stage that is about to run.
pub fn set_stage(pb: Option<&ProgressBar>, stage: Stage) {
    if let Some(pb) = pb {
        pb.set_message(stage_label(stage));
    }
}

/// Finish a spinner with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Decode => "Decoding",
        Stage::Trim => "Trimming",
        Stage::Effect => "Applying effect",
        Stage::Encode => "Encoding WAV",
    }
}
