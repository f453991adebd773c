//! Single recording processing pipeline.

use super::CancellationToken;
use crate::audio::{TrimRegion, decode_with_hint, encode, trim};
use crate::constants::WAV_MIME_TYPE;
use crate::effects::{self, EffectSpec};
use crate::error::ProcessError;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Compressed bytes to PCM.
    Decode,
    /// Region extraction.
    Trim,
    /// Voice effect rendering.
    Effect,
    /// PCM to WAV bytes.
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode => write!(f, "decode"),
            Self::Trim => write!(f, "trim"),
            Self::Effect => write!(f, "effect"),
            Self::Encode => write!(f, "encode"),
        }
    }
}

/// Result of a run where failures fall back to the original recording.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// Every stage succeeded.
    Processed {
        /// Encoded WAV file.
        wav: Vec<u8>,
    },
    /// A stage failed; the unedited input is returned instead.
    Fallback {
        /// The compressed bytes exactly as supplied.
        original: Vec<u8>,
        /// Why processing was abandoned.
        error: ProcessError,
    },
}

impl ProcessOutcome {
    /// Bytes to hand to the upload collaborator.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Processed { wav } => wav,
            Self::Fallback { original, .. } => original,
        }
    }

    /// Consume the outcome, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Processed { wav } => wav,
            Self::Fallback { original, .. } => original,
        }
    }

    /// Whether the original recording was returned.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// MIME type of [`bytes`](Self::bytes), known only for processed output.
    #[must_use]
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            Self::Processed { .. } => Some(WAV_MIME_TYPE),
            Self::Fallback { .. } => None,
        }
    }
}

/// Configurable decode, trim, effect, encode run.
///
/// ```no_run
/// use voxtrim::audio::TrimRegion;
/// use voxtrim::effects::EffectSpec;
/// use voxtrim::pipeline::{CancellationToken, Pipeline};
///
/// # fn main() -> Result<(), voxtrim::error::ProcessError> {
/// let recording = std::fs::read("take.mp3").unwrap_or_default();
/// let token = CancellationToken::new();
/// let wav = Pipeline::new()
///     .with_hint("mp3")
///     .with_cancellation(token.clone())
///     .run(&recording, TrimRegion::FULL, EffectSpec::Warm)?;
/// # let _ = wav;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Pipeline<'a> {
    hint: Option<String>,
    cancel: CancellationToken,
    observer: Option<Box<dyn Fn(Stage) + 'a>>,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with no hint, no observer, and a fresh token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass a MIME type or file extension to container detection.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Stop before the next stage once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Call `observer` as each stage starts.
    #[must_use]
    pub fn on_stage(mut self, observer: impl Fn(Stage) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Decode, trim, apply the effect, and encode to WAV.
    ///
    /// # Errors
    ///
    /// Returns the first stage error, or [`ProcessError::Cancelled`] if the
    /// token was cancelled between stages.
    pub fn run(
        &self,
        compressed: &[u8],
        region: TrimRegion,
        effect: EffectSpec,
    ) -> Result<Vec<u8>, ProcessError> {
        let start_time = Instant::now();

        self.enter(Stage::Decode)?;
        let decoded = decode_with_hint(compressed, self.hint.as_deref())?;

        self.enter(Stage::Trim)?;
        let trimmed = trim(&decoded, region)?;
        drop(decoded);

        self.enter(Stage::Effect)?;
        let rendered = effects::apply(&trimmed, effect)?;
        drop(trimmed);

        self.enter(Stage::Encode)?;
        let wav = encode(&rendered)?;

        info!(
            "Processed {:.2}s recording with effect '{effect}' in {:.2}s ({} bytes)",
            rendered.duration_secs(),
            start_time.elapsed().as_secs_f64(),
            wav.len()
        );

        Ok(wav)
    }

    /// Like [`run`](Self::run), but a failed stage yields the original bytes.
    ///
    /// # Errors
    ///
    /// Only cancellation is reported as an error; it is never turned into a
    /// fallback.
    pub fn run_or_fallback(
        &self,
        compressed: &[u8],
        region: TrimRegion,
        effect: EffectSpec,
    ) -> Result<ProcessOutcome, ProcessError> {
        match self.run(compressed, region, effect) {
            Ok(wav) => Ok(ProcessOutcome::Processed { wav }),
            Err(error) if error.is_cancelled() => Err(error),
            Err(error) => {
                warn!(
                    "{} stage failed, keeping original recording: {error}",
                    error.stage()
                );
                Ok(ProcessOutcome::Fallback {
                    original: compressed.to_vec(),
                    error,
                })
            }
        }
    }

    fn enter(&self, stage: Stage) -> Result<(), ProcessError> {
        if self.cancel.is_cancelled() {
            debug!("Cancelled before {stage}");
            return Err(ProcessError::Cancelled { stage });
        }
        debug!("Entering {stage} stage");
        if let Some(observer) = &self.observer {
            observer(stage);
        }
        Ok(())
    }
}

/// Decode, trim, apply the effect, and encode a recording to WAV.
///
/// # Errors
///
/// Returns the first stage error.
pub fn process(
    compressed: &[u8],
    region: TrimRegion,
    effect: EffectSpec,
) -> Result<Vec<u8>, ProcessError> {
    Pipeline::new().run(compressed, region, effect)
}

/// Process a recording, returning the original bytes if any stage fails.
#[must_use]
pub fn process_or_fallback(
    compressed: &[u8],
    region: TrimRegion,
    effect: EffectSpec,
) -> ProcessOutcome {
    // A fresh token is never cancelled, so every error is already a fallback.
    Pipeline::new()
        .run_or_fallback(compressed, region, effect)
        .unwrap_or_else(|error| ProcessOutcome::Fallback {
            original: compressed.to_vec(),
            error,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Decode.to_string(), "decode");
        assert_eq!(Stage::Encode.to_string(), "encode");
    }

    #[test]
    fn test_cancelled_token_stops_before_decode() {
        let token = CancellationToken::new();
        token.cancel();
        let seen = RefCell::new(Vec::new());

        let result = Pipeline::new()
            .with_cancellation(token)
            .on_stage(|stage| seen.borrow_mut().push(stage))
            .run(b"ignored", TrimRegion::FULL, EffectSpec::None);

        assert!(matches!(
            result,
            Err(ProcessError::Cancelled {
                stage: Stage::Decode
            })
        ));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_cancellation_is_not_a_fallback() {
        let token = CancellationToken::new();
        token.cancel();
        let result = Pipeline::new().with_cancellation(token).run_or_fallback(
            b"ignored",
            TrimRegion::FULL,
            EffectSpec::None,
        );
        assert!(result.unwrap_err().is_cancelled());
    }

    #[test]
    fn test_free_function_matches_pipeline_fallback() {
        let input = b"still not audio".to_vec();
        let direct = process_or_fallback(&input, TrimRegion::FULL, EffectSpec::Clear);
        let via_pipeline = Pipeline::new()
            .run_or_fallback(&input, TrimRegion::FULL, EffectSpec::Clear)
            .unwrap();

        assert_eq!(direct.bytes(), via_pipeline.bytes());
        assert_eq!(direct.is_fallback(), via_pipeline.is_fallback());
    }

    #[test]
    fn test_decode_failure_falls_back_to_original() {
        let input = b"not audio".to_vec();
        let outcome = process_or_fallback(&input, TrimRegion::FULL, EffectSpec::Warm);

        assert!(outcome.is_fallback());
        assert_eq!(outcome.mime_type(), None);
        assert_eq!(outcome.bytes(), input.as_slice());
        match outcome {
            ProcessOutcome::Fallback { error, .. } => assert_eq!(error.stage(), Stage::Decode),
            ProcessOutcome::Processed { .. } => unreachable!(),
        }
    }
}
