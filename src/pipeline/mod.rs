//! Decode, trim, effect and encode orchestration.

mod cancel;
mod processor;

pub use cancel::CancellationToken;
pub use processor::{Pipeline, ProcessOutcome, Stage, process, process_or_fallback};
