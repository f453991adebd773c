//! Terminal and file output.

mod json;
pub mod progress;

pub use json::write_waveform_json;
