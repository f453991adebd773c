//! Audio buffers and the decode, waveform, trim and WAV encode stages.

mod buffer;
mod decode;
pub mod session;
mod trim;
mod waveform;
mod wav;

pub use buffer::AudioBuffer;
pub use decode::{decode, decode_with_hint};
pub use session::{Session, SessionKind, active_sessions};
pub use trim::{TrimRegion, trim};
pub use waveform::{WaveformPoint, sample as sample_waveform};
pub use wav::encode;
