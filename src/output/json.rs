//! JSON waveform output.

use crate::audio::WaveformPoint;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write waveform points as a JSON array to `path`, or to stdout when `None`.
///
/// Each point serializes as `{"min": f32, "max": f32}`.
pub fn write_waveform_json(points: &[WaveformPoint], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let output_error = |source| Error::OutputWrite {
                path: path.to_path_buf(),
                source,
            };
            let file = File::create(path).map_err(output_error)?;
            let mut writer = BufWriter::new(file);
            write_points(&mut writer, points)?;
            writer.flush().map_err(output_error)
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_points(&mut writer, points)?;
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_points<W: Write>(writer: &mut W, points: &[WaveformPoint]) -> Result<()> {
    serde_json::to_writer(&mut *writer, points)
        .map_err(|source| Error::WaveformSerialize { source })?;
    writeln!(writer)?;
    Ok(())
}
