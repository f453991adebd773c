//! Audio decoding using symphonia.

use super::AudioBuffer;
use super::session::{Session, SessionKind};
use crate::error::DecodeError;
use std::io::Cursor;
use std::sync::LazyLock;
use symphonia::core::audio::{AudioBuffer as PlanarBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, CodecRegistry, Decoder, DecoderOptions};
use symphonia::core::conv::FromSample;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use symphonia_adapter_libopus::OpusDecoder;
use tracing::debug;

/// Decode a compressed recording into per-channel f32 samples.
///
/// The container is detected from the data itself.
///
/// # Errors
///
/// Returns an error if the data is malformed, the codec is unsupported, or
/// the stream holds no audio frames.
pub fn decode(bytes: &[u8]) -> Result<AudioBuffer, DecodeError> {
    decode_with_hint(bytes, None)
}

/// Decode a compressed recording, passing a format hint to container detection.
///
/// `hint` is either a MIME type (`audio/webm`) or a file extension (`mp3`,
/// `.ogg`). The hint only speeds up probing; the data still has to match.
///
/// # Errors
///
/// Returns an error if the data is malformed, the codec is unsupported, or
/// the stream holds no audio frames.
pub fn decode_with_hint(bytes: &[u8], hint: Option<&str>) -> Result<AudioBuffer, DecodeError> {
    let mut stream = DecodeStream::open(bytes, hint)?;
    let mut channels: Vec<Vec<f32>> = Vec::new();

    // Decode all packets
    loop {
        let packet = match stream.format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(source) => return Err(DecodeError::Packet { source }),
        };

        if packet.track_id() != stream.track_id {
            continue;
        }

        let decoded = stream
            .decoder
            .decode(&packet)
            .map_err(|source| DecodeError::Packet { source })?;

        let spec = *decoded.spec();
        let count = spec.channels.count();
        if channels.is_empty() {
            if count > usize::from(u8::MAX) {
                return Err(DecodeError::TooManyChannels { count });
            }
            channels = vec![Vec::new(); count];
            stream.sample_rate = stream.sample_rate.or(Some(spec.rate));
        } else if count != channels.len() {
            return Err(DecodeError::ChannelLayoutChanged {
                expected: channels.len(),
                actual: count,
            });
        }

        append_samples(decoded, &mut channels);
    }

    let sample_rate = stream.sample_rate.ok_or(DecodeError::MissingSampleRate)?;
    drop(stream);

    if channels.first().is_none_or(Vec::is_empty) {
        return Err(DecodeError::Empty);
    }

    let buffer = AudioBuffer::new(sample_rate, channels)?;
    debug!(
        "Decoded {:.2}s of audio ({} frames, {} channel(s), {} Hz)",
        buffer.duration_secs(),
        buffer.len(),
        buffer.channel_count(),
        buffer.sample_rate()
    );

    Ok(buffer)
}

/// Format reader and decoder for one track, held inside a decode session.
struct DecodeStream {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    sample_rate: Option<u32>,
    _session: Session,
}

impl DecodeStream {
    fn open(bytes: &[u8], hint: Option<&str>) -> Result<Self, DecodeError> {
        let session = Session::open(SessionKind::Decode);

        let mss = MediaSourceStream::new(
            Box::new(Cursor::new(bytes.to_vec())),
            MediaSourceStreamOptions::default(),
        );

        let detected = symphonia::default::get_probe()
            .format(
                &build_hint(hint),
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|source| DecodeError::UnknownFormat { source })?;

        let format = detected.format;

        // Find the first audio track
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(DecodeError::NoAudioTrack)?;

        let track_id = track.id;
        let sample_rate = track.codec_params.sample_rate;

        debug!(
            "Decoding track {} (codec {:?}, {} Hz, {} channel(s))",
            track_id,
            track.codec_params.codec,
            sample_rate.unwrap_or_default(),
            track
                .codec_params
                .channels
                .map_or(0, symphonia::core::audio::Channels::count)
        );

        let decoder = CODECS
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|source| DecodeError::UnsupportedCodec { source })?;

        Ok(Self {
            format,
            decoder,
            track_id,
            sample_rate,
            _session: session,
        })
    }
}

/// Symphonia's built-in codecs plus Opus through libopus.
static CODECS: LazyLock<CodecRegistry> = LazyLock::new(|| {
    let mut registry = CodecRegistry::new();
    symphonia::default::register_enabled_codecs(&mut registry);
    registry.register_all::<OpusDecoder>();
    registry
});

fn build_hint(hint: Option<&str>) -> Hint {
    let mut format_hint = Hint::new();
    match hint.map(str::trim) {
        Some(mime) if mime.contains('/') => {
            format_hint.mime_type(mime);
        }
        Some(ext) if !ext.is_empty() => {
            format_hint.with_extension(ext.trim_start_matches('.'));
        }
        _ => {}
    }
    format_hint
}

/// Append a decoded packet to the per-channel output, converting to f32.
fn append_samples(decoded: AudioBufferRef<'_>, output: &mut [Vec<f32>]) {
    match decoded {
        AudioBufferRef::U8(buf) => append_planar(&*buf, output),
        AudioBufferRef::U16(buf) => append_planar(&*buf, output),
        AudioBufferRef::U24(buf) => append_planar(&*buf, output),
        AudioBufferRef::U32(buf) => append_planar(&*buf, output),
        AudioBufferRef::S8(buf) => append_planar(&*buf, output),
        AudioBufferRef::S16(buf) => append_planar(&*buf, output),
        AudioBufferRef::S24(buf) => append_planar(&*buf, output),
        AudioBufferRef::S32(buf) => append_planar(&*buf, output),
        AudioBufferRef::F32(buf) => append_planar(&*buf, output),
        AudioBufferRef::F64(buf) => append_planar(&*buf, output),
    }
}

fn append_planar<S>(buffer: &PlanarBuffer<S>, output: &mut [Vec<f32>])
where
    S: Sample,
    f32: FromSample<S>,
{
    for (ch, dest) in output.iter_mut().enumerate() {
        dest.extend(buffer.chan(ch).iter().map(|&s| f32::from_sample(s)));
    }
}
