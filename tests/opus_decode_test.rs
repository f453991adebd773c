//! Decoding Opus recordings as captured by browsers.

mod common;

use common::{OPUS_FRAME_SAMPLES, ogg_opus_silence, u32_at};
use voxtrim::audio::{decode, decode_with_hint};
use voxtrim::{EffectSpec, TrimRegion, process};

#[test]
fn test_decode_ogg_opus_mono() {
    let recording = ogg_opus_silence(1, 50);

    let buffer = decode_with_hint(&recording, Some("ogg")).unwrap();

    assert_eq!(buffer.sample_rate(), 48_000);
    assert_eq!(buffer.channel_count(), 1);
    assert!(!buffer.is_empty());
    assert!(buffer.len() <= 50 * OPUS_FRAME_SAMPLES);
    assert_eq!(buffer.len() % OPUS_FRAME_SAMPLES, 0);
    assert!(
        buffer
            .channels()
            .all(|ch| ch.iter().all(|s| s.is_finite() && s.abs() <= 1.0))
    );
}

#[test]
fn test_decode_ogg_opus_stereo_keeps_channels() {
    let recording = ogg_opus_silence(2, 10);

    let buffer = decode_with_hint(&recording, Some("audio/ogg")).unwrap();

    assert_eq!(buffer.sample_rate(), 48_000);
    assert_eq!(buffer.channel_count(), 2);
}

#[test]
fn test_decode_ogg_opus_without_hint() {
    let buffer = decode(&ogg_opus_silence(1, 5)).unwrap();
    assert_eq!(buffer.sample_rate(), 48_000);
}

#[test]
fn test_opus_recording_processes_to_wav() {
    let recording = ogg_opus_silence(1, 50);
    let region = TrimRegion::from_percent(10.0, 90.0).unwrap();

    let wav = process(&recording, region, EffectSpec::Clear).unwrap();

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32_at(&wav, 24), 48_000);
    assert!(u32_at(&wav, 40) > 0);
}
