//! WAV encoding and decoding
//!
//! Recorded microphone samples are encoded to 16-bit mono WAV before
//! being uploaded to the transcription endpoint. Uploaded WAV files get
//! their duration probed for the status log.

use crate::{Result, VivaError};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;
use tracing::debug;

/// Encode f32 samples (-1.0 to 1.0) as 16-bit WAV bytes
pub fn encode_wav_bytes(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| VivaError::AudioProcessingError(format!("Failed to create WAV writer: {}", e)))?;

        for &sample in samples {
            let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(sample_i16)
                .map_err(|e| VivaError::AudioProcessingError(format!("Failed to write sample: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| VivaError::AudioProcessingError(format!("Failed to finalize WAV: {}", e)))?;
    }

    let bytes = cursor.into_inner();
    debug!("Encoded {} samples into {} WAV bytes", samples.len(), bytes.len());
    Ok(bytes)
}

/// Probe WAV bytes for their playback duration in seconds
///
/// Returns `None` when the bytes are not a parseable WAV file (uploads
/// in other audio formats are forwarded to the API untouched).
pub fn wav_duration(bytes: &[u8]) -> Option<f32> {
    let reader = WavReader::new(Cursor::new(bytes)).ok()?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return None;
    }
    Some(reader.duration() as f32 / spec.sample_rate as f32)
}

/// Duration in seconds for mono sample buffers
pub fn duration_secs(samples: &[f32], sample_rate: u32) -> f32 {
    if sample_rate == 0 {
        return 0.0;
    }
    samples.len() as f32 / sample_rate as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_produces_valid_wav() {
        let samples: Vec<f32> = (0..1600).map(|i| (i as f32 * 0.01).sin() * 0.5).collect();
        let bytes = encode_wav_bytes(&samples, 16000, 1).unwrap();

        // RIFF/WAVE header
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");

        let reader = WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 1600);
    }

    #[test]
    fn test_encode_clamps_out_of_range() {
        let bytes = encode_wav_bytes(&[2.0, -2.0], 16000, 1).unwrap();
        let mut reader = WavReader::new(Cursor::new(bytes)).unwrap();
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded[0], i16::MAX);
        assert_eq!(decoded[1], -i16::MAX);
    }

    #[test]
    fn test_wav_duration_probe() {
        let samples = vec![0.0f32; 24000];
        let bytes = encode_wav_bytes(&samples, 16000, 1).unwrap();
        let secs = wav_duration(&bytes).unwrap();
        assert!((secs - 1.5).abs() < 0.001);

        assert_eq!(wav_duration(b"not a wav file"), None);
    }

    #[test]
    fn test_duration() {
        let samples = vec![0.0; 32000];
        assert!((duration_secs(&samples, 16000) - 2.0).abs() < f32::EPSILON);
        assert_eq!(duration_secs(&samples, 0), 0.0);
    }
}
