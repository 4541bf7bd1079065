//! Microphone capture for student answers
//!
//! A recorder opens the default input device and starts capturing
//! immediately. Audio lands in a shared buffer as mono f32 samples; the
//! UI drains it once per frame with [`AudioRecorder::take_samples`] and
//! collects the remainder with [`AudioRecorder::finish`] when the answer
//! is submitted for transcription.

use crate::{Result, VivaError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

/// One microphone capture session
pub struct AudioRecorder {
    stream: Option<Stream>,
    captured: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
}

impl AudioRecorder {
    /// Open the default input device and start capturing
    pub fn open() -> Result<Self> {
        let device = cpal::default_host()
            .default_input_device()
            .ok_or_else(|| VivaError::AudioDeviceError("no microphone found".into()))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let supported = device.default_input_config().map_err(|e| {
            VivaError::AudioDeviceError(format!("no usable input config for {device_name}: {e}"))
        })?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(VivaError::AudioDeviceError(format!(
                "{device_name} delivers {:?} samples, expected f32",
                supported.sample_format()
            )));
        }

        let config: cpal::StreamConfig = supported.into();
        let sample_rate = config.sample_rate.0;
        let channel_count = config.channels as usize;

        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);

        let stream = device
            .build_input_stream(
                &config,
                move |frames: &[f32], _: &cpal::InputCallbackInfo| {
                    let mut buffer = sink.lock();
                    if channel_count <= 1 {
                        buffer.extend_from_slice(frames);
                    } else {
                        // Downmix interleaved frames to mono
                        buffer.extend(
                            frames
                                .chunks_exact(channel_count)
                                .map(|frame| frame.iter().sum::<f32>() / channel_count as f32),
                        );
                    }
                },
                |e| warn!("input stream error: {e}"),
                None,
            )
            .map_err(|e| {
                VivaError::AudioDeviceError(format!("could not open stream on {device_name}: {e}"))
            })?;

        stream
            .play()
            .map_err(|e| VivaError::AudioDeviceError(format!("could not start capture: {e}")))?;

        info!(device = %device_name, sample_rate, channels = channel_count, "microphone capture started");

        Ok(Self {
            stream: Some(stream),
            captured,
            sample_rate,
        })
    }

    /// Sample rate of the capture, for WAV encoding
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Drain the samples captured since the last call
    pub fn take_samples(&self) -> Vec<f32> {
        std::mem::take(&mut *self.captured.lock())
    }

    /// Stop capturing and return any samples not yet drained
    pub fn finish(mut self) -> Vec<f32> {
        if let Some(stream) = self.stream.take() {
            drop(stream);
        }
        info!("microphone capture stopped");
        std::mem::take(&mut *self.captured.lock())
    }
}
