//! Audio helpers: WAV encoding for transcription uploads and optional
//! microphone capture.

#[cfg(feature = "audio-io")]
pub mod recorder;
pub mod wav;

#[cfg(feature = "audio-io")]
pub use recorder::AudioRecorder;
