//! Speech API client (synthesis and transcription)
//!
//! Synthesis posts JSON to `{base}/audio/speech` and returns MP3 bytes.
//! Transcription posts a multipart form to `{base}/audio/transcriptions`
//! with `response_format=text`; the hosted model sniffs the audio format
//! from the uploaded bytes and filename.

use crate::config::AppConfig;
use crate::{Result, VivaError};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Voice identifiers accepted by the synthesis endpoint
pub const VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

#[derive(Debug, Serialize)]
struct SpeechRequest {
    model: String,
    input: String,
    voice: String,
    response_format: &'static str,
}

/// Client for the hosted speech API
pub struct SpeechClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    tts_model: String,
    stt_model: String,
}

impl SpeechClient {
    /// Create a new speech client from the application configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                VivaError::SynthesisError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: config.speech_api_key.clone(),
            api_base: config.speech_api_base.trim_end_matches('/').to_string(),
            tts_model: config.tts_model.clone(),
            stt_model: config.stt_model.clone(),
        })
    }

    /// Synthesize speech for the given text, returning MP3 bytes
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        debug!("Synthesizing {} chars with voice '{}'", text.len(), voice);

        let request = SpeechRequest {
            model: self.tts_model.clone(),
            input: text.to_string(),
            voice: voice.to_string(),
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Speech synthesis request failed: {}", e);
                VivaError::SynthesisError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Speech API returned {}: {}", status, body);
            return Err(VivaError::SynthesisError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VivaError::SynthesisError(format!("Failed to read audio: {}", e)))?;

        debug!("Received {} bytes of MP3 audio", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Transcribe an audio file, returning plain text
    pub async fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> Result<String> {
        debug!("Transcribing '{}' ({} bytes)", file_name, audio.len());

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| VivaError::TranscriptionError(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .text("model", self.stt_model.clone())
            .text("response_format", "text")
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.api_base))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Transcription request failed: {}", e);
                VivaError::TranscriptionError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Transcription API returned {}: {}", status, body);
            return Err(VivaError::TranscriptionError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| VivaError::TranscriptionError(format!("Failed to read response: {}", e)))?;

        debug!("Transcript is {} chars", text.len());
        Ok(text.trim().to_string())
    }
}
