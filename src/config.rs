//! Application configuration
//!
//! All settings come from the environment, with sensible defaults for
//! everything except the two API secrets.

use crate::{Result, VivaError};
use std::path::PathBuf;

/// Default base URL for the chat-completion API
pub const DEFAULT_CHAT_API_BASE: &str = "https://api.openai.com/v1";

/// Default base URL for the speech API (synthesis + transcription)
pub const DEFAULT_SPEECH_API_BASE: &str = "https://api.openai.com/v1";

/// Configuration for the application
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// API key for the chat-completion endpoint
    pub chat_api_key: String,

    /// Base URL of the chat-completion API
    pub chat_api_base: String,

    /// Model used for question and rubric generation
    pub chat_model: String,

    /// API key for the speech endpoints
    pub speech_api_key: String,

    /// Base URL of the speech API
    pub speech_api_base: String,

    /// Model used for speech synthesis
    pub tts_model: String,

    /// Model used for transcription
    pub stt_model: String,

    /// Directory where exported artifacts are written
    pub export_dir: PathBuf,

    /// Timeout for hosted API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat_api_key: String::new(),
            chat_api_base: DEFAULT_CHAT_API_BASE.to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            speech_api_key: String::new(),
            speech_api_base: DEFAULT_SPEECH_API_BASE.to_string(),
            tts_model: "tts-1".to_string(),
            stt_model: "whisper-1".to_string(),
            export_dir: PathBuf::from("exports"),
            request_timeout_secs: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            chat_api_key: std::env::var("OPENAI_API_KEY").unwrap_or(default.chat_api_key),
            chat_api_base: std::env::var("CHAT_API_BASE").unwrap_or(default.chat_api_base),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or(default.chat_model),
            speech_api_key: std::env::var("SPEECH_API_KEY").unwrap_or(default.speech_api_key),
            speech_api_base: std::env::var("SPEECH_API_BASE").unwrap_or(default.speech_api_base),
            tts_model: std::env::var("TTS_MODEL").unwrap_or(default.tts_model),
            stt_model: std::env::var("STT_MODEL").unwrap_or(default.stt_model),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.export_dir),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),
        }
    }

    /// Validate the configuration
    ///
    /// Missing secrets are reported as an error for the UI to surface;
    /// the application still starts so the message is visible.
    pub fn validate(&self) -> Result<()> {
        if self.chat_api_key.trim().is_empty() {
            return Err(VivaError::ConfigError(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }
        if self.speech_api_key.trim().is_empty() {
            return Err(VivaError::ConfigError(
                "SPEECH_API_KEY is not set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.chat_api_base, DEFAULT_CHAT_API_BASE);
        assert_eq!(config.tts_model, "tts-1");
        assert_eq!(config.stt_model, "whisper-1");
        assert_eq!(config.export_dir, PathBuf::from("exports"));
    }

    #[test]
    fn test_validate_requires_both_secrets() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_err());

        config.chat_api_key = "sk-test".to_string();
        assert!(config.validate().is_err());

        config.speech_api_key = "sp-test".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_secret() {
        let mut config = AppConfig::default();
        config.chat_api_key = "   ".to_string();
        config.speech_api_key = "sp-test".to_string();
        assert!(config.validate().is_err());
    }
}
