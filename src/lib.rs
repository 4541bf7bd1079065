pub mod api;
pub mod audio;
pub mod config;
pub mod exam;
pub mod pipeline;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum VivaError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Chat API error: {0}")]
    ChatApiError(String),

    #[error("Speech synthesis error: {0}")]
    SynthesisError(String),

    #[error("Transcription error: {0}")]
    TranscriptionError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

impl From<std::io::Error> for VivaError {
    fn from(e: std::io::Error) -> Self {
        VivaError::IOError(e.to_string())
    }
}

impl VivaError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Missing credentials require the user to fix the environment
            VivaError::ConfigError(_) => false,
            // Hosted API calls are typically transient failures
            VivaError::ChatApiError(_) => true,
            VivaError::SynthesisError(_) => true,
            VivaError::TranscriptionError(_) => true,
            // A bad upload can be fixed by choosing another file
            VivaError::ParseError(_) => true,
            VivaError::AudioDeviceError(_) => false,
            VivaError::AudioProcessingError(_) => true,
            VivaError::IOError(_) => false,
            VivaError::ChannelError(_) => false,
            VivaError::PipelineError(_) => true,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            VivaError::ConfigError(_) => {
                "Configuration error. Please check your API keys and settings.".to_string()
            }
            VivaError::ChatApiError(_) => {
                "Question/rubric generation failed. Please try again.".to_string()
            }
            VivaError::SynthesisError(_) => {
                "Text-to-speech failed. The question is still available as text.".to_string()
            }
            VivaError::TranscriptionError(_) => {
                "Transcription failed. Please try again.".to_string()
            }
            VivaError::ParseError(_) => {
                "Could not read the uploaded file. Expected plain text or JSON questions."
                    .to_string()
            }
            VivaError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone.".to_string()
            }
            VivaError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            VivaError::IOError(_) => "File system error occurred.".to_string(),
            VivaError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            VivaError::PipelineError(_) => "Request failed. Please try again.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VivaError>;
