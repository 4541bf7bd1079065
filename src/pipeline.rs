//! Hosted-API pipeline for the UI
//!
//! Provides a channel-based interface between the egui frame loop and the
//! hosted APIs: the UI sends commands, a worker thread owning a tokio
//! runtime performs the HTTP calls, and results come back as events the
//! UI drains once per frame. One request per kind is in flight at a time;
//! failures surface as a single error event, no retries.

use crate::api::{ChatClient, SpeechClient};
use crate::config::AppConfig;
use crate::exam::{parser, prompts, Difficulty};
use crate::{Result, VivaError};
use crossbeam_channel::{bounded, Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Commands that can be sent to the API pipeline
#[derive(Debug, Clone)]
pub enum ApiCommand {
    /// Generate exam questions for a topic
    GenerateQuestions {
        topic: String,
        count: usize,
        difficulty: Difficulty,
        persona: String,
        request_id: Uuid,
    },

    /// Generate an evaluation rubric from the topic and question list
    GenerateRubric {
        topic: String,
        questions: Vec<String>,
        persona: String,
        request_id: Uuid,
    },

    /// Generate follow-up questions probing the latest transcript
    GenerateFollowUps {
        topic: String,
        transcript: String,
        questions: Vec<String>,
        persona: String,
        request_id: Uuid,
    },

    /// Synthesize speech for one question
    Synthesize {
        text: String,
        voice: String,
        /// Index of the question this audio belongs to
        question_index: usize,
        request_id: Uuid,
    },

    /// Transcribe recorded or uploaded audio
    Transcribe {
        file_name: String,
        audio: Vec<u8>,
        request_id: Uuid,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the API pipeline
#[derive(Debug, Clone)]
pub enum ApiEvent {
    /// Parsed question list from a generation request
    Questions {
        items: Vec<String>,
        request_id: Uuid,
    },

    /// Parsed rubric criteria from a generation request
    Rubric {
        items: Vec<String>,
        request_id: Uuid,
    },

    /// Parsed follow-up questions, to append to the bank
    FollowUps {
        items: Vec<String>,
        request_id: Uuid,
    },

    /// Synthesized MP3 audio for a question
    Audio {
        mp3: Vec<u8>,
        question_index: usize,
        request_id: Uuid,
    },

    /// Transcript of submitted audio
    Transcript { text: String, request_id: Uuid },

    /// An error occurred
    Error {
        error: VivaError,
        request_id: Option<Uuid>,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// API pipeline with channel-based communication
pub struct ApiPipeline {
    config: AppConfig,
    command_tx: Sender<ApiCommand>,
    command_rx: Receiver<ApiCommand>,
    event_tx: Sender<ApiEvent>,
    event_rx: Receiver<ApiEvent>,
}

impl ApiPipeline {
    /// Create a new pipeline
    pub fn new(config: AppConfig) -> Self {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<ApiCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<ApiEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread
    ///
    /// Spawns a thread that owns the HTTP clients and a tokio runtime and
    /// services commands until `Shutdown` or channel disconnect.
    pub fn start_worker(self) -> Result<()> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("API pipeline worker starting");

            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(ApiEvent::Error {
                        error: VivaError::PipelineError(format!("Runtime creation failed: {}", e)),
                        request_id: None,
                    });
                    let _ = event_tx.send(ApiEvent::Shutdown);
                    return;
                }
            };

            let clients = ChatClient::new(&config)
                .and_then(|chat| SpeechClient::new(&config).map(|speech| (chat, speech)));
            let (chat, speech) = match clients {
                Ok(pair) => pair,
                Err(e) => {
                    error!("Failed to create API clients: {}", e);
                    let _ = event_tx.send(ApiEvent::Error {
                        error: e,
                        request_id: None,
                    });
                    let _ = event_tx.send(ApiEvent::Shutdown);
                    return;
                }
            };

            info!("API pipeline worker ready");

            loop {
                match command_rx.recv() {
                    Ok(ApiCommand::GenerateQuestions {
                        topic,
                        count,
                        difficulty,
                        persona,
                        request_id,
                    }) => {
                        debug!("Generating questions: {}", request_id);
                        let system = prompts::system_prompt(&persona);
                        let prompt = prompts::question_prompt(&topic, count, difficulty);
                        let result = runtime
                            .block_on(chat.complete(&system, &prompt))
                            .map(|raw| parser::parse_list(&raw));

                        let event = match result {
                            Ok(items) if items.is_empty() => ApiEvent::Error {
                                error: VivaError::ChatApiError(
                                    "The model returned no questions".to_string(),
                                ),
                                request_id: Some(request_id),
                            },
                            Ok(items) => {
                                debug!("Parsed {} questions", items.len());
                                ApiEvent::Questions { items, request_id }
                            }
                            Err(e) => ApiEvent::Error {
                                error: e,
                                request_id: Some(request_id),
                            },
                        };
                        let _ = event_tx.send(event);
                    }

                    Ok(ApiCommand::GenerateRubric {
                        topic,
                        questions,
                        persona,
                        request_id,
                    }) => {
                        debug!("Generating rubric: {}", request_id);
                        let system = prompts::system_prompt(&persona);
                        let prompt = prompts::rubric_prompt(&topic, &questions);
                        let result = runtime
                            .block_on(chat.complete(&system, &prompt))
                            .map(|raw| parser::parse_list(&raw));

                        let event = match result {
                            Ok(items) if items.is_empty() => ApiEvent::Error {
                                error: VivaError::ChatApiError(
                                    "The model returned no criteria".to_string(),
                                ),
                                request_id: Some(request_id),
                            },
                            Ok(items) => {
                                debug!("Parsed {} criteria", items.len());
                                ApiEvent::Rubric { items, request_id }
                            }
                            Err(e) => ApiEvent::Error {
                                error: e,
                                request_id: Some(request_id),
                            },
                        };
                        let _ = event_tx.send(event);
                    }

                    Ok(ApiCommand::GenerateFollowUps {
                        topic,
                        transcript,
                        questions,
                        persona,
                        request_id,
                    }) => {
                        debug!("Generating follow-ups: {}", request_id);
                        let system = prompts::system_prompt(&persona);
                        let prompt = prompts::follow_up_prompt(&topic, &transcript, &questions);
                        let result = runtime
                            .block_on(chat.complete(&system, &prompt))
                            .map(|raw| parser::parse_list(&raw));

                        let event = match result {
                            Ok(items) if items.is_empty() => ApiEvent::Error {
                                error: VivaError::ChatApiError(
                                    "The model returned no follow-up questions".to_string(),
                                ),
                                request_id: Some(request_id),
                            },
                            Ok(items) => {
                                debug!("Parsed {} follow-ups", items.len());
                                ApiEvent::FollowUps { items, request_id }
                            }
                            Err(e) => ApiEvent::Error {
                                error: e,
                                request_id: Some(request_id),
                            },
                        };
                        let _ = event_tx.send(event);
                    }

                    Ok(ApiCommand::Synthesize {
                        text,
                        voice,
                        question_index,
                        request_id,
                    }) => {
                        debug!("Synthesizing question {}: {}", question_index, request_id);
                        let event = match runtime.block_on(speech.synthesize(&text, &voice)) {
                            Ok(mp3) => ApiEvent::Audio {
                                mp3,
                                question_index,
                                request_id,
                            },
                            Err(e) => ApiEvent::Error {
                                error: e,
                                request_id: Some(request_id),
                            },
                        };
                        let _ = event_tx.send(event);
                    }

                    Ok(ApiCommand::Transcribe {
                        file_name,
                        audio,
                        request_id,
                    }) => {
                        debug!("Transcribing '{}': {}", file_name, request_id);
                        let event = match runtime.block_on(speech.transcribe(&file_name, audio)) {
                            Ok(text) => ApiEvent::Transcript { text, request_id },
                            Err(e) => ApiEvent::Error {
                                error: e,
                                request_id: Some(request_id),
                            },
                        };
                        let _ = event_tx.send(event);
                    }

                    Ok(ApiCommand::Shutdown) => {
                        info!("API pipeline worker shutting down");
                        let _ = event_tx.send(ApiEvent::Shutdown);
                        break;
                    }

                    Err(_) => {
                        // All senders dropped
                        debug!("Command channel disconnected, stopping worker");
                        let _ = event_tx.send(ApiEvent::Shutdown);
                        break;
                    }
                }
            }
        });

        Ok(())
    }
}
