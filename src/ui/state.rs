//! Application state management
//!
//! Central state for the Viva dashboard: exam setup, question and rubric
//! lists with their edit buffers, speech state, and the channels to the
//! API pipeline. Events are drained once per frame by `poll_events`.

use crate::config::AppConfig;
use crate::exam::{Difficulty, QuestionBank, Rubric};
use crate::pipeline::{ApiCommand, ApiEvent};
use crate::{Result, VivaError};
use chrono::Local;
use crossbeam_channel::{Receiver, Sender as ChannelSender};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use uuid::Uuid;

#[cfg(feature = "audio-io")]
use crate::audio::AudioRecorder;

/// Recording state for student audio capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// Not recording
    Idle,
    /// Currently recording audio
    Recording,
    /// Waiting for the transcription API
    Processing,
}

/// Synthesized speech for one question, kept for export
#[derive(Debug, Clone)]
pub struct QuestionAudio {
    pub mp3: Vec<u8>,
    pub voice: String,
}

/// Central application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Configuration problem to surface (e.g. missing API key)
    pub config_error: Option<String>,

    // --- Exam setup ---
    /// Topic description seeding question/rubric generation
    pub topic: String,
    /// Number of questions to generate
    pub question_count: usize,
    /// Difficulty for generated questions
    pub difficulty: Difficulty,
    /// Optional persona shaping the bot's register
    pub persona: String,
    /// Selected synthesis voice id
    pub voice: String,

    // --- Questions ---
    pub questions: QuestionBank,
    /// Per-question edit buffers while in edit mode
    pub question_edits: Vec<String>,
    pub editing_questions: bool,
    /// Draft text for a manually added question
    pub new_question: String,
    /// Path field for question list import
    pub import_path: String,

    // --- Rubric ---
    pub rubric: Rubric,
    pub rubric_edits: Vec<String>,
    pub editing_rubric: bool,
    pub new_criterion: String,

    // --- Speech ---
    pub recording_state: RecordingState,
    /// Accumulated mono samples for the current recording
    pub recording_buffer: Vec<f32>,
    /// Path field for audio file upload
    pub audio_path: String,
    /// Latest transcript
    pub transcript: String,
    /// Synthesized audio per question index
    pub question_audio: HashMap<usize, QuestionAudio>,

    #[cfg(feature = "audio-io")]
    recorder: Option<AudioRecorder>,
    /// Sample rate of the current recording
    recording_sample_rate: u32,

    // --- Pipeline channels ---
    pub api_command_tx: Option<ChannelSender<ApiCommand>>,
    pub api_event_rx: Option<Receiver<ApiEvent>>,

    // --- In-flight requests (one per kind) ---
    pub questions_request: Option<Uuid>,
    pub rubric_request: Option<Uuid>,
    pub followups_request: Option<Uuid>,
    pub synthesis_request: Option<Uuid>,
    pub transcription_request: Option<Uuid>,

    // --- Status ---
    /// Last error message shown in the status bar
    pub last_error: Option<String>,
    /// Recent status messages
    pub status_log: VecDeque<String>,
}

impl AppState {
    /// Create a new application state from the environment configuration
    pub fn new(config: AppConfig) -> Self {
        let config_error = config.validate().err().map(|e| e.to_string());

        Self {
            config,
            config_error,
            topic: String::new(),
            question_count: 5,
            difficulty: Difficulty::default(),
            persona: String::new(),
            voice: "alloy".to_string(),
            questions: QuestionBank::new(),
            question_edits: Vec::new(),
            editing_questions: false,
            new_question: String::new(),
            import_path: String::new(),
            rubric: Rubric::new(),
            rubric_edits: Vec::new(),
            editing_rubric: false,
            new_criterion: String::new(),
            recording_state: RecordingState::Idle,
            recording_buffer: Vec::new(),
            audio_path: String::new(),
            transcript: String::new(),
            question_audio: HashMap::new(),
            #[cfg(feature = "audio-io")]
            recorder: None,
            recording_sample_rate: 16000,
            api_command_tx: None,
            api_event_rx: None,
            questions_request: None,
            rubric_request: None,
            followups_request: None,
            synthesis_request: None,
            transcription_request: None,
            last_error: None,
            status_log: VecDeque::with_capacity(100),
        }
    }

    /// Connect the pipeline channels
    pub fn connect_pipeline(
        &mut self,
        command_tx: ChannelSender<ApiCommand>,
        event_rx: Receiver<ApiEvent>,
    ) {
        self.api_command_tx = Some(command_tx);
        self.api_event_rx = Some(event_rx);
    }

    /// Append a status message, keeping the log bounded
    pub fn add_log(&mut self, message: impl Into<String>) {
        if self.status_log.len() >= 100 {
            self.status_log.pop_front();
        }
        self.status_log.push_back(message.into());
    }

    /// Whether any hosted request is currently in flight
    pub fn is_busy(&self) -> bool {
        self.questions_request.is_some()
            || self.rubric_request.is_some()
            || self.followups_request.is_some()
            || self.synthesis_request.is_some()
            || self.transcription_request.is_some()
    }

    fn send_command(&mut self, command: ApiCommand) -> Option<()> {
        let tx = self.api_command_tx.as_ref()?;
        if tx.send(command).is_err() {
            self.last_error = Some(VivaError::ChannelError("pipeline gone".into()).user_message());
            return None;
        }
        Some(())
    }

    // --- Question operations ---

    /// Request question generation for the current setup
    pub fn request_questions(&mut self) {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            self.last_error = Some("Please enter a topic first.".to_string());
            return;
        }
        if self.questions_request.is_some() {
            return;
        }

        let request_id = Uuid::new_v4();
        let command = ApiCommand::GenerateQuestions {
            topic,
            count: self.question_count,
            difficulty: self.difficulty,
            persona: self.persona.clone(),
            request_id,
        };
        if self.send_command(command).is_some() {
            self.questions_request = Some(request_id);
            self.last_error = None;
            self.add_log(format!(
                "Generating {} {} questions...",
                self.question_count, self.difficulty
            ));
        }
    }

    /// Request rubric generation from the topic and current questions
    pub fn request_rubric(&mut self) {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            self.last_error = Some("Please enter a topic first.".to_string());
            return;
        }
        if self.rubric_request.is_some() {
            return;
        }

        let request_id = Uuid::new_v4();
        let command = ApiCommand::GenerateRubric {
            topic,
            questions: self.questions.texts(),
            persona: self.persona.clone(),
            request_id,
        };
        if self.send_command(command).is_some() {
            self.rubric_request = Some(request_id);
            self.last_error = None;
            self.add_log("Generating rubric...".to_string());
        }
    }

    /// Request follow-up questions probing the latest transcript
    pub fn request_follow_ups(&mut self) {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            self.last_error = Some("Please enter a topic first.".to_string());
            return;
        }
        let transcript = self.transcript.trim().to_string();
        if transcript.is_empty() {
            self.last_error = Some("Transcribe an answer first.".to_string());
            return;
        }
        if self.followups_request.is_some() {
            return;
        }

        let request_id = Uuid::new_v4();
        let command = ApiCommand::GenerateFollowUps {
            topic,
            transcript,
            questions: self.questions.texts(),
            persona: self.persona.clone(),
            request_id,
        };
        if self.send_command(command).is_some() {
            self.followups_request = Some(request_id);
            self.last_error = None;
            self.add_log("Generating follow-up questions...".to_string());
        }
    }

    /// Enter question edit mode, building one buffer per question
    pub fn begin_question_edit(&mut self) {
        self.question_edits = self.questions.texts();
        self.editing_questions = true;
    }

    /// Save question edits; emptied entries are dropped
    pub fn save_question_edits(&mut self) {
        if !self.editing_questions {
            return;
        }
        self.questions.commit(&self.question_edits);
        self.question_edits.clear();
        self.editing_questions = false;
        self.invalidate_question_audio();
    }

    /// Drop cached audio and any in-flight synthesis after the list
    /// changes shape; indices no longer line up.
    fn invalidate_question_audio(&mut self) {
        self.question_audio.clear();
        self.synthesis_request = None;
    }

    /// Leave edit mode without applying buffers
    pub fn cancel_question_edit(&mut self) {
        self.question_edits.clear();
        self.editing_questions = false;
    }

    /// Add the drafted question, if non-empty
    pub fn add_question(&mut self) {
        let text = self.new_question.trim().to_string();
        if text.is_empty() {
            return;
        }
        // In edit mode the new entry gets its own buffer so pending
        // edits to other questions survive
        if self.editing_questions {
            self.question_edits.push(text.clone());
        }
        self.questions.add(text);
        self.new_question.clear();
    }

    /// Delete the question at `index`
    pub fn delete_question(&mut self, index: usize) {
        self.questions.remove(index);
        if self.editing_questions && index < self.question_edits.len() {
            self.question_edits.remove(index);
        }
        self.invalidate_question_audio();
    }

    /// Drop the questions and rubric for a fresh exam
    pub fn clear_exam(&mut self) {
        self.questions.clear();
        self.question_edits.clear();
        self.editing_questions = false;
        self.rubric.clear();
        self.rubric_edits.clear();
        self.editing_rubric = false;
        self.invalidate_question_audio();
    }

    /// Import questions from the file named in the import path field
    pub fn import_questions(&mut self) {
        let path = self.import_path.trim().to_string();
        if path.is_empty() {
            self.last_error = Some("Please enter a file path to import.".to_string());
            return;
        }

        match self.load_question_file(&path) {
            Ok(count) => {
                self.last_error = None;
                // A pending edit session refers to the replaced list
                self.editing_questions = false;
                self.question_edits.clear();
                self.invalidate_question_audio();
                self.add_log(format!("Imported {} questions from {}", count, path));
            }
            Err(e) => {
                self.last_error = Some(e.user_message());
                self.add_log(format!("Import failed: {}", e));
            }
        }
    }

    fn load_question_file(&mut self, path: &str) -> Result<usize> {
        let contents = std::fs::read_to_string(path)?;
        self.questions.import(&contents)
    }

    // --- Rubric edit operations ---

    pub fn begin_rubric_edit(&mut self) {
        self.rubric_edits = self.rubric.texts();
        self.editing_rubric = true;
    }

    pub fn save_rubric_edits(&mut self) {
        if !self.editing_rubric {
            return;
        }
        self.rubric.commit(&self.rubric_edits);
        self.rubric_edits.clear();
        self.editing_rubric = false;
    }

    pub fn cancel_rubric_edit(&mut self) {
        self.rubric_edits.clear();
        self.editing_rubric = false;
    }

    pub fn add_criterion(&mut self) {
        let text = self.new_criterion.trim().to_string();
        if text.is_empty() {
            return;
        }
        if self.editing_rubric {
            self.rubric_edits.push(text.clone());
        }
        self.rubric.add(text);
        self.new_criterion.clear();
    }

    // --- Speech operations ---

    /// Request synthesis of the question at `index`
    pub fn request_synthesis(&mut self, index: usize) {
        if self.synthesis_request.is_some() {
            return;
        }
        let Some(question) = self.questions.get(index) else {
            return;
        };

        let request_id = Uuid::new_v4();
        let command = ApiCommand::Synthesize {
            text: question.text.clone(),
            voice: self.voice.clone(),
            question_index: index,
            request_id,
        };
        if self.send_command(command).is_some() {
            self.synthesis_request = Some(request_id);
            self.last_error = None;
            self.add_log(format!("Synthesizing question {}...", index + 1));
        }
    }

    /// Start recording student audio
    #[cfg(feature = "audio-io")]
    pub fn start_recording(&mut self) {
        if self.recording_state != RecordingState::Idle {
            return;
        }

        let recorder = match AudioRecorder::open() {
            Ok(r) => r,
            Err(e) => {
                self.last_error = Some(e.user_message());
                self.add_log(format!("Recorder error: {}", e));
                return;
            }
        };

        self.recording_sample_rate = recorder.sample_rate();
        self.recording_buffer.clear();
        self.recorder = Some(recorder);
        self.recording_state = RecordingState::Recording;
        self.add_log("Recording started".to_string());
    }

    /// Stop recording and submit the audio for transcription
    #[cfg(feature = "audio-io")]
    pub fn stop_recording(&mut self) {
        if self.recording_state != RecordingState::Recording {
            return;
        }
        if let Some(recorder) = self.recorder.take() {
            let remainder = recorder.finish();
            self.recording_buffer.extend_from_slice(&remainder);
        }

        if self.recording_buffer.is_empty() {
            self.recording_state = RecordingState::Idle;
            self.last_error = Some("No audio was captured.".to_string());
            return;
        }

        match crate::audio::wav::encode_wav_bytes(
            &self.recording_buffer,
            self.recording_sample_rate,
            1,
        ) {
            Ok(wav) => {
                self.submit_transcription("recording.wav".to_string(), wav);
            }
            Err(e) => {
                self.recording_state = RecordingState::Idle;
                self.last_error = Some(e.user_message());
            }
        }
    }

    /// Cancel recording without transcribing
    #[cfg(feature = "audio-io")]
    pub fn cancel_recording(&mut self) {
        if let Some(recorder) = self.recorder.take() {
            // Discard whatever was captured
            let _ = recorder.finish();
        }
        self.recording_buffer.clear();
        self.recording_state = RecordingState::Idle;
        self.add_log("Recording cancelled".to_string());
    }

    /// Submit the audio file named in the upload path field
    pub fn transcribe_uploaded_file(&mut self) {
        let path = self.audio_path.trim().to_string();
        if path.is_empty() {
            self.last_error = Some("Please enter an audio file path.".to_string());
            return;
        }

        match std::fs::read(&path) {
            Ok(bytes) => {
                let file_name = PathBuf::from(&path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload.wav".to_string());
                if let Some(secs) = crate::audio::wav::wav_duration(&bytes) {
                    self.add_log(format!("Uploaded {} ({:.1}s of audio)", file_name, secs));
                }
                self.submit_transcription(file_name, bytes);
            }
            Err(e) => {
                let err = VivaError::from(e);
                self.last_error = Some(err.user_message());
                self.add_log(format!("Upload failed: {}", err));
            }
        }
    }

    fn submit_transcription(&mut self, file_name: String, audio: Vec<u8>) {
        if self.transcription_request.is_some() {
            return;
        }

        let request_id = Uuid::new_v4();
        let command = ApiCommand::Transcribe {
            file_name: file_name.clone(),
            audio,
            request_id,
        };
        if self.send_command(command).is_some() {
            self.transcription_request = Some(request_id);
            self.recording_state = RecordingState::Processing;
            self.last_error = None;
            self.add_log(format!("Transcribing {}...", file_name));
        } else {
            self.recording_state = RecordingState::Idle;
        }
    }

    /// Pull samples captured since the last frame into the buffer
    pub fn drain_recorded_audio(&mut self) {
        #[cfg(feature = "audio-io")]
        if let Some(recorder) = &self.recorder {
            let chunk = recorder.take_samples();
            self.recording_buffer.extend_from_slice(&chunk);
        }
    }

    /// Duration of the current recording in seconds
    pub fn recording_secs(&self) -> f32 {
        crate::audio::wav::duration_secs(&self.recording_buffer, self.recording_sample_rate)
    }

    // --- Event polling ---

    /// Process incoming events from the pipeline
    pub fn poll_events(&mut self) {
        self.drain_recorded_audio();

        let events: Vec<ApiEvent> = if let Some(rx) = &self.api_event_rx {
            let mut drained = Vec::new();
            while let Ok(event) = rx.try_recv() {
                drained.push(event);
            }
            drained
        } else {
            Vec::new()
        };

        for event in events {
            match event {
                ApiEvent::Questions { items, request_id } => {
                    if self.questions_request != Some(request_id) {
                        continue; // Stale
                    }
                    self.questions_request = None;
                    self.editing_questions = false;
                    self.question_edits.clear();
                    self.invalidate_question_audio();
                    self.add_log(format!("Received {} questions", items.len()));
                    self.questions.replace_all(items);
                }
                ApiEvent::FollowUps { items, request_id } => {
                    if self.followups_request != Some(request_id) {
                        continue;
                    }
                    self.followups_request = None;
                    self.add_log(format!("Received {} follow-up questions", items.len()));
                    for item in items {
                        if self.editing_questions {
                            self.question_edits.push(item.clone());
                        }
                        self.questions.add(item);
                    }
                }
                ApiEvent::Rubric { items, request_id } => {
                    if self.rubric_request != Some(request_id) {
                        continue;
                    }
                    self.rubric_request = None;
                    self.editing_rubric = false;
                    self.add_log(format!("Received {} criteria", items.len()));
                    self.rubric.replace_all(items);
                }
                ApiEvent::Audio {
                    mp3,
                    question_index,
                    request_id,
                } => {
                    if self.synthesis_request != Some(request_id) {
                        continue;
                    }
                    self.synthesis_request = None;
                    self.add_log(format!(
                        "Audio ready for question {} ({} KiB)",
                        question_index + 1,
                        mp3.len() / 1024
                    ));
                    self.question_audio.insert(
                        question_index,
                        QuestionAudio {
                            mp3,
                            voice: self.voice.clone(),
                        },
                    );
                }
                ApiEvent::Transcript { text, request_id } => {
                    if self.transcription_request != Some(request_id) {
                        continue;
                    }
                    self.transcription_request = None;
                    self.recording_state = RecordingState::Idle;
                    self.add_log(format!("Transcript received ({} chars)", text.len()));
                    self.transcript = text;
                }
                ApiEvent::Error { error, request_id } => {
                    self.clear_request(request_id);
                    self.last_error = Some(error.user_message());
                    self.add_log(format!("Error: {}", error));
                }
                ApiEvent::Shutdown => {
                    self.add_log("API pipeline shut down".to_string());
                }
            }
        }
    }

    /// Clear whichever in-flight request the error belongs to
    fn clear_request(&mut self, request_id: Option<Uuid>) {
        let Some(id) = request_id else {
            // Errors without an id (e.g. startup failure) cancel everything
            self.questions_request = None;
            self.rubric_request = None;
            self.followups_request = None;
            self.synthesis_request = None;
            self.transcription_request = None;
            self.recording_state = RecordingState::Idle;
            return;
        };

        if self.questions_request == Some(id) {
            self.questions_request = None;
        }
        if self.rubric_request == Some(id) {
            self.rubric_request = None;
        }
        if self.followups_request == Some(id) {
            self.followups_request = None;
        }
        if self.synthesis_request == Some(id) {
            self.synthesis_request = None;
        }
        if self.transcription_request == Some(id) {
            self.transcription_request = None;
            self.recording_state = RecordingState::Idle;
        }
    }

    // --- Export ---

    /// Export the question list as plain text
    pub fn export_questions(&mut self) {
        if self.questions.is_empty() {
            self.last_error = Some("No questions to export.".to_string());
            return;
        }
        let contents = self.questions.export_text();
        self.write_export("questions", "txt", contents.as_bytes());
    }

    /// Export the rubric as a plain-text checklist
    pub fn export_rubric(&mut self) {
        if self.rubric.is_empty() {
            self.last_error = Some("No rubric to export.".to_string());
            return;
        }
        let contents = self.rubric.export_text();
        self.write_export("rubric", "txt", contents.as_bytes());
    }

    /// Export the latest transcript
    pub fn export_transcript(&mut self) {
        if self.transcript.trim().is_empty() {
            self.last_error = Some("No transcript to export.".to_string());
            return;
        }
        let contents = self.transcript.clone();
        self.write_export("transcript", "txt", contents.as_bytes());
    }

    /// Export synthesized audio for the question at `index`
    pub fn export_audio(&mut self, index: usize) {
        let Some(audio) = self.question_audio.get(&index) else {
            self.last_error = Some("No audio for that question yet.".to_string());
            return;
        };
        let mp3 = audio.mp3.clone();
        let stem = format!("question-{}-{}", index + 1, audio.voice);
        self.write_export(&stem, "mp3", &mp3);
    }

    fn write_export(&mut self, stem: &str, ext: &str, contents: &[u8]) {
        let result = (|| -> Result<PathBuf> {
            std::fs::create_dir_all(&self.config.export_dir)?;
            let name = format!(
                "{}-{}.{}",
                stem,
                Local::now().format("%Y%m%d-%H%M%S"),
                ext
            );
            let path = self.config.export_dir.join(name);
            std::fs::write(&path, contents)?;
            Ok(path)
        })();

        match result {
            Ok(path) => {
                self.last_error = None;
                self.add_log(format!("Saved {}", path.display()));
            }
            Err(e) => {
                self.last_error = Some(e.user_message());
                self.add_log(format!("Export failed: {}", e));
            }
        }
    }
}
