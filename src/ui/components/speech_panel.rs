//! Speech panel component
//!
//! Student audio capture and upload, transcription status, and the
//! transcript display with export.

use crate::ui::state::AppState;
#[cfg(feature = "audio-io")]
use crate::ui::state::RecordingState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Speech recording/upload and transcript panel
pub struct SpeechPanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> SpeechPanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Student Response")
                .size(16.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.add_space(self.theme.spacing_sm);

        ui.horizontal(|ui| {
            self.show_record_controls(ui);

            ui.separator();

            // Upload path
            ui.add(
                egui::TextEdit::singleline(&mut self.state.audio_path)
                    .hint_text("path/to/response.wav")
                    .desired_width(220.0),
            );
            let transcribing = self.state.transcription_request.is_some();
            if ui
                .add_enabled(!transcribing, egui::Button::new("Transcribe File"))
                .clicked()
            {
                self.state.transcribe_uploaded_file();
            }
        });

        ui.add_space(self.theme.spacing_sm);

        // Transcript
        ui.horizontal(|ui| {
            ui.label(RichText::new("Transcript").color(self.theme.text_secondary));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_transcript = !self.state.transcript.trim().is_empty();
                if ui
                    .add_enabled(has_transcript, egui::Button::new("Export"))
                    .clicked()
                {
                    self.state.export_transcript();
                }

                let generating = self.state.followups_request.is_some();
                let label = if generating {
                    "Generating..."
                } else {
                    "Follow-up Questions"
                };
                if ui
                    .add_enabled(has_transcript && !generating, egui::Button::new(label))
                    .on_hover_text("Generate questions probing this answer")
                    .clicked()
                {
                    self.state.request_follow_ups();
                }
            });
        });

        if self.state.transcription_request.is_some() {
            ui.label(RichText::new("Transcribing...").color(self.theme.warning));
        }

        egui::ScrollArea::vertical()
            .id_salt("transcript")
            .max_height(120.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.state.transcript)
                        .hint_text("The transcript will appear here.")
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
            });
    }

    #[cfg(feature = "audio-io")]
    fn show_record_controls(&mut self, ui: &mut egui::Ui) {
        match self.state.recording_state {
            RecordingState::Idle => {
                if ui
                    .button(RichText::new("🎤 Record").color(self.theme.text_primary))
                    .on_hover_text("Record the student's answer")
                    .clicked()
                {
                    self.state.start_recording();
                }
            }
            RecordingState::Recording => {
                ui.label(
                    RichText::new(format!("● {:.1}s", self.state.recording_secs()))
                        .color(self.theme.recording),
                );
                if ui.button("⏹ Stop & Transcribe").clicked() {
                    self.state.stop_recording();
                }
                if ui.button("Cancel").clicked() {
                    self.state.cancel_recording();
                }
            }
            RecordingState::Processing => {
                ui.label(RichText::new("⏳ Processing...").color(self.theme.warning));
            }
        }
    }

    #[cfg(not(feature = "audio-io"))]
    fn show_record_controls(&mut self, ui: &mut egui::Ui) {
        let _ = &self.state.recording_state;
        ui.label(
            RichText::new("Recording unavailable (built without audio-io)")
                .color(self.theme.text_muted),
        );
    }
}
