//! Exam setup panel
//!
//! Topic entry, question count, difficulty, voice selection, and the
//! generate/import actions.

use crate::api::speech::VOICES;
use crate::exam::Difficulty;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Setup panel for exam parameters
pub struct SetupPanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> SetupPanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Exam Setup")
                .size(16.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.add_space(self.theme.spacing_sm);

        ui.label(RichText::new("Topic").color(self.theme.text_secondary));
        ui.add(
            egui::TextEdit::multiline(&mut self.state.topic)
                .hint_text("e.g. Photosynthesis in C3 and C4 plants")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(self.theme.spacing_sm);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Questions").color(self.theme.text_secondary));
            ui.add(egui::DragValue::new(&mut self.state.question_count).range(1..=20));
        });

        ui.horizontal(|ui| {
            ui.label(RichText::new("Difficulty").color(self.theme.text_secondary));
            egui::ComboBox::from_id_salt("difficulty")
                .selected_text(self.state.difficulty.label())
                .show_ui(ui, |ui| {
                    for level in Difficulty::ALL {
                        ui.selectable_value(&mut self.state.difficulty, level, level.label());
                    }
                });
        });

        ui.add_space(self.theme.spacing_sm);

        ui.label(RichText::new("Persona (optional)").color(self.theme.text_secondary));
        ui.add(
            egui::TextEdit::singleline(&mut self.state.persona)
                .hint_text("e.g. a strict external examiner")
                .desired_width(f32::INFINITY),
        );

        ui.add_space(self.theme.spacing_sm);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Voice").color(self.theme.text_secondary));
            egui::ComboBox::from_id_salt("voice")
                .selected_text(&self.state.voice)
                .show_ui(ui, |ui| {
                    for voice in VOICES {
                        ui.selectable_value(&mut self.state.voice, voice.to_string(), *voice);
                    }
                });
        });

        ui.add_space(self.theme.spacing_sm);

        let generating = self.state.questions_request.is_some();
        let label = if generating {
            "Generating..."
        } else {
            "Generate Questions"
        };
        if ui
            .add_enabled(!generating, egui::Button::new(label))
            .clicked()
        {
            self.state.request_questions();
        }

        ui.add_space(self.theme.spacing);
        ui.separator();
        ui.add_space(self.theme.spacing_sm);

        ui.label(
            RichText::new("Import questions")
                .size(14.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.label(
            RichText::new("Newline-delimited text or JSON")
                .size(12.0)
                .color(self.theme.text_muted),
        );
        ui.add(
            egui::TextEdit::singleline(&mut self.state.import_path)
                .hint_text("path/to/questions.txt")
                .desired_width(f32::INFINITY),
        );
        if ui.button("Load File").clicked() {
            self.state.import_questions();
        }
    }
}
