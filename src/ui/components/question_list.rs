//! Question list component
//!
//! Shows the question bank with a view/edit toggle. View mode offers
//! per-question speak/export/delete actions; edit mode turns every
//! question into a text buffer committed on save.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Question list with view/edit modes
pub struct QuestionList<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> QuestionList<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Questions")
                    .size(16.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.label(
                RichText::new(format!("({})", self.state.questions.len()))
                    .color(self.theme.text_muted),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.state.editing_questions {
                    if ui.button("Save").clicked() {
                        self.state.save_question_edits();
                    }
                    if ui.button("Cancel").clicked() {
                        self.state.cancel_question_edit();
                    }
                } else {
                    let has_questions = !self.state.questions.is_empty();
                    if ui
                        .add_enabled(has_questions, egui::Button::new("Edit"))
                        .clicked()
                    {
                        self.state.begin_question_edit();
                    }
                    if ui
                        .add_enabled(has_questions, egui::Button::new("Export"))
                        .clicked()
                    {
                        self.state.export_questions();
                    }
                }
            });
        });

        ui.add_space(self.theme.spacing_sm);

        if self.state.questions.is_empty() && !self.state.editing_questions {
            ui.label(
                RichText::new("No questions yet. Generate some or import a list.")
                    .color(self.theme.text_muted),
            );
        } else if self.state.editing_questions {
            self.show_edit_mode(ui);
        } else {
            self.show_view_mode(ui);
        }

        ui.add_space(self.theme.spacing_sm);

        // Manual add works in either mode
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.new_question)
                    .hint_text("Add a question...")
                    .desired_width(ui.available_width() - 60.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add").clicked() || submitted {
                self.state.add_question();
            }
        });
    }

    fn show_view_mode(&mut self, ui: &mut egui::Ui) {
        let mut delete_index = None;
        let mut speak_index = None;
        let mut export_index = None;

        for (i, question) in self.state.questions.iter().enumerate() {
            egui::Frame::none()
                .fill(self.theme.bg_secondary)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{}.", i + 1))
                                .color(self.theme.text_muted)
                                .strong(),
                        );
                        ui.label(
                            RichText::new(&question.text).color(self.theme.text_primary),
                        );

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("🗑").on_hover_text("Delete").clicked() {
                                    delete_index = Some(i);
                                }

                                let synthesizing =
                                    self.state.synthesis_request.is_some();
                                if ui
                                    .add_enabled(!synthesizing, egui::Button::new("🔊"))
                                    .on_hover_text("Read aloud (generate MP3)")
                                    .clicked()
                                {
                                    speak_index = Some(i);
                                }

                                if self.state.question_audio.contains_key(&i)
                                    && ui
                                        .button("💾")
                                        .on_hover_text("Save MP3")
                                        .clicked()
                                {
                                    export_index = Some(i);
                                }
                            },
                        );
                    });
                });
            ui.add_space(4.0);
        }

        if let Some(i) = delete_index {
            self.state.delete_question(i);
        }
        if let Some(i) = speak_index {
            self.state.request_synthesis(i);
        }
        if let Some(i) = export_index {
            self.state.export_audio(i);
        }
    }

    fn show_edit_mode(&mut self, ui: &mut egui::Ui) {
        let mut delete_index = None;

        for (i, edit) in self.state.question_edits.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("{}.", i + 1))
                        .color(self.theme.text_muted)
                        .strong(),
                );
                ui.add(
                    egui::TextEdit::singleline(edit)
                        .desired_width(ui.available_width() - 40.0),
                );
                if ui.button("🗑").on_hover_text("Delete").clicked() {
                    delete_index = Some(i);
                }
            });
        }

        if let Some(i) = delete_index {
            self.state.delete_question(i);
        }

        ui.label(
            RichText::new("Emptied entries are removed on save.")
                .size(12.0)
                .color(self.theme.text_muted),
        );
    }
}
