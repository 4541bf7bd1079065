//! Rubric panel component
//!
//! Shows the evaluation checklist with a view/edit toggle. View mode is
//! live-exam mode: each criterion has a yes/no checkbox. Edit mode works
//! like the question list.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Rubric checklist with view/edit modes
pub struct RubricPanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> RubricPanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Rubric")
                    .size(16.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            if !self.state.rubric.is_empty() {
                ui.label(
                    RichText::new(format!(
                        "{}/{} met",
                        self.state.rubric.met_count(),
                        self.state.rubric.len()
                    ))
                    .color(self.theme.text_muted),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.state.editing_rubric {
                    if ui.button("Save").clicked() {
                        self.state.save_rubric_edits();
                    }
                    if ui.button("Cancel").clicked() {
                        self.state.cancel_rubric_edit();
                    }
                } else {
                    let generating = self.state.rubric_request.is_some();
                    let label = if generating {
                        "Generating..."
                    } else {
                        "Generate Rubric"
                    };
                    if ui
                        .add_enabled(!generating, egui::Button::new(label))
                        .clicked()
                    {
                        self.state.request_rubric();
                    }

                    let has_rubric = !self.state.rubric.is_empty();
                    if ui
                        .add_enabled(has_rubric, egui::Button::new("Edit"))
                        .clicked()
                    {
                        self.state.begin_rubric_edit();
                    }
                    if ui
                        .add_enabled(has_rubric, egui::Button::new("Export"))
                        .clicked()
                    {
                        self.state.export_rubric();
                    }
                    if ui
                        .add_enabled(has_rubric, egui::Button::new("Reset"))
                        .on_hover_text("Clear all checkboxes for the next candidate")
                        .clicked()
                    {
                        self.state.rubric.reset_checks();
                    }
                }
            });
        });

        ui.add_space(self.theme.spacing_sm);

        if self.state.rubric.is_empty() && !self.state.editing_rubric {
            ui.label(
                RichText::new("No rubric yet. Generate one from the topic and questions.")
                    .color(self.theme.text_muted),
            );
        } else if self.state.editing_rubric {
            self.show_edit_mode(ui);
        } else {
            self.show_view_mode(ui);
        }

        ui.add_space(self.theme.spacing_sm);

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.new_criterion)
                    .hint_text("Add a criterion...")
                    .desired_width(ui.available_width() - 60.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add").clicked() || submitted {
                self.state.add_criterion();
            }
        });
    }

    fn show_view_mode(&mut self, ui: &mut egui::Ui) {
        for criterion in self.state.rubric.iter_mut() {
            ui.horizontal(|ui| {
                ui.checkbox(&mut criterion.met, "");
                let color = if criterion.met {
                    self.theme.success
                } else {
                    self.theme.text_primary
                };
                ui.label(RichText::new(&criterion.text).color(color));
            });
        }
    }

    fn show_edit_mode(&mut self, ui: &mut egui::Ui) {
        let mut delete_index = None;

        for (i, edit) in self.state.rubric_edits.iter_mut().enumerate() {
            ui.horizontal(|ui| {
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
            self.state.rubric.remove(i);
            if i < self.state.rubric_edits.len() {
                self.state.rubric_edits.remove(i);
            }
        }

        ui.label(
            RichText::new("Emptied entries are removed on save.")
                .size(12.0)
                .color(self.theme.text_muted),
        );
    }
}
