//! Status bar component
//!
//! Shows the last error (if any), the most recent status message, and a
//! busy indicator while a hosted request is in flight.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Bottom status bar
pub struct StatusBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.state.is_busy() {
                ui.spinner();
            }

            if let Some(error) = self.state.last_error.clone() {
                ui.label(RichText::new(error).color(self.theme.error));
                if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                    self.state.last_error = None;
                }
            } else if let Some(message) = self.state.status_log.back() {
                ui.label(RichText::new(message).color(self.theme.text_muted));
            } else {
                ui.label(RichText::new("Ready").color(self.theme.text_muted));
            }
        });
    }
}
