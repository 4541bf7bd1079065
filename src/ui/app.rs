//! Main application struct and eframe integration

use crate::config::AppConfig;
use crate::pipeline::ApiPipeline;
use crate::ui::components::{QuestionList, RubricPanel, SetupPanel, SpeechPanel, StatusBar};
use crate::ui::state::{AppState, RecordingState};
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use tracing::error;

/// Main Viva application
pub struct VivaApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
    /// Whether the backend has been started
    initialized: bool,
}

impl VivaApp {
    /// Create a new Viva application
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let config = AppConfig::from_env();
        Self {
            state: AppState::new(config),
            theme,
            initialized: false,
        }
    }

    /// Start the API pipeline (called on first frame)
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        if let Some(err) = &self.state.config_error {
            self.state.last_error = Some(err.clone());
        }

        let pipeline = ApiPipeline::new(self.state.config.clone());
        let command_tx = pipeline.command_sender();
        let event_rx = pipeline.event_receiver();
        match pipeline.start_worker() {
            Ok(()) => {
                self.state.connect_pipeline(command_tx, event_rx);
                self.state.add_log("Ready".to_string());
            }
            Err(e) => {
                error!("Failed to start API pipeline: {}", e);
                self.state.last_error = Some(e.user_message());
            }
        }
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Viva")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Oral Exam Assistant")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button("🗑")
                            .on_hover_text("Clear questions and rubric")
                            .clicked()
                        {
                            self.state.clear_exam();
                        }
                    });
                });
            });
    }

    /// Show the exam setup sidebar
    fn show_setup(&mut self, ctx: &egui::Context) {
        SidePanel::left("setup")
            .resizable(true)
            .default_width(280.0)
            .min_width(240.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                SetupPanel::new(&mut self.state, &self.theme).show(ui);
            });
    }

    /// Show the speech section and status bar at the bottom
    fn show_bottom(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("speech")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                SpeechPanel::new(&mut self.state, &self.theme).show(ui);
                ui.separator();
                StatusBar::new(&mut self.state, &self.theme).show(ui);
            });
    }

    /// Show the main content area (questions and rubric)
    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("content")
                    .show(ui, |ui| {
                        QuestionList::new(&mut self.state, &self.theme).show(ui);
                        ui.add_space(self.theme.spacing);
                        ui.separator();
                        ui.add_space(self.theme.spacing);
                        RubricPanel::new(&mut self.state, &self.theme).show(ui);
                    });
            });
    }
}

impl eframe::App for VivaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Start the backend on first frame
        self.initialize();

        // Drain backend events
        self.state.poll_events();

        // Render UI
        self.show_header(ctx);
        self.show_setup(ctx);
        self.show_bottom(ctx);
        self.show_content(ctx);

        // Keep repainting while work is pending or audio is streaming in
        if self.state.is_busy() || self.state.recording_state != RecordingState::Idle {
            ctx.request_repaint();
        }
    }
}
