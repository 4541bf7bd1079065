//! egui/eframe user interface for the Viva dashboard

mod app;
pub mod components;
mod state;
mod theme;

pub use app::VivaApp;
pub use state::{AppState, QuestionAudio, RecordingState};
pub use theme::Theme;

/// Run the GUI application
pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 560.0])
            .with_title("Viva"),
        ..Default::default()
    };

    eframe::run_native(
        "Viva",
        options,
        Box::new(|cc| Ok(Box::new(VivaApp::new(cc)))),
    )
}
