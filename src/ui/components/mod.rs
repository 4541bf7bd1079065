//! Reusable UI components for the Viva dashboard

pub mod question_list;
pub mod rubric_panel;
pub mod setup_panel;
pub mod speech_panel;
pub mod status_bar;

pub use question_list::QuestionList;
pub use rubric_panel::RubricPanel;
pub use setup_panel::SetupPanel;
pub use speech_panel::SpeechPanel;
pub use status_bar::StatusBar;
