//! State-level tests for the Viva dashboard
//!
//! These exercise the edit/add/delete flows and import/export paths on
//! `AppState` directly, without rendering or network access.

use viva::config::AppConfig;
use viva::ui::AppState;

fn test_state() -> AppState {
    let mut config = AppConfig::default();
    config.chat_api_key = "sk-test".to_string();
    config.speech_api_key = "sp-test".to_string();
    config.export_dir = std::env::temp_dir().join("viva-test-exports");
    AppState::new(config)
}

#[test]
fn test_missing_secrets_are_surfaced_not_fatal() {
    let state = AppState::new(AppConfig::default());
    assert!(state.config_error.is_some());
}

#[test]
fn test_valid_config_has_no_error() {
    let state = test_state();
    assert!(state.config_error.is_none());
}

#[test]
fn test_add_question_clears_draft() {
    let mut state = test_state();
    state.new_question = "What is a monad?".to_string();
    state.add_question();

    assert_eq!(state.questions.len(), 1);
    assert!(state.new_question.is_empty());
}

#[test]
fn test_add_blank_question_is_ignored() {
    let mut state = test_state();
    state.new_question = "   ".to_string();
    state.add_question();
    assert!(state.questions.is_empty());
}

#[test]
fn test_edit_save_drops_emptied_entries() {
    let mut state = test_state();
    state
        .questions
        .replace_all(vec!["First".into(), "Second".into(), "Third".into()]);

    state.begin_question_edit();
    assert!(state.editing_questions);
    assert_eq!(state.question_edits.len(), 3);

    state.question_edits[1] = "   ".to_string();
    state.question_edits[2] = "Third, revised".to_string();
    state.save_question_edits();

    assert!(!state.editing_questions);
    assert_eq!(state.questions.texts(), vec!["First", "Third, revised"]);
    assert!(state.questions.iter().all(|q| !q.text.trim().is_empty()));
}

#[test]
fn test_edit_cancel_restores_original() {
    let mut state = test_state();
    state.questions.replace_all(vec!["Untouched".into()]);

    state.begin_question_edit();
    state.question_edits[0] = "Changed".to_string();
    state.cancel_question_edit();

    assert_eq!(state.questions.texts(), vec!["Untouched"]);
}

#[test]
fn test_delete_question_in_edit_mode_keeps_buffers_aligned() {
    let mut state = test_state();
    state
        .questions
        .replace_all(vec!["A".into(), "B".into(), "C".into()]);

    state.begin_question_edit();
    state.delete_question(1);

    assert_eq!(state.questions.texts(), vec!["A", "C"]);
    assert_eq!(state.question_edits, vec!["A", "C"]);
}

#[test]
fn test_rubric_edit_flow() {
    let mut state = test_state();
    state
        .rubric
        .replace_all(vec!["Defines the term".into(), "Gives an example".into()]);

    state.begin_rubric_edit();
    state.rubric_edits[0] = String::new();
    state.save_rubric_edits();

    assert_eq!(state.rubric.texts(), vec!["Gives an example"]);
}

#[test]
fn test_import_questions_from_json_file() {
    let mut state = test_state();
    let path = std::env::temp_dir().join("viva-test-import.json");
    std::fs::write(&path, r#"{"questions": ["Imported one?", "Imported two?"]}"#).unwrap();

    state.import_path = path.to_string_lossy().into_owned();
    state.import_questions();

    assert!(state.last_error.is_none());
    assert_eq!(state.questions.texts(), vec!["Imported one?", "Imported two?"]);

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_import_missing_file_sets_error() {
    let mut state = test_state();
    state.import_path = "/nonexistent/questions.txt".to_string();
    state.import_questions();

    assert!(state.last_error.is_some());
    assert!(state.questions.is_empty());
}

#[test]
fn test_import_empty_path_sets_error() {
    let mut state = test_state();
    state.import_path = String::new();
    state.import_questions();
    assert!(state.last_error.is_some());
}

#[test]
fn test_export_questions_writes_file() {
    let mut state = test_state();
    state.questions.replace_all(vec!["Exported?".into()]);

    state.export_questions();
    assert!(state.last_error.is_none());

    // The status log names the written file
    let logged = state.status_log.back().cloned().unwrap_or_default();
    assert!(logged.starts_with("Saved "));

    let path = logged.trim_start_matches("Saved ").to_string();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "1. Exported?\n");

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_export_empty_list_sets_error() {
    let mut state = test_state();
    state.export_questions();
    assert!(state.last_error.is_some());

    state.last_error = None;
    state.export_rubric();
    assert!(state.last_error.is_some());

    state.last_error = None;
    state.export_transcript();
    assert!(state.last_error.is_some());
}

#[test]
fn test_generate_requires_topic() {
    let mut state = test_state();
    state.topic = String::new();
    state.request_questions();

    assert!(state.last_error.is_some());
    assert!(state.questions_request.is_none());
}

#[test]
fn test_import_during_edit_mode_discards_stale_buffers() {
    let mut state = test_state();
    state
        .questions
        .replace_all(vec!["Old A".into(), "Old B".into()]);
    state.begin_question_edit();

    let path = std::env::temp_dir().join("viva-test-import-during-edit.json");
    std::fs::write(
        &path,
        r#"{"questions": ["New 1", "New 2", "New 3", "New 4"]}"#,
    )
    .unwrap();
    state.import_path = path.to_string_lossy().into_owned();
    state.import_questions();

    // The edit session referred to the replaced list
    assert!(!state.editing_questions);
    assert!(state.question_edits.is_empty());

    // Saving afterwards must not clobber the imported list
    state.save_question_edits();
    assert_eq!(
        state.questions.texts(),
        vec!["New 1", "New 2", "New 3", "New 4"]
    );

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_add_during_edit_mode_keeps_pending_edits() {
    let mut state = test_state();
    state
        .questions
        .replace_all(vec!["First".into(), "Second".into()]);
    state.begin_question_edit();
    state.question_edits[0] = "First, revised".to_string();

    state.new_question = "Third".to_string();
    state.add_question();

    assert_eq!(state.question_edits, vec!["First, revised", "Second", "Third"]);
    state.save_question_edits();
    assert_eq!(
        state.questions.texts(),
        vec!["First, revised", "Second", "Third"]
    );
}

#[test]
fn test_add_criterion_during_edit_mode_keeps_pending_edits() {
    let mut state = test_state();
    state.rubric.replace_all(vec!["Defines the term".into()]);
    state.begin_rubric_edit();
    state.rubric_edits[0] = "Defines the term precisely".to_string();

    state.new_criterion = "Cites a source".to_string();
    state.add_criterion();
    state.save_rubric_edits();

    assert_eq!(
        state.rubric.texts(),
        vec!["Defines the term precisely", "Cites a source"]
    );
}

#[test]
fn test_list_mutation_cancels_pending_synthesis() {
    let mut state = test_state();
    state
        .questions
        .replace_all(vec!["Keep".into(), "Drop".into()]);
    state.synthesis_request = Some(uuid::Uuid::new_v4());

    state.delete_question(1);
    assert!(state.synthesis_request.is_none());

    state.synthesis_request = Some(uuid::Uuid::new_v4());
    state.begin_question_edit();
    state.save_question_edits();
    assert!(state.synthesis_request.is_none());
}

#[test]
fn test_follow_ups_require_transcript() {
    let mut state = test_state();
    state.topic = "cell biology".to_string();
    state.transcript = String::new();
    state.request_follow_ups();

    assert!(state.last_error.is_some());
    assert!(state.followups_request.is_none());
}

#[test]
fn test_uploaded_wav_duration_is_logged() {
    let mut state = test_state();
    let samples = vec![0.0f32; 48000];
    let bytes = viva::audio::wav::encode_wav_bytes(&samples, 16000, 1).unwrap();
    let path = std::env::temp_dir().join("viva-test-upload.wav");
    std::fs::write(&path, bytes).unwrap();

    state.audio_path = path.to_string_lossy().into_owned();
    state.transcribe_uploaded_file();

    assert!(state
        .status_log
        .iter()
        .any(|line| line.contains("3.0s of audio")));

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_clear_exam_resets_lists_and_edit_state() {
    let mut state = test_state();
    state.questions.replace_all(vec!["Q".into()]);
    state.rubric.replace_all(vec!["C".into()]);
    state.begin_question_edit();
    state.synthesis_request = Some(uuid::Uuid::new_v4());

    state.clear_exam();

    assert!(state.questions.is_empty());
    assert!(state.rubric.is_empty());
    assert!(!state.editing_questions);
    assert!(state.question_edits.is_empty());
    assert!(state.synthesis_request.is_none());
}
