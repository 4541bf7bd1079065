//! Channel plumbing tests for the API pipeline
//!
//! These verify command/event wiring and shutdown behavior. No network
//! access happens: commands are accepted by the channels whether or not
//! the hosted APIs are reachable, and the worker surfaces failures as
//! error events rather than panicking.

use std::time::Duration;
use uuid::Uuid;
use viva::config::AppConfig;
use viva::exam::Difficulty;
use viva::pipeline::{ApiCommand, ApiPipeline};

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.chat_api_key = "sk-test".to_string();
    config.speech_api_key = "sp-test".to_string();
    config
}

#[test]
fn test_pipeline_creation_and_shutdown() {
    let pipeline = ApiPipeline::new(test_config());
    let command_tx = pipeline.command_sender();
    let event_rx = pipeline.event_receiver();

    pipeline.start_worker().unwrap();
    std::thread::sleep(Duration::from_millis(50));

    command_tx.send(ApiCommand::Shutdown).unwrap();

    // The worker acknowledges shutdown with a final event
    let mut saw_shutdown = false;
    while let Ok(event) = event_rx.recv_timeout(Duration::from_secs(2)) {
        if matches!(event, viva::pipeline::ApiEvent::Shutdown) {
            saw_shutdown = true;
            break;
        }
    }
    assert!(saw_shutdown, "Expected a Shutdown event");
}

#[test]
fn test_pipeline_accepts_commands() {
    let pipeline = ApiPipeline::new(test_config());
    let command_tx = pipeline.command_sender();
    let _event_rx = pipeline.event_receiver();

    pipeline.start_worker().unwrap();
    std::thread::sleep(Duration::from_millis(50));

    let send_result = command_tx.send(ApiCommand::GenerateQuestions {
        topic: "Test topic".to_string(),
        count: 3,
        difficulty: Difficulty::Beginner,
        persona: String::new(),
        request_id: Uuid::new_v4(),
    });
    assert!(send_result.is_ok(), "Failed to send pipeline command");

    let send_result = command_tx.send(ApiCommand::GenerateFollowUps {
        topic: "Test topic".to_string(),
        transcript: "A spoken answer.".to_string(),
        questions: vec!["Already asked?".to_string()],
        persona: "a calm examiner".to_string(),
        request_id: Uuid::new_v4(),
    });
    assert!(send_result.is_ok(), "Failed to send follow-up command");

    let _ = command_tx.send(ApiCommand::Shutdown);
}

#[test]
fn test_worker_stops_when_senders_drop() {
    let pipeline = ApiPipeline::new(test_config());
    let command_tx = pipeline.command_sender();
    let event_rx = pipeline.event_receiver();

    pipeline.start_worker().unwrap();
    std::thread::sleep(Duration::from_millis(50));

    // Dropping every sender disconnects the command channel
    drop(command_tx);

    let mut saw_shutdown = false;
    while let Ok(event) = event_rx.recv_timeout(Duration::from_secs(2)) {
        if matches!(event, viva::pipeline::ApiEvent::Shutdown) {
            saw_shutdown = true;
            break;
        }
    }
    assert!(saw_shutdown, "Expected a Shutdown event after disconnect");
}
