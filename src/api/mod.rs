//! Clients for the hosted model APIs
//!
//! Thin wrappers over the chat-completion and speech endpoints. All
//! failures are converted into [`crate::VivaError`] and surfaced to the
//! user as a single message; no retries.

pub mod chat;
pub mod speech;

pub use chat::ChatClient;
pub use speech::SpeechClient;
