//! AI tutor pass-through to an external chat-completion API

pub mod client;
pub mod prompts;

pub use client::{ChatCompletion, ChatRequest, GroqClient};
pub use prompts::parse_questions;
