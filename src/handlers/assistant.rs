//! Authenticated AI tutor endpoints

use log::info;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

use super::rejection::reject;
use crate::assistant::prompts::{self, NO_RESPONSE};
use crate::assistant::ChatCompletion;
use crate::auth::Identity;
use crate::constants::MAX_TEST_QUESTIONS;
use crate::error::StudentDashboardError;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct ExplainNotesRequest {
    #[serde(default, rename = "notesText")]
    pub notes_text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateTestRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub count: Option<u32>,
}

/// Helper function to include the chat client in a route
pub fn with_chat(
    chat: Arc<dyn ChatCompletion>,
) -> impl Filter<Extract = (Arc<dyn ChatCompletion>,), Error = Infallible> + Clone {
    warp::any().map(move || chat.clone())
}

fn required(value: &str, message: &str) -> Result<(), Rejection> {
    if value.trim().is_empty() {
        return Err(reject(StudentDashboardError::ValidationError(message.to_string())));
    }
    Ok(())
}

pub async fn health_handler(identity: Identity) -> Result<impl Reply, Rejection> {
    log::debug!("Health check by account {}", identity.subject_id);
    Ok(warp::reply::json(&serde_json::json!({ "ok": true })))
}

pub async fn ask_handler(
    identity: Identity,
    body: AskRequest,
    chat: Arc<dyn ChatCompletion>,
) -> Result<impl Reply, Rejection> {
    required(&body.question, "Missing question")?;
    info!("ask: account={}", identity.subject_id);

    let answer = chat
        .complete(prompts::ask_request(&body.question))
        .await
        .map_err(reject)?
        .unwrap_or_else(|| NO_RESPONSE.to_string());

    Ok(warp::reply::json(&serde_json::json!({ "answer": answer })))
}

pub async fn explain_notes_handler(
    identity: Identity,
    body: ExplainNotesRequest,
    chat: Arc<dyn ChatCompletion>,
) -> Result<impl Reply, Rejection> {
    required(&body.notes_text, "Missing notesText")?;
    info!("explain-notes: account={} chars={}", identity.subject_id, body.notes_text.len());

    let explanation = chat
        .complete(prompts::explain_notes_request(&body.notes_text))
        .await
        .map_err(reject)?
        .unwrap_or_else(|| NO_RESPONSE.to_string());

    Ok(warp::reply::json(&serde_json::json!({ "explanation": explanation })))
}

pub async fn generate_test_handler(
    identity: Identity,
    body: GenerateTestRequest,
    chat: Arc<dyn ChatCompletion>,
) -> Result<impl Reply, Rejection> {
    const MISSING: &str = "subject, topic, count required";
    required(&body.subject, MISSING)?;
    required(&body.topic, MISSING)?;
    let count = match body.count {
        Some(count) if count > 0 => count,
        _ => return Err(reject(StudentDashboardError::ValidationError(MISSING.to_string()))),
    };
    if count > MAX_TEST_QUESTIONS {
        return Err(reject(StudentDashboardError::ValidationError(format!(
            "count must be at most {}",
            MAX_TEST_QUESTIONS
        ))));
    }
    info!("generate-test: account={} count={}", identity.subject_id, count);

    let raw = chat
        .complete(prompts::generate_test_request(&body.subject, &body.topic, count))
        .await
        .map_err(reject)?
        .unwrap_or_else(|| "[]".to_string());
    let questions = prompts::parse_questions(&raw);

    Ok(warp::reply::json(&serde_json::json!({
        "questions": questions,
        "raw": raw,
    })))
}
