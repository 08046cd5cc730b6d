//! Prompt construction for the tutor endpoints and parsing of generated tests

use serde_json::Value;

use super::client::ChatRequest;

pub const ASK_MAX_TOKENS: u32 = 800;
pub const EXPLAIN_MAX_TOKENS: u32 = 1200;
pub const TEST_MAX_TOKENS: u32 = 1000;

/// Fallback when the model returns no content
pub const NO_RESPONSE: &str = "No response";

pub fn ask_request(question: &str) -> ChatRequest {
    ChatRequest {
        system: "You are a helpful academic tutor. Explain step-by-step and be concise.".to_string(),
        user: question.to_string(),
        max_tokens: ASK_MAX_TOKENS,
    }
}

pub fn explain_notes_request(notes: &str) -> ChatRequest {
    ChatRequest {
        system: "You are a helpful notes explainer for students.".to_string(),
        user: format!(
            "You are a patient teacher. Explain the following student notes in clear, simple language, \
             provide summaries, key points, and examples if relevant. Notes:\n\n{}",
            notes
        ),
        max_tokens: EXPLAIN_MAX_TOKENS,
    }
}

pub fn generate_test_request(subject: &str, topic: &str, count: u32) -> ChatRequest {
    ChatRequest {
        system: "You are a helpful MCQ generator for student practice.".to_string(),
        user: format!(
            "Create {} multiple-choice questions (4 options each) on the topic \"{}\" for subject \"{}\". \
             For each question return a JSON object with fields: question, options (array of 4 strings), \
             answer (index 0-3). Return a JSON array only.",
            count, topic, subject
        ),
        max_tokens: TEST_MAX_TOKENS,
    }
}

/// Pull the question array out of a model reply.
///
/// Tries the whole reply first, then the span between the first `[` and the
/// last `]` (models like to wrap JSON in prose or code fences). Anything else
/// yields an empty list.
pub fn parse_questions(raw: &str) -> Vec<Value> {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
        return items;
    }

    let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(&raw[start..=end]) {
        Ok(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
