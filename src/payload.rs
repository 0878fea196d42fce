use serde::Serialize;

use crate::store::Turn;

/// How many history turns are carried into each request. Older turns are
/// dropped to bound request size.
pub const HISTORY_WINDOW: usize = 10;

/// Synthetic model turn acknowledging the system prompt. The generation API
/// has no system role, so the prompt rides as a user/model exchange.
pub const ACKNOWLEDGMENT: &str =
    "Understood. I will guide the student through Socratic questioning instead of giving direct answers.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub text: String,
}

/// One entry of the outgoing `contents` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Fixed sampling settings, sent verbatim with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 2048,
        }
    }
}

/// Assemble the ordered request payload: the system prompt as a synthetic
/// user/model exchange, then at most the last [`HISTORY_WINDOW`] history
/// turns oldest-first, then the new message. History roles other than
/// "user" are normalized to the model side. Pure; no validation of text.
pub fn build_payload(system_prompt: &str, history: &[Turn], new_message: &str) -> Vec<Content> {
    let mut contents = Vec::with_capacity(history.len().min(HISTORY_WINDOW) + 3);

    contents.push(Content::new(Role::User, system_prompt));
    contents.push(Content::new(Role::Model, ACKNOWLEDGMENT));

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    for turn in &history[start..] {
        let role = if turn.role == "user" {
            Role::User
        } else {
            Role::Model
        };
        contents.push(Content::new(role, turn.text.clone()));
    }

    contents.push(Content::new(Role::User, new_message));
    contents
}
