use thiserror::Error;

/// Generic apology shown to the learner when every endpoint fails.
/// Per-endpoint detail stays in the logs; none of it reaches the chat.
pub const APOLOGY: &str =
    "I apologize, but I encountered an error. Please try again in a moment.";

#[derive(Debug, Error)]
pub enum MentorError {
    /// The request never completed: DNS, connection refused, transport timeout.
    #[error("transport failure for {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint was reachable but returned a non-success status.
    /// Body fields are best-effort parsed from the `error` object; when the
    /// body is not parseable, `message` carries the raw status and text.
    #[error("endpoint {endpoint} returned HTTP {http_status}: {message}")]
    Endpoint {
        endpoint: String,
        http_status: u16,
        code: Option<i64>,
        status: Option<String>,
        message: String,
        detail: Option<Box<serde_json::Value>>,
    },

    /// Success status but a body the response schema can't account for.
    #[error("malformed response from {endpoint}: {message}")]
    Malformed { endpoint: String, message: String },

    /// Every configured endpoint failed. Failures are in attempt order,
    /// one per endpoint, and the list is never empty.
    #[error("all {} endpoints failed", .failures.len())]
    Exhausted { failures: Vec<MentorError> },

    #[error("config error: {0}")]
    Config(String),
}

impl MentorError {
    /// Extract the endpoint name from per-attempt error variants.
    /// Returns None for variants that don't carry endpoint context.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Endpoint { endpoint, .. }
            | Self::Malformed { endpoint, .. } => Some(endpoint),
            _ => None,
        }
    }

    /// Produce a message safe for showing to the learner.
    /// Does not leak URLs, status codes, or upstream error bodies.
    pub fn user_message(&self) -> String {
        match self {
            Self::Exhausted { .. } | Self::Transport { .. } | Self::Endpoint { .. } => {
                APOLOGY.to_string()
            }
            Self::Malformed { .. } => {
                "I received a response I could not read. Please try again.".to_string()
            }
            Self::Config(msg) => format!("configuration error: {msg}"),
        }
    }
}
