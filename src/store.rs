use async_trait::async_trait;
use tokio::sync::Mutex;

/// One persisted conversation turn. Roles are free-form strings as supplied
/// by the backing store; anything other than "user" is treated as the model
/// side when a payload is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: String,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }

    pub fn tutor(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            text: text.into(),
        }
    }
}

/// Seam to the conversation persistence collaborator. `append` is
/// fire-and-forget from the session's perspective; `recent` returns the
/// trimmed history oldest-first.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn append(&self, turn: Turn);

    /// The most recent `limit` turns, oldest-first.
    async fn recent(&self, limit: usize) -> Vec<Turn>;

    async fn is_empty(&self) -> bool;
}

/// In-process store backing the terminal binary and the tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    turns: Mutex<Vec<Turn>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn append(&self, turn: Turn) {
        self.turns.lock().await.push(turn);
    }

    async fn recent(&self, limit: usize) -> Vec<Turn> {
        let turns = self.turns.lock().await;
        let start = turns.len().saturating_sub(limit);
        turns[start..].to_vec()
    }

    async fn is_empty(&self) -> bool {
        self.turns.lock().await.is_empty()
    }
}
