use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::MentorError;
use crate::payload::{self, HISTORY_WINDOW};
use crate::prompt::{self, LearnerProfile, WELCOME};
use crate::store::{ConversationStore, Turn};

/// One learner's conversation: profile + store + dispatcher, wired
/// explicitly at construction. `send` takes `&mut self`, so a session has
/// at most one dispatch in flight.
pub struct ChatSession {
    dispatcher: Dispatcher,
    store: Arc<dyn ConversationStore>,
    profile: LearnerProfile,
}

impl ChatSession {
    pub fn new(config: Config, store: Arc<dyn ConversationStore>) -> Result<Self, MentorError> {
        let dispatcher = Dispatcher::new(config.endpoints, config.api_key)?;
        Ok(Self {
            dispatcher,
            store,
            profile: config.profile,
        })
    }

    /// Returns and persists the welcome message on first contact,
    /// None when the conversation already has turns.
    pub async fn greeting(&mut self) -> Option<&'static str> {
        if self.store.is_empty().await {
            self.store.append(Turn::tutor(WELCOME)).await;
            Some(WELCOME)
        } else {
            None
        }
    }

    /// Send one learner message and return the tutor's reply. On total
    /// endpoint exhaustion the reply is a generic apology; the per-endpoint
    /// detail is logged and the session stays usable.
    pub async fn send(&mut self, user_message: &str) -> String {
        let history = self.store.recent(HISTORY_WINDOW).await;
        self.store.append(Turn::user(user_message)).await;

        let system_prompt = prompt::system_prompt(&self.profile);
        let contents = payload::build_payload(&system_prompt, &history, user_message);

        match self.dispatcher.dispatch(&contents).await {
            Ok(text) => {
                self.store.append(Turn::tutor(text.clone())).await;
                text
            }
            Err(e) => {
                tracing::error!("dispatch failed: {e}");
                let reply = e.user_message();
                self.store.append(Turn::tutor(reply.clone())).await;
                reply
            }
        }
    }
}
