//! Chat transcript about a set of selected papers.

use chrono::Utc;
use rh_client::AiBackend;
use rh_core::entities::{ChatMessage, Paper};
use rh_core::enums::ChatRole;

use crate::error::AiError;
use crate::prompts;

/// Ordered conversation. The user's message is recorded before the remote
/// call, so a failed call leaves it in place without an answer.
#[derive(Debug, Default, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Ask `question` about `papers` and append the answer.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Validation`] for a blank question,
    /// [`AiError::NoPapers`] with nothing selected, and [`AiError::Client`]
    /// if the backend call fails. Validation errors record nothing.
    pub async fn ask<B: AiBackend + ?Sized>(
        &mut self,
        backend: &B,
        papers: &[Paper],
        question: &str,
    ) -> Result<&ChatMessage, AiError> {
        if question.trim().is_empty() {
            return Err(AiError::Validation("enter a message first".into()));
        }
        if papers.is_empty() {
            return Err(AiError::NoPapers);
        }

        self.push(ChatRole::User, question.to_string());
        let context = prompts::papers_context(papers);
        let answer = backend.chat(&context, question).await.map_err(|error| {
            tracing::warn!(%error, "chat failed");
            AiError::from(error)
        })?;
        Ok(self.push(ChatRole::Ai, answer))
    }

    fn push(&mut self, role: ChatRole, content: String) -> &ChatMessage {
        self.next_id += 1;
        let timestamp = Utc::now();
        self.messages.push(ChatMessage {
            id: format!("{}-{}", timestamp.timestamp_millis(), self.next_id),
            role,
            content,
            timestamp,
        });
        &self.messages[self.messages.len() - 1]
    }
}
