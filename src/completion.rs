use std::sync::Arc;

use crate::error::{ExpungementError, Result};
use crate::models::{ChatMessage, ChatRequest, EligibilityReport};
use crate::prompt::SYSTEM_PROMPT;
use crate::transport::Transport;

pub struct CompletionClient {
    tx: Arc<dyn Transport>,
    model: String,
}

impl CompletionClient {
    pub fn new(tx: Arc<dyn Transport>, model: String) -> Self {
        Self { tx, model }
    }

    /// Send the system instruction and `prompt`, returning the first choice's text
    pub async fn complete(&self, prompt: &str) -> Result<EligibilityReport> {
        tracing::info!("Requesting eligibility report from model {}", self.model);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
        };

        let response = self.tx.chat(&request).await?;

        if let Some(choice) = response.choices.into_iter().next() {
            Ok(EligibilityReport(choice.message.content))
        } else {
            Err(ExpungementError::EmptyCompletion)
        }
    }
}
