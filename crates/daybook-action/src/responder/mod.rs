//! Open-ended conversational replies.

pub mod llm;

use async_trait::async_trait;

use crate::error::ResponderError;

pub use llm::LlmResponder;

/// Produces a free-form reply for messages no other layer handled.
#[async_trait]
pub trait ConversationalResponder: Send + Sync {
    async fn reply(&self, text: &str) -> Result<String, ResponderError>;
}

/// Deterministic responder used when no model endpoint is configured.
#[derive(Debug, Clone, Default)]
pub struct OfflineResponder;

pub const OFFLINE_REPLY: &str = "I can keep track of tasks and expenses for you. \
Try \"remind me to call mom tomorrow\" or \"I spent $12 on lunch\".";

#[async_trait]
impl ConversationalResponder for OfflineResponder {
    async fn reply(&self, _text: &str) -> Result<String, ResponderError> {
        Ok(OFFLINE_REPLY.to_string())
    }
}
