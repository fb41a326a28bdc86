//! Error types for the chat router.
//!
//! None of these reach the caller of [`crate::CommandRouter::handle`]; the
//! router classifies failures with them and then answers with a fixed reply.

use std::time::Duration;

use daybook_action::{ExtractionError, ResponderError, StoreError};

/// Errors from building or running the chat router.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("trigger phrase cannot be empty")]
    EmptyTrigger,
    #[error("reply for trigger '{0}' cannot be empty")]
    EmptyReply(String),
    #[error("external call timed out after {0:?}")]
    Timeout(Duration),
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("responder error: {0}")]
    Responder(#[from] ResponderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(
            ChatError::EmptyTrigger.to_string(),
            "trigger phrase cannot be empty"
        );
        assert_eq!(
            ChatError::EmptyReply("hello".to_string()).to_string(),
            "reply for trigger 'hello' cannot be empty"
        );
        assert_eq!(
            ChatError::Timeout(Duration::from_secs(30)).to_string(),
            "external call timed out after 30s"
        );
    }

    #[test]
    fn test_chat_error_from_capability_errors() {
        let err: ChatError = ExtractionError::MissingField("amount".to_string()).into();
        assert!(matches!(err, ChatError::Extraction(_)));
        assert!(err.to_string().contains("amount"));

        let err: ChatError = StoreError::Unavailable("down".to_string()).into();
        assert!(matches!(err, ChatError::Store(_)));

        let err: ChatError = ResponderError::RequestFailed("HTTP 500".to_string()).into();
        assert!(matches!(err, ChatError::Responder(_)));
        assert!(err.to_string().contains("HTTP 500"));
    }
}
