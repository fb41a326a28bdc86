//! Error types for the assistant capabilities.

/// Errors from structured extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Could not understand input: {0}")]
    Unparseable(String),
    #[error("Extraction service failed: {0}")]
    Upstream(String),
}

/// Errors from record persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
    #[error("Record rejected: {0}")]
    Rejected(String),
}

/// Errors from the conversational responder.
#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    #[error("No API key found in environment variable {0}")]
    MissingApiKey(String),
    #[error("Responder request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid responder response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ResponderError {
    fn from(err: reqwest::Error) -> Self {
        ResponderError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_display() {
        let err = ExtractionError::MissingField("description".to_string());
        assert_eq!(err.to_string(), "Missing required field: description");

        let err = ExtractionError::Unparseable("???".to_string());
        assert_eq!(err.to_string(), "Could not understand input: ???");

        let err = ExtractionError::Upstream("503".to_string());
        assert_eq!(err.to_string(), "Extraction service failed: 503");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Unavailable("lock poisoned".to_string());
        assert_eq!(err.to_string(), "Record store unavailable: lock poisoned");

        let err = StoreError::Rejected("duplicate".to_string());
        assert_eq!(err.to_string(), "Record rejected: duplicate");
    }

    #[test]
    fn test_responder_error_display() {
        let err = ResponderError::MissingApiKey("DAYBOOK_LLM_API_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "No API key found in environment variable DAYBOOK_LLM_API_KEY"
        );

        let err = ResponderError::InvalidResponse("no choices".to_string());
        assert_eq!(err.to_string(), "Invalid responder response: no choices");
    }

    #[test]
    fn test_errors_implement_debug() {
        let dbg = format!("{:?}", ExtractionError::MissingField("amount".to_string()));
        assert!(dbg.contains("MissingField"));

        let dbg = format!("{:?}", StoreError::Rejected("x".to_string()));
        assert!(dbg.contains("Rejected"));

        let dbg = format!("{:?}", ResponderError::RequestFailed("x".to_string()));
        assert!(dbg.contains("RequestFailed"));
    }
}
