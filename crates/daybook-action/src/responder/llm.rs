//! Conversational replies from an OpenAI-compatible chat completions endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

use daybook_core::config::LlmConfig;

use super::ConversationalResponder;
use crate::error::ResponderError;

/// Calls `POST {base_url}/chat/completions` with a system prompt and the
/// user's message, returning the first choice's content.
#[derive(Debug, Clone)]
pub struct LlmResponder {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    system_prompt: String,
}

impl LlmResponder {
    /// Create a responder with an explicit API key.
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, ResponderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ResponderError::MissingApiKey(config.api_key_env.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| {
                ResponderError::RequestFailed(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            system_prompt: config.system_prompt.clone(),
        })
    }

    /// Create a responder reading the API key from `config.api_key_env`.
    pub fn from_env(config: &LlmConfig) -> Result<Self, ResponderError> {
        let key = std::env::var(&config.api_key_env)
            .map_err(|_| ResponderError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, key)
    }

    /// Request body for a single-turn completion.
    pub fn build_request_body(&self, text: &str) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "system", "content": self.system_prompt },
                { "role": "user", "content": text },
            ],
        })
    }

    fn headers(&self) -> Result<HeaderMap, ResponderError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|e| {
                ResponderError::RequestFailed(format!("invalid authorization header: {e}"))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl ConversationalResponder for LlmResponder {
    async fn reply(&self, text: &str) -> Result<String, ResponderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request_body(text);

        tracing::debug!(url = %url, model = %self.model, "sending completion request");

        let resp = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ResponderError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                detail
            )));
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| ResponderError::InvalidResponse(e.to_string()))?;
        parse_completion(&value)
    }
}

/// Pull the first choice's message content out of a completion response.
pub fn parse_completion(value: &Value) -> Result<String, ResponderError> {
    let content = value
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| ResponderError::InvalidResponse("missing choices[0].message.content".into()))?
        .trim();

    if content.is_empty() {
        return Err(ResponderError::InvalidResponse("empty completion".into()));
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LlmConfig {
        LlmConfig {
            enabled: true,
            base_url: "http://localhost:9999/v1/".to_string(),
            model: "test-model".to_string(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let err = LlmResponder::new(&config(), "  ").unwrap_err();
        assert!(matches!(err, ResponderError::MissingApiKey(ref v) if v == "DAYBOOK_LLM_API_KEY"));
    }

    #[test]
    fn test_from_env_missing_variable() {
        let cfg = LlmConfig {
            api_key_env: "DAYBOOK_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..config()
        };
        let err = LlmResponder::from_env(&cfg).unwrap_err();
        assert!(matches!(err, ResponderError::MissingApiKey(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let r = LlmResponder::new(&config(), "sk-test").unwrap();
        assert_eq!(r.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let r = LlmResponder::new(&config(), "sk-test").unwrap();
        let body = r.build_request_body("how do I stay focused?");
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "how do I stay focused?");
    }

    #[test]
    fn test_parse_completion_ok() {
        let v = json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Take breaks.  " } }]
        });
        assert_eq!(parse_completion(&v).unwrap(), "Take breaks.");
    }

    #[test]
    fn test_parse_completion_missing_choices() {
        let err = parse_completion(&json!({ "error": "nope" })).unwrap_err();
        assert!(matches!(err, ResponderError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_completion_empty_content() {
        let v = json!({ "choices": [{ "message": { "content": "" } }] });
        assert!(parse_completion(&v).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_failure() {
        let cfg = LlmConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..config()
        };
        let r = LlmResponder::new(&cfg, "sk-test").unwrap();
        let err = r.reply("hi").await.unwrap_err();
        assert!(matches!(err, ResponderError::RequestFailed(_)));
    }
}
