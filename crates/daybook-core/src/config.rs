use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{DaybookError, Result};

/// Top-level configuration for the Daybook assistant.
///
/// Loaded from `~/.daybook/config.toml` by default. Every section is optional
/// and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaybookConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl DaybookConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DaybookConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        let (config, error) = Self::load_with_fallback(path);
        if let Some(e) = error {
            warn!(
                "Failed to load config from {}: {}. Using defaults.",
                path.display(),
                e
            );
        }
        config
    }

    /// Like [`load_or_default`](Self::load_or_default), but hands the load
    /// error back instead of logging it, for callers that set up logging
    /// from the loaded configuration.
    pub fn load_with_fallback(path: &Path) -> (Self, Option<DaybookError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| DaybookError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// HTTP port for `daybook serve`.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 3040,
        }
    }
}

/// A configured canned reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEntry {
    /// Trigger phrase; normalized (trimmed, lowercased) when the table is built.
    pub phrase: String,
    /// Literal reply returned when the phrase matches.
    pub reply: String,
}

/// Command router settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum edit distance accepted by the canned-reply matcher.
    pub fuzzy_threshold: usize,
    /// Inputs shorter than this (in characters) must match a trigger exactly.
    pub min_fuzzy_length: usize,
    /// Cap the threshold at half the input length.
    pub scale_threshold_with_length: bool,
    /// Upper bound on any single extraction or reply call.
    pub external_timeout_secs: u64,
    /// Symbol prefixed to amounts in expense confirmations.
    pub currency_symbol: String,
    /// Extra canned replies, appended to the built-in table.
    pub triggers: Vec<TriggerEntry>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 2,
            min_fuzzy_length: 3,
            scale_threshold_with_length: true,
            external_timeout_secs: 30,
            currency_symbol: "$".to_string(),
            triggers: Vec::new(),
        }
    }
}

/// Conversational fallback backed by an OpenAI-compatible endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// When false the offline responder answers open-ended messages.
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub max_tokens: u32,
    pub system_prompt: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "DAYBOOK_LLM_API_KEY".to_string(),
            max_tokens: 512,
            system_prompt: "You are Daybook, a friendly personal productivity assistant. \
                Keep answers short and practical."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = DaybookConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.port, 3040);
        assert_eq!(config.chat.fuzzy_threshold, 2);
        assert_eq!(config.chat.min_fuzzy_length, 3);
        assert!(config.chat.scale_threshold_with_length);
        assert_eq!(config.chat.external_timeout_secs, 30);
        assert_eq!(config.chat.currency_symbol, "$");
        assert!(config.chat.triggers.is_empty());
        assert!(!config.llm.enabled);
        assert_eq!(config.llm.api_key_env, "DAYBOOK_LLM_API_KEY");
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"
port = 8080

[chat]
fuzzy_threshold = 1
min_fuzzy_length = 0
scale_threshold_with_length = false
currency_symbol = "€"

[[chat.triggers]]
phrase = "Good Evening"
reply = "Good evening to you too!"

[llm]
enabled = true
model = "local-model"
base_url = "http://localhost:11434/v1"
"#;
        let file = create_temp_config(content);
        let config = DaybookConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.port, 8080);
        assert_eq!(config.chat.fuzzy_threshold, 1);
        assert_eq!(config.chat.min_fuzzy_length, 0);
        assert!(!config.chat.scale_threshold_with_length);
        assert_eq!(config.chat.currency_symbol, "€");
        assert_eq!(config.chat.triggers.len(), 1);
        assert_eq!(config.chat.triggers[0].phrase, "Good Evening");
        assert!(config.llm.enabled);
        assert_eq!(config.llm.model, "local-model");
        assert_eq!(config.llm.max_tokens, 512);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[general]
log_level = "warn"
"#;
        let file = create_temp_config(content);
        let config = DaybookConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.port, 3040);
        assert_eq!(config.chat.fuzzy_threshold, 2);
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let file = create_temp_config("[chat\nfuzzy_threshold = ");
        let err = DaybookConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, DaybookError::Config(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = DaybookConfig::load_or_default(Path::new("/nonexistent/daybook.toml"));
        assert_eq!(config.general.port, 3040);
    }

    #[test]
    fn test_load_with_fallback_keeps_parse_error() {
        let file = create_temp_config("[general]\nport = \"not a number\"\n");
        let (config, error) = DaybookConfig::load_with_fallback(file.path());
        assert_eq!(config.general.port, 3040);
        assert!(matches!(error, Some(DaybookError::Config(_))));
    }

    #[test]
    fn test_load_with_fallback_missing_file_is_io_error() {
        let (config, error) =
            DaybookConfig::load_with_fallback(Path::new("/nonexistent/daybook.toml"));
        assert_eq!(config.general.log_level, "info");
        match error {
            Some(DaybookError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_with_fallback_valid_file_has_no_error() {
        let file = create_temp_config("[general]\nport = 9000\n");
        let (config, error) = DaybookConfig::load_with_fallback(file.path());
        assert_eq!(config.general.port, 9000);
        assert!(error.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = DaybookConfig::default();
        config.chat.triggers.push(TriggerEntry {
            phrase: "yo".to_string(),
            reply: "Yo!".to_string(),
        });
        config.save(&path).unwrap();

        let reloaded = DaybookConfig::load(&path).unwrap();
        assert_eq!(reloaded.general.port, config.general.port);
        assert_eq!(reloaded.chat.triggers, config.chat.triggers);
        assert_eq!(reloaded.llm.model, config.llm.model);
    }
}
