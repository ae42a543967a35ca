mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::load_config;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Relay server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// Directory of static frontend assets served at the root path
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

fn default_port() -> u16 {
    10000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_frontend_dir() -> String {
    "frontend".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

/// Speech synthesis upstream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TtsConfig {
    /// Provider base URL (e.g. "https://api.cartesia.ai")
    #[serde(default = "default_tts_url")]
    pub base_url: String,
    /// Value for the provider's versioning header
    #[serde(default = "default_tts_api_version")]
    pub api_version: String,
    /// Bearer credential; normally injected from the environment
    #[serde(default)]
    pub api_key: Option<String>,
    /// Synthesis model used when the request doesn't name one
    #[serde(default = "default_tts_model")]
    pub default_model: String,
    /// Request timeout in seconds
    #[serde(default = "default_tts_timeout")]
    pub timeout_seconds: u64,
}

fn default_tts_url() -> String {
    "https://api.cartesia.ai".to_string()
}

fn default_tts_api_version() -> String {
    "2025-04-16".to_string()
}

fn default_tts_model() -> String {
    "sonic-multilingual-v1".to_string()
}

fn default_tts_timeout() -> u64 {
    60
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_tts_url(),
            api_version: default_tts_api_version(),
            api_key: None,
            default_model: default_tts_model(),
            timeout_seconds: default_tts_timeout(),
        }
    }
}

impl TtsConfig {
    /// Returns the base URL with trailing slash stripped
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Voice catalog endpoint
    pub fn voices_url(&self) -> String {
        format!("{}/voices", self.base_url())
    }

    /// Raw audio synthesis endpoint
    pub fn synthesis_url(&self) -> String {
        format!("{}/tts/bytes", self.base_url())
    }
}

/// Chat completion upstream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Provider base URL (e.g. "https://api.openai.com")
    #[serde(default = "default_chat_url")]
    pub base_url: String,
    /// Bearer credential; normally injected from the environment
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier sent on every completion request
    #[serde(default = "default_chat_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_chat_timeout")]
    pub timeout_seconds: u64,
}

fn default_chat_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_chat_timeout() -> u64 {
    120
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_chat_url(),
            api_key: None,
            model: default_chat_model(),
            timeout_seconds: default_chat_timeout(),
        }
    }
}

impl ChatConfig {
    /// Returns the base URL with trailing slash stripped
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url())
    }
}

/// Assistant persona and demo data prepended to every chat request.
///
/// This is configuration, not logic: overriding it changes what the assistant
/// knows, never the request/response contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Instructional persona prompt for the system turn
    #[serde(default = "default_persona")]
    pub persona: String,
    /// Mock order records embedded in the system turn
    #[serde(default = "default_orders")]
    pub orders: Vec<OrderRecord>,
}

/// One record of the mock order dataset
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderRecord {
    pub id: String,
    pub item: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    pub carrier: String,
}

fn default_persona() -> String {
    "You are an AI assistant for an online clothing store.\n\
     You help customers check order status, update addresses, and provide friendly, human-like service.\n\
     Be polite and conversational.\n\
     Use warm language like \"Absolutely!\" or \"You got it!\" when appropriate."
        .to_string()
}

fn default_orders() -> Vec<OrderRecord> {
    vec![
        OrderRecord {
            id: "ARTZ-4593".to_string(),
            item: "The Super Puff Shorty (Size M, Black)".to_string(),
            status: "Packed and getting ready to ship".to_string(),
            eta: Some("Thursday, October 24".to_string()),
            carrier: "Canada Post".to_string(),
        },
        OrderRecord {
            id: "ARTZ-3621".to_string(),
            item: "Cozy Fleece Hoodie (Size L, Beige)".to_string(),
            status: "Delivered on October 20".to_string(),
            eta: None,
            carrier: "FedEx".to_string(),
        },
    ]
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
            orders: default_orders(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load configuration with fallback to default locations, or compiled-in
    /// defaults when no file exists anywhere
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_paths = ["config.yaml", "config.yml", "./config/config.yaml"];
                for p in default_paths {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                Ok(Self::default())
            }
        }
    }

    /// Pull credentials and listen port from the process environment.
    /// Environment values win over file values.
    pub fn apply_env_overrides(&mut self) {
        let tts_key = std::env::var("CARTESIA_API_KEY").ok();
        let chat_key = std::env::var("OPENAI_API_KEY").ok();
        let port = std::env::var("PORT").ok();
        self.apply_overrides(tts_key, chat_key, port);
    }

    fn apply_overrides(
        &mut self,
        tts_key: Option<String>,
        chat_key: Option<String>,
        port: Option<String>,
    ) {
        if let Some(key) = tts_key.filter(|k| !k.is_empty()) {
            self.tts.api_key = Some(key);
        }
        if let Some(key) = chat_key.filter(|k| !k.is_empty()) {
            self.chat.api_key = Some(key);
        }
        if let Some(raw) = port {
            match raw.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!(port = %raw, "Ignoring unparseable PORT value"),
            }
        }
    }

    /// Validate the effective configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(self.tts.base_url())
            .map_err(|e| ConfigError::Validation(format!("invalid tts.base_url: {}", e)))?;
        url::Url::parse(self.chat.base_url())
            .map_err(|e| ConfigError::Validation(format!("invalid chat.base_url: {}", e)))?;
        if self.chat.model.is_empty() {
            return Err(ConfigError::Validation("chat.model must not be empty".to_string()));
        }
        if self.tts.default_model.is_empty() {
            return Err(ConfigError::Validation(
                "tts.default_model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tts_config_urls() {
        let config = TtsConfig::default();
        assert_eq!(config.voices_url(), "https://api.cartesia.ai/voices");
        assert_eq!(config.synthesis_url(), "https://api.cartesia.ai/tts/bytes");
    }

    #[test]
    fn test_tts_config_trailing_slash() {
        let config = TtsConfig {
            base_url: "http://localhost:9100/".to_string(),
            ..TtsConfig::default()
        };
        assert_eq!(config.base_url(), "http://localhost:9100");
        assert_eq!(config.voices_url(), "http://localhost:9100/voices");
    }

    #[test]
    fn test_chat_config_completions_url() {
        let config = ChatConfig::default();
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 10000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.frontend_dir, "frontend");
    }

    #[test]
    fn test_assistant_defaults_contain_demo_orders() {
        let config = AssistantConfig::default();
        assert_eq!(config.orders.len(), 2);
        assert_eq!(config.orders[0].id, "ARTZ-4593");
        assert!(config.orders[1].eta.is_none());
        assert!(config.persona.contains("order status"));
    }

    #[test]
    fn test_order_record_skips_absent_eta() {
        let record = OrderRecord {
            id: "X-1".to_string(),
            item: "Thing".to_string(),
            status: "Shipped".to_string(),
            eta: None,
            carrier: "UPS".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("eta").is_none());
    }

    #[test]
    fn test_apply_overrides_credentials() {
        let mut config = AppConfig::default();
        config.tts.api_key = Some("from-file".to_string());

        config.apply_overrides(
            Some("tts-env-key".to_string()),
            Some("chat-env-key".to_string()),
            Some("8123".to_string()),
        );

        assert_eq!(config.tts.api_key.as_deref(), Some("tts-env-key"));
        assert_eq!(config.chat.api_key.as_deref(), Some("chat-env-key"));
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn test_apply_overrides_empty_values_ignored() {
        let mut config = AppConfig::default();
        config.tts.api_key = Some("from-file".to_string());

        config.apply_overrides(Some(String::new()), None, Some("not-a-port".to_string()));

        assert_eq!(config.tts.api_key.as_deref(), Some("from-file"));
        assert!(config.chat.api_key.is_none());
        assert_eq!(config.server.port, 10000);
    }

    #[test]
    fn test_validate_default() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_upstream_url() {
        let mut config = AppConfig::default();
        config.tts.base_url = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = AppConfig::default();
        config.chat.model = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound("test.yaml".to_string());
        assert!(err.to_string().contains("test.yaml"));

        let err = ConfigError::Validation("invalid URL".to_string());
        assert!(err.to_string().contains("invalid URL"));
    }

    #[test]
    fn test_load_or_default_with_missing_path() {
        let result = AppConfig::load_or_default(Some(Path::new("/nonexistent/config.yaml")));
        assert!(result.is_err());
    }
}
