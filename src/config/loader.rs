use std::path::Path;

use super::{AppConfig, ConfigError};

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_config() {
        let result = load_config("/nonexistent/config.yaml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let temp_file = temp_dir.path().join("invalid_config.yaml");
        std::fs::write(&temp_file, "invalid: yaml: content: [").unwrap();

        let result = load_config(&temp_file);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let temp_file = temp_dir.path().join("valid_config.yaml");

        let config_content = r#"
server:
  port: 9000
  host: "127.0.0.1"
  frontend_dir: "www"

tts:
  base_url: "http://localhost:9100"
  api_version: "2025-04-16"
  default_model: "sonic-2"
  timeout_seconds: 30

chat:
  base_url: "http://localhost:9200"
  model: "gpt-4o-mini"
  timeout_seconds: 90

assistant:
  persona: "You are a test assistant."
  orders:
    - id: "T-1"
      item: "Test Item"
      status: "Shipped"
      carrier: "UPS"
"#;
        std::fs::write(&temp_file, config_content).unwrap();

        let config = load_config(&temp_file).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.frontend_dir, "www");
        assert_eq!(config.tts.base_url, "http://localhost:9100");
        assert_eq!(config.tts.default_model, "sonic-2");
        assert_eq!(config.chat.base_url, "http://localhost:9200");
        assert_eq!(config.assistant.orders.len(), 1);
        assert_eq!(config.assistant.orders[0].id, "T-1");
        assert!(config.assistant.orders[0].eta.is_none());
    }

    #[test]
    fn test_load_config_minimal() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let temp_file = temp_dir.path().join("minimal_config.yaml");

        // Every section is optional; absent sections take compiled-in defaults
        std::fs::write(&temp_file, "server:\n  port: 8088\n").unwrap();

        let config = load_config(&temp_file).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.tts.base_url, "https://api.cartesia.ai");
        assert_eq!(config.chat.model, "gpt-4o-mini");
        assert_eq!(config.assistant.orders.len(), 2);
        assert!(config.tts.api_key.is_none());
        assert!(config.chat.api_key.is_none());
    }

    #[test]
    fn test_config_from_file() {
        let result = AppConfig::from_file("/nonexistent/path.yaml");
        assert!(result.is_err());
    }
}
