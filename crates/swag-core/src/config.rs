use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.swag.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwagConfig {
    /// Swagger document to read.
    pub input: String,
    /// Extraction rules document, for `swag extract`.
    pub rules: Option<String>,
    /// File to write; standard output when unset.
    pub output: Option<String>,
    pub client: ClientConfig,
}

impl Default for SwagConfig {
    fn default() -> Self {
        Self {
            input: "swagger.json".to_string(),
            rules: None,
            output: None,
            client: ClientConfig::default(),
        }
    }
}

/// Go client generation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Package clause of the generated file.
    pub package: String,
    /// Base URL used by the constructor when the caller passes none. Derived
    /// from the document's `host` and `basePath` when unset.
    pub base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            package: "client".to_string(),
            base_url: None,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swag.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwagConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: SwagConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swag configuration
input: swagger.json
# rules: extractions.json   # used by `swag extract`
# output: client.go         # defaults to standard output

client:
  package: client
  # base_url: https://api.example.com/v1
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwagConfig::default();
        assert_eq!(config.input, "swagger.json");
        assert!(config.rules.is_none());
        assert!(config.output.is_none());
        assert_eq!(config.client.package, "client");
        assert!(config.client.base_url.is_none());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: api.json
rules: rules.json
output: out/client.go
client:
  package: planetscale
  base_url: https://api.example.com/v1/
"#;
        let config: SwagConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api.json");
        assert_eq!(config.rules.as_deref(), Some("rules.json"));
        assert_eq!(config.output.as_deref(), Some("out/client.go"));
        assert_eq!(config.client.package, "planetscale");
        assert_eq!(
            config.client.base_url.as_deref(),
            Some("https://api.example.com/v1/")
        );
    }

    #[test]
    fn test_default_content_parses() {
        let config: SwagConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.input, "swagger.json");
        assert_eq!(config.client.package, "client");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: SwagConfig = serde_yaml_ng::from_str("input: api.json\n").unwrap();
        assert_eq!(config.input, "api.json");
        assert_eq!(config.client.package, "client");
    }
}
