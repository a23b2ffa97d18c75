//! Configuration file schema

use serde::{Deserialize, Serialize};

/// Top-level configuration file structure
///
/// ```toml
/// [backend]
/// base_url = "http://localhost:11434"
/// model = "qwen3-coder:30b"
///
/// [repl]
/// history = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub repl: ReplConfig,
}

/// Chat backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default model tag; CLI `-m` overrides it
    #[serde(default)]
    pub model: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: None,
        }
    }
}

fn default_base_url() -> String {
    crate::ollama::gateway::DEFAULT_BASE_URL.to_string()
}

/// REPL behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Persist input history under the platform data dir
    #[serde(default = "default_true")]
    pub history: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self { history: true }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:11434");
        assert!(config.backend.model.is_none());
        assert!(config.repl.history);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str("[backend]\nmodel = \"llama3.2:latest\"\n").unwrap();
        assert_eq!(config.backend.model.as_deref(), Some("llama3.2:latest"));
        assert_eq!(config.backend.base_url, "http://localhost:11434");
        assert!(config.repl.history);
    }
}
