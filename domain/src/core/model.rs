//! Model value object representing an LLM model tag

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An Ollama model tag (Value Object)
///
/// Model names are open-ended (`qwen3-coder:30b`, `llama3.2:latest`, ...),
/// so this wraps the raw tag instead of enumerating known models. The
/// active model lives in the session configuration and changes only through
/// an explicit session mutation, never a process-wide global.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

/// Fallback model when neither config nor CLI names one
pub const DEFAULT_MODEL: &str = "qwen3-coder:30b";

impl Model {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the string tag for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new(DEFAULT_MODEL)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::new(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let model: Model = "qwen3-coder:30b".parse().unwrap();
        assert_eq!(model.to_string(), "qwen3-coder:30b");
        assert_eq!(model, Model::new("qwen3-coder:30b"));
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default().as_str(), DEFAULT_MODEL);
    }

    #[test]
    fn test_model_serde_as_string() {
        let model = Model::new("llama3.2:latest");
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, "\"llama3.2:latest\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
