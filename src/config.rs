use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const PROMPT_SOURCES: &[&str] = &["gemini", "passages"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_score_api_url")]
    pub score_api_url: String,
    #[serde(default = "default_prompt_source")]
    pub prompt_source: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_score_api_url() -> String {
    "http://localhost:8080/api".to_string()
}
fn default_prompt_source() -> String {
    "gemini".to_string()
}
fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            score_api_url: default_score_api_url(),
            prompt_source: default_prompt_source(),
            gemini_base_url: default_gemini_base_url(),
            gemini_model: default_gemini_model(),
            theme: default_theme(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyrush")
            .join("config.toml")
    }

    /// Clamp out-of-range values and reset unknown keys left by hand edits.
    pub fn validate(&mut self) {
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 120);
        if !PROMPT_SOURCES.contains(&self.prompt_source.as_str()) {
            self.prompt_source = default_prompt_source();
        }
        if self.score_api_url.trim().is_empty() {
            self.score_api_url = default_score_api_url();
        }
    }

    /// The Gemini key lives in the environment only.
    pub fn gemini_api_key() -> Option<String> {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.score_api_url, "http://localhost:8080/api");
        assert_eq!(config.prompt_source, "gemini");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
score_api_url = "https://scores.example.com/api"
prompt_source = "passages"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.score_api_url, "https://scores.example.com/api");
        assert_eq!(config.prompt_source, "passages");
        assert_eq!(config.theme, "terminal-default");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.score_api_url, deserialized.score_api_url);
        assert_eq!(config.gemini_base_url, deserialized.gemini_base_url);
    }

    #[test]
    fn test_validate_clamps_and_resets() {
        let mut config = Config::default();
        config.request_timeout_secs = 0;
        config.prompt_source = "markov".to_string();
        config.score_api_url = "   ".to_string();
        config.validate();
        assert_eq!(config.request_timeout_secs, 1);
        assert_eq!(config.prompt_source, "gemini");
        assert_eq!(config.score_api_url, "http://localhost:8080/api");

        config.request_timeout_secs = 5000;
        config.validate();
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.prompt_source, "gemini");
    }

    #[test]
    fn test_save_to_then_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.prompt_source = "passages".to_string();
        config.request_timeout_secs = 30;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.prompt_source, "passages");
        assert_eq!(loaded.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_from_validates_hand_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "prompt_source = \"markov\"\nrequest_timeout_secs = 0\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.prompt_source, "gemini");
        assert_eq!(config.request_timeout_secs, 1);
    }

    #[test]
    fn test_load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "score_api_url = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
