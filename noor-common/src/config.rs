//! Configuration loading and config file resolution
//!
//! Config file resolution priority:
//! 1. Explicit path passed by the embedding application (highest priority)
//! 2. `NOOR_CONFIG` environment variable
//! 3. `<config dir>/noor/config.toml`
//!
//! A missing config file is not an error: a warning is logged and compiled
//! defaults are used. The only value that may come from the environment after
//! the file is read is the LLM credential (`NOOR_LLM_API_KEY`).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "NOOR_CONFIG";

/// Environment variable carrying the LLM credential
pub const LLM_API_KEY_ENV_VAR: &str = "NOOR_LLM_API_KEY";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoorConfig {
    pub quran: QuranConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

/// Remote Quran content service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuranConfig {
    /// Base URL of the content service (no trailing slash)
    pub api_base_url: String,
    /// Edition used for canonical verse text
    pub text_edition: String,
    /// Edition used for per-verse commentary
    pub commentary_edition: String,
    /// Language passed to full-text search
    pub search_language: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for QuranConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.alquran.cloud/v1".to_string(),
            text_edition: "quran-uthmani".to_string(),
            commentary_edition: "ar.muyassar".to_string(),
            search_language: "ar".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// LLM text-completion settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub endpoint: String,
    /// Model name interpolated into the request path
    pub model: String,
    /// Credential; `None` disables the explanation feature
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
        }
    }
}

impl LlmConfig {
    /// Credential, if present and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| is_valid_key(key))
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .finish()
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl NoorConfig {
    /// Load configuration following the resolution priority
    ///
    /// Missing files fall back to defaults; malformed files are an error.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match resolve_config_path(explicit_path) {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            Some(path) => {
                warn!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => {
                warn!("Could not determine config directory, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a specific TOML file without environment overrides
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NoorConfig = toml::from_str(&content)?;
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Apply `NOOR_LLM_API_KEY` if set to a non-blank value
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(LLM_API_KEY_ENV_VAR) {
            if is_valid_key(&key) {
                debug!("LLM credential loaded from environment variable");
                self.llm.api_key = Some(key);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.quran.api_base_url.trim().is_empty() {
            return Err(Error::Config("quran.api_base_url must not be empty".to_string()));
        }
        if self.quran.request_timeout_secs == 0 {
            return Err(Error::Config(
                "quran.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the config file path; `None` when no config directory is known
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("noor").join("config.toml"))
}

/// Validate credential (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NoorConfig::default();
        assert_eq!(config.quran.api_base_url, "https://api.alquran.cloud/v1");
        assert_eq!(config.quran.text_edition, "quran-uthmani");
        assert_eq!(config.quran.commentary_edition, "ar.muyassar");
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!(config.llm.api_key().is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: NoorConfig = toml::from_str(
            r#"
            [llm]
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.api_key(), Some("abc"));
        assert_eq!(config.quran.search_language, "ar");
    }

    #[test]
    fn test_blank_key_is_absent() {
        let llm = LlmConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(llm.api_key().is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let llm = LlmConfig {
            api_key: Some("secret-value".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", llm);
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
