//! Runtime settings, read once from `WIKI_*` environment variables.

use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;
use tracing::warn;

use crate::error::{FetchError, Result};

/// The only language the cleaning rules and sentence tokenizer understand.
pub const LANGUAGE: &str = "en";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wikipedia language edition (default: "en").
    pub language: String,
    /// Explicit API endpoint; derived from `language` when unset.
    pub api_url: Option<String>,
    pub user_agent: String,
    /// Request timeout in seconds (default: none).
    pub timeout_secs: Option<u64>,
    /// Resolve titles through search before loading the page (default: true).
    pub auto_suggest: bool,
    /// Directory the corpus file is written to (default: current directory).
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: LANGUAGE.to_string(),
            api_url: None,
            user_agent: format!("wiki_corpus/{} (corpus builder)", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
            auto_suggest: true,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load settings from the environment, falling back to defaults.
    pub fn load() -> Self {
        Config::builder()
            .add_source(Environment::with_prefix("WIKI"))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .unwrap_or_else(|e| {
                warn!("Ignoring WIKI_* environment: {}", e);
                Settings::default()
            })
    }

    pub fn api_url(&self) -> String {
        match &self.api_url {
            Some(url) => url.clone(),
            None => format!("https://{}.wikipedia.org/w/api.php", self.language),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.language != LANGUAGE {
            return Err(FetchError::Config(format!(
                "unsupported language '{}', only '{}' is available",
                self.language, LANGUAGE
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(FetchError::Config("user_agent must not be empty".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(FetchError::Config("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}
