//! Configuration loaded from `roster.toml`.
//!
//! Precedence, highest first: `--api-url`, the `ROSTER_API_URL` environment
//! variable, the config file, built-in defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::RosterError;

/// File read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";
/// Environment variable that overrides `api_url` from the file.
pub const API_URL_ENV: &str = "ROSTER_API_URL";

/// Top-level configuration loaded from `roster.toml`.
///
/// There are no timeout or retry keys: every round trip is
/// attempted once and waits for as long as the server takes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterConfig {
    /// Base URL of the REST server; `/users` is appended to it.
    /// Must start with `http://` or `https://`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

// Default base URL: a local server on port 3000 under `/api`.
fn default_api_url() -> String {
    "http://localhost:3000/api".to_string()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl RosterConfig {
    /// Loads `path` (or `roster.toml` in the working directory) and applies
    /// the environment override.
    pub fn load(path: Option<&Path>) -> Result<Self, RosterError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::load_with_env(path, std::env::var(API_URL_ENV).ok())
    }

    /// A missing file yields defaults; a present but invalid one is an error.
    pub fn load_with_env(path: &Path, env_api_url: Option<String>) -> Result<Self, RosterError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<RosterConfig>(&contents)?
        } else {
            Self::default()
        };

        // Environment takes precedence over the file; an empty value is ignored.
        if let Some(url) = env_api_url
            && !url.is_empty()
        {
            config.api_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Applies the `--api-url` flag.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Result<Self, RosterError> {
        if let Some(url) = api_url {
            self.api_url = url;
            self.validate()?;
        }
        Ok(self)
    }

    // Only the scheme is checked; reqwest reports anything else on first use.
    fn validate(&self) -> Result<(), RosterError> {
        if self.api_url.starts_with("http://") || self.api_url.starts_with("https://") {
            Ok(())
        } else {
            Err(RosterError::Config(format!(
                "api_url must start with http:// or https://, got {:?}",
                self.api_url
            )))
        }
    }
}
