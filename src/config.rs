//! Environment-driven settings for the OpenRouter provider.

use std::time::Duration;

use crate::mt::error::{MtError, MtResult};
use crate::mt::openrouter::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const MODEL_VAR: &str = "OPENROUTER_MODEL";
pub const API_URL_VAR: &str = "OPENROUTER_API_URL";
pub const TIMEOUT_VAR: &str = "OPENROUTER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `None` when the key is unset or blank
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    ///
    /// A missing API key is not an error here; callers decide whether to
    /// report it. A malformed timeout is.
    pub fn from_env() -> MtResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> MtResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty());
        let api_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.api_url);
        let model = lookup(MODEL_VAR)
            .filter(|model| !model.trim().is_empty())
            .unwrap_or(defaults.model);

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    MtError::ConfigError(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        TIMEOUT_VAR, raw
                    ))
                })?;
                if secs == 0 {
                    return Err(MtError::ConfigError(format!(
                        "{} must be greater than zero",
                        TIMEOUT_VAR
                    )));
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            api_key,
            api_url,
            model,
            timeout,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
