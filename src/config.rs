// src/config.rs
use std::{env, time::Duration};

use tracing::Level;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const API_URL_VAR: &str = "OPENAI_API_URL";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const BIND_ADDR_VAR: &str = "GUIDE_BIND_ADDR";
const SESSION_TTL_VAR: &str = "GUIDE_SESSION_TTL_SECS";
const LOG_LEVEL_VAR: &str = "GUIDE_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub session_ttl: Duration,
    pub log_level: Level,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            session_ttl: Duration::from_secs(3600),
            log_level: Level::INFO,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr;
        }

        if let Some(raw) = lookup(SESSION_TTL_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: SESSION_TTL_VAR,
                value: raw.clone(),
            })?;
            config.session_ttl = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(LOG_LEVEL_VAR) {
            config.log_level = raw.trim().parse::<Level>().map_err(|_| ConfigError::InvalidValue {
                var: LOG_LEVEL_VAR,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }
}

/// Settings for the chat-completion endpoint.
#[derive(Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub api_url: String,
}

// Keep the key out of logs.
impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Reads the credential once; a missing or blank key fails here rather than per call.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingCredential { var: API_KEY_VAR })?;

        let config = Self::new(api_key);
        Ok(match lookup(API_URL_VAR) {
            Some(url) if !url.trim().is_empty() => config.with_api_url(url),
            _ => config,
        })
    }
}
