//! Client configuration.
//!
//! A `ClientConfig` is built once at startup and handed explicitly to the
//! transport and the client. It can come from the environment alone or from
//! a TOML file:
//!
//! ```toml
//! model = "gemini-2.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//!
//! [retry]
//! max_attempts = 3
//! initial_delay_ms = 1000
//! backoff_factor = 2.0
//! jitter_ratio = 0.2
//! max_delay_ms = 30000
//! ```
//!
//! The credential is read from `API_KEY`, which overrides any `api_key` in
//! the file. A missing credential is a configuration error: the client
//! refuses to start without one.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use veraz_contracts::error::{VerazError, VerazResult};

use crate::retry::RetryPolicy;

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound accepted for `retry.max_attempts`.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// The service credential. Never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for placing in request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Everything needed to reach the generative service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: ApiKey,
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the service API, without a trailing `/models/...`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            model: default_model(),
            endpoint: default_endpoint(),
            retry: RetrySettings::default(),
        }
    }
}

/// Retry parameters as written in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_factor: f64,
    pub jitter_ratio: f64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            initial_delay_ms: policy.initial_delay.as_millis() as u64,
            backoff_factor: policy.backoff_factor,
            jitter_ratio: policy.jitter_ratio,
            max_delay_ms: policy.max_delay.as_millis() as u64,
        }
    }
}

impl RetrySettings {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            backoff_factor: self.backoff_factor,
            jitter_ratio: self.jitter_ratio,
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

impl ClientConfig {
    /// Default settings with the credential taken from `API_KEY`.
    ///
    /// Returns `VerazError::ConfigError` if the variable is unset or blank.
    pub fn from_env() -> VerazResult<Self> {
        Self::default().resolve(std::env::var(API_KEY_ENV).ok())
    }

    /// Parse `s` as TOML, then apply `API_KEY` from the environment.
    ///
    /// Returns `VerazError::ConfigError` if the TOML is malformed, the
    /// retry settings are out of range, or no credential is available.
    pub fn from_toml_str(s: &str) -> VerazResult<Self> {
        Self::parse_toml(s)?.resolve(std::env::var(API_KEY_ENV).ok())
    }

    /// Read the file at `path` and parse it as with `from_toml_str`.
    pub fn from_file(path: &Path) -> VerazResult<Self> {
        Self::load_file(path)?.resolve(std::env::var(API_KEY_ENV).ok())
    }

    fn load_file(path: &Path) -> VerazResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VerazError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::parse_toml(&contents)
    }

    fn parse_toml(s: &str) -> VerazResult<Self> {
        toml::from_str(s).map_err(|e| VerazError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    /// Apply an environment credential (if any) and validate.
    fn resolve(mut self, env_api_key: Option<String>) -> VerazResult<Self> {
        if let Some(key) = env_api_key.filter(|k| !k.trim().is_empty()) {
            debug!(source = API_KEY_ENV, "using API key from environment");
            self.api_key = ApiKey::new(key);
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the configuration can be used to build a client.
    pub fn validate(&self) -> VerazResult<()> {
        let fail = |reason: String| Err(VerazError::ConfigError { reason });

        if self.api_key.is_blank() {
            return fail(format!("{API_KEY_ENV} environment variable not set"));
        }
        if self.model.trim().is_empty() {
            return fail("model must not be empty".to_string());
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return fail(format!("endpoint '{}' is not an http(s) URL", self.endpoint));
        }
        let retry = &self.retry;
        if retry.max_attempts == 0 || retry.max_attempts > MAX_ATTEMPTS_LIMIT {
            return fail(format!(
                "retry.max_attempts must be between 1 and {MAX_ATTEMPTS_LIMIT}, got {}",
                retry.max_attempts
            ));
        }
        if !retry.backoff_factor.is_finite() || retry.backoff_factor < 1.0 {
            return fail(format!(
                "retry.backoff_factor must be a finite number >= 1.0, got {}",
                retry.backoff_factor
            ));
        }
        if !retry.jitter_ratio.is_finite() || retry.jitter_ratio < 0.0 {
            return fail(format!(
                "retry.jitter_ratio must be a finite number >= 0.0, got {}",
                retry.jitter_ratio
            ));
        }
        if retry.max_delay_ms < retry.initial_delay_ms {
            return fail(format!(
                "retry.max_delay_ms ({}) must not be below retry.initial_delay_ms ({})",
                retry.max_delay_ms, retry.initial_delay_ms
            ));
        }
        Ok(())
    }
}
