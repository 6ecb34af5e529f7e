//! # veraz-gemini
//!
//! Gemini transport for the veraz verification client.
//!
//! This crate provides [`GeminiService`], which implements the
//! [`GenerativeService`](veraz_core::traits::GenerativeService) trait by
//! calling the `generateContent` REST endpoint with Google Search grounding
//! enabled, and [`build_client`], the factory hosting applications use to
//! get a ready-to-use [`VerificationClient`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use veraz_core::ClientConfig;
//!
//! let config = ClientConfig::from_env()?;           // fails without API_KEY
//! let client = veraz_gemini::build_client(&config)?;
//! let result = client.verify(&request).await;
//! ```

pub mod service;
pub mod wire;

pub use service::GeminiService;

use veraz_contracts::error::VerazResult;
use veraz_core::{ClientConfig, VerificationClient};

/// Build a verification client backed by Gemini, with the retry policy from
/// `config`.
///
/// Returns `VerazError::ConfigError` when `config` is not usable.
pub fn build_client(config: &ClientConfig) -> VerazResult<VerificationClient> {
    let service = GeminiService::new(config)?;
    Ok(VerificationClient::new(
        Box::new(service),
        config.retry.to_policy(),
    ))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use veraz_core::{config::ApiKey, ClientConfig};

    use super::build_client;

    #[test]
    fn build_client_carries_configured_retry_policy() {
        let mut config = ClientConfig {
            api_key: ApiKey::new("k"),
            ..ClientConfig::default()
        };
        config.retry.max_attempts = 4;
        config.retry.initial_delay_ms = 50;

        let client = build_client(&config).unwrap();

        assert_eq!(client.policy().max_attempts, 4);
        assert_eq!(client.policy().initial_delay, Duration::from_millis(50));
    }

    #[test]
    fn build_client_fails_fast_without_credential() {
        assert!(build_client(&ClientConfig::default()).is_err());
    }
}
