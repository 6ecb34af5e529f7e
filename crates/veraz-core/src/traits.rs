//! Seams between the verification client and the outside world.
//!
//! - `GenerativeService`: the hosted model (untrusted, remote, fallible)
//! - `Sleeper`: the only suspension point of the retry loop
//!
//! Both are injected into `VerificationClient`, so retry behaviour can be
//! exercised against a flaky stub with a recording sleeper.

use std::time::Duration;

use async_trait::async_trait;

use veraz_contracts::{
    error::ServiceError,
    generation::{GenerateRequest, GenerateResponse},
};

/// A hosted generative model that can answer a multimodal request.
///
/// One call to `generate()` is exactly one network request. Implementations
/// must classify failures into a `ServiceError` at the point they occur;
/// the client never inspects transport details.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Send `request` and return the model's answer.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError>;
}

/// Suspends the current task between retry attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
