//! The verification client: one claim in, one verdict out.
//!
//! Every call follows the same pipeline:
//!
//!   Request → [GenerativeService::generate, retried] → Parse → Result
//!
//! `verify()` never fails. Any terminal service failure is converted into a
//! `VerificationResult` with verdict `"Error"` and a user-facing message.
//! `try_verify()` exposes the same pipeline with the tagged `ServiceError`
//! for callers that need to tell failures apart.

use tracing::{info, info_span, warn, Instrument};

use veraz_contracts::{
    error::ServiceError,
    request::{VerificationId, VerificationRequest},
    result::VerificationResult,
};

use crate::{
    parser::parse_response,
    prompt::build_request,
    retry::RetryPolicy,
    traits::{GenerativeService, Sleeper, TokioSleeper},
};

/// Sends claims to a generative service and normalizes its answers.
///
/// The client holds no mutable state: every call is independent, re-sends
/// the full request and is safe to run concurrently with others. Attempts
/// within one call are strictly sequential.
pub struct VerificationClient {
    service: Box<dyn GenerativeService>,
    sleeper: Box<dyn Sleeper>,
    policy: RetryPolicy,
}

impl VerificationClient {
    /// Create a client that sleeps on the tokio timer between attempts.
    pub fn new(service: Box<dyn GenerativeService>, policy: RetryPolicy) -> Self {
        Self {
            service,
            sleeper: Box::new(TokioSleeper),
            policy,
        }
    }

    /// Replace the sleeper used between attempts.
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Verify a claim and/or image.
    ///
    /// Performs up to `policy.max_attempts` sequential service calls and
    /// returns the first successful answer, parsed. Exhausted retries yield
    /// the error result for the last failure.
    pub async fn verify(&self, request: &VerificationRequest) -> VerificationResult {
        match self.try_verify(request).await {
            Ok(result) => result,
            Err(error) => {
                warn!(error = %error, "verification failed, returning error result");
                VerificationResult::from_error(&error)
            }
        }
    }

    /// Same pipeline as `verify()`, but terminal failures are returned as
    /// the classified `ServiceError` instead of an error-shaped result.
    pub async fn try_verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, ServiceError> {
        let verification_id = VerificationId::new();
        let span = info_span!("verify", verification_id = %verification_id);

        async {
            let generate_request = build_request(request);
            let generate_request = &generate_request;
            let service = self.service.as_ref();

            let response = self
                .policy
                .run(self.sleeper.as_ref(), move |_attempt| {
                    service.generate(generate_request)
                })
                .await?;

            let result = parse_response(&response);
            info!(
                verdict = %result.verdict,
                source_count = result.sources.len(),
                "verification complete"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
