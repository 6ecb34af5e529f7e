//! `GenerativeService` implementation over the Gemini REST API.
//!
//! One `generate()` call is one `POST {endpoint}/models/{model}:generateContent`.
//! Failures are classified here, where the status code and error body are
//! still available; the client above only sees `ServiceError`.

use async_trait::async_trait;
use tracing::{debug, warn};

use veraz_contracts::{
    error::{ServiceError, VerazError, VerazResult},
    generation::{GenerateRequest, GenerateResponse},
};
use veraz_core::{config::ApiKey, traits::GenerativeService, ClientConfig};

use crate::wire::{classify_http_error, raw_excerpt, WireRequest, WireResponse};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP transport for the Gemini `generateContent` endpoint.
///
/// No per-request timeout is set; the only bound on a verification is the
/// client's attempt budget.
#[derive(Debug)]
pub struct GeminiService {
    http: reqwest::Client,
    url: String,
    api_key: ApiKey,
}

impl GeminiService {
    /// Build a transport from validated configuration.
    ///
    /// Returns `VerazError::ConfigError` if the configuration is invalid
    /// (most importantly, if no API key is set) or the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> VerazResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| VerazError::ConfigError {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Self::with_http_client(config, http)
    }

    /// Build a transport around an existing `reqwest::Client`.
    pub fn with_http_client(config: &ClientConfig, http: reqwest::Client) -> VerazResult<Self> {
        config.validate()?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            http,
            url,
            api_key: config.api_key.clone(),
        })
    }

    /// The full `generateContent` URL this transport posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerativeService for GeminiService {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError> {
        let body = WireRequest::from(request);

        debug!(url = %self.url, part_count = request.parts.len(), "sending generateContent request");

        let response = self
            .http
            .post(&self.url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::from_message(format!("network error: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::from_message(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let error = classify_http_error(status.as_u16(), &text);
            warn!(status = status.as_u16(), error = %error, "generateContent returned an error");
            return Err(error);
        }

        let wire: WireResponse = serde_json::from_str(&text).map_err(|e| {
            ServiceError::from_message(format!("malformed response: {e}: {}", raw_excerpt(&text)))
        })?;

        wire.into_generate_response()
    }
}
