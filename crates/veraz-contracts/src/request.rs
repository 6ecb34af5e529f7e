//! Verification identity and input types.
//!
//! These types describe what the caller hands to the verification client.
//! They are intentionally minimal: the client does not validate them.

use serde::{Deserialize, Serialize};

/// Unique identifier for a single logical verification.
///
/// Every attempt made on behalf of one `verify()` call is logged under the
/// same identifier so retries can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationId(pub uuid::Uuid);

impl VerificationId {
    /// Create a new, unique verification ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for VerificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VerificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An image attached to a claim, already read and validated by the caller.
///
/// `data` holds the raw file bytes; transports are responsible for any
/// encoding the wire format needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// IANA media type, e.g. "image/png".
    pub mime_type: String,
}

impl InlineImage {
    pub fn new(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Everything one verification call needs.
///
/// At least one of `prompt_text` or `image` should carry content for the
/// call to be meaningful. That is the caller's job to enforce; an empty
/// request is still sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// The user's claim, embedded verbatim into the instruction template.
    pub prompt_text: String,
    /// Optional image sent alongside the claim.
    pub image: Option<InlineImage>,
}

impl VerificationRequest {
    /// Build a request for a text-only claim.
    pub fn text(prompt_text: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            image: None,
        }
    }

    /// Attach an image to this request.
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    /// True when neither text nor image carries any content.
    pub fn is_empty(&self) -> bool {
        self.prompt_text.trim().is_empty() && self.image.is_none()
    }
}
