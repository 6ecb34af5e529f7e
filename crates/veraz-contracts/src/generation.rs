//! Transport-neutral model of one call to the generative service.
//!
//! The verification client builds a `GenerateRequest` and receives a
//! `GenerateResponse`; transports translate both to and from their own wire
//! format.

use serde::{Deserialize, Serialize};

/// One piece of multimodal content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentPart {
    /// Raw bytes sent inline with their media type.
    InlineData { mime_type: String, data: Vec<u8> },
    /// Plain text.
    Text(String),
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Content parts in the order the service should see them.
    pub parts: Vec<ContentPart>,
    /// Ask the service to ground its answer with web search.
    pub web_search: bool,
}

/// A successful generation response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The model's answer text.
    pub text: String,
    /// Web citations, when the service grounded its answer.
    pub grounding: Option<GroundingMetadata>,
}

/// Grounding information attached to a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingMetadata {
    /// Citations in the order the service returned them.
    pub chunks: Vec<GroundingChunk>,
}

/// One web citation as reported by the service. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}
