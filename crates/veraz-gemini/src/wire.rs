//! JSON wire format of the Gemini `generateContent` endpoint.
//!
//! Only the fields veraz reads or writes are modelled; everything else in a
//! response is ignored by serde.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use veraz_contracts::{
    error::ServiceError,
    generation::{ContentPart, GenerateRequest, GenerateResponse, GroundingChunk, GroundingMetadata},
};

/// Finish/block reason the service uses for safety filtering.
const SAFETY_REASON: &str = "SAFETY";

// ── Request ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRequest {
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<WireBlob>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireBlob {
    pub mime_type: String,
    /// Standard base64 of the raw bytes.
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTool {
    pub google_search: GoogleSearch,
}

/// Enables grounding with Google Search. Serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct GoogleSearch {}

impl From<&GenerateRequest> for WireRequest {
    fn from(request: &GenerateRequest) -> Self {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::InlineData { mime_type, data } => WirePart {
                    text: None,
                    inline_data: Some(WireBlob {
                        mime_type: mime_type.clone(),
                        data: STANDARD.encode(data),
                    }),
                },
                ContentPart::Text(text) => WirePart {
                    text: Some(text.clone()),
                    inline_data: None,
                },
            })
            .collect();

        let tools = if request.web_search {
            vec![WireTool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        Self {
            contents: vec![WireContent {
                role: Some("user".to_string()),
                parts,
            }],
            tools,
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WireResponse {
    pub candidates: Vec<WireCandidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WireCandidate {
    pub content: Option<WireContent>,
    pub finish_reason: Option<String>,
    pub grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WireGroundingMetadata {
    pub grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct WireGroundingChunk {
    pub web: Option<WireWeb>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct WireWeb {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl WireResponse {
    /// Convert to the transport-neutral response.
    ///
    /// The answer text is the concatenation of the first candidate's text
    /// parts. A response without any text is a failure: blocked prompts and
    /// safety-stopped candidates become `SafetyBlocked`, anything else is
    /// treated as a malformed (transient) response.
    pub fn into_generate_response(self) -> Result<GenerateResponse, ServiceError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match block_reason {
                Some(reason) if reason.contains(SAFETY_REASON) => ServiceError::SafetyBlocked,
                Some(reason) => ServiceError::Transient(format!("request blocked: {reason}")),
                None => ServiceError::Transient("response contained no candidates".to_string()),
            });
        };

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if texts.is_empty() {
            return Err(match candidate.finish_reason.as_deref() {
                Some(SAFETY_REASON) => ServiceError::SafetyBlocked,
                Some(reason) => ServiceError::Transient(format!(
                    "response contained no text (finish reason: {reason})"
                )),
                None => ServiceError::Transient("response contained no text".to_string()),
            });
        }

        let grounding = candidate.grounding_metadata.map(|m| GroundingMetadata {
            chunks: m
                .grounding_chunks
                .into_iter()
                .map(|chunk| {
                    let web = chunk.web.unwrap_or_default();
                    GroundingChunk {
                        uri: web.uri,
                        title: web.title,
                    }
                })
                .collect(),
        });

        Ok(GenerateResponse {
            text: texts.concat(),
            grounding,
        })
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WireErrorBody {
    pub error: WireError,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct WireError {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub status: Option<String>,
}

/// Longest raw (non-JSON) error body echoed into a message, in characters.
const MAX_RAW_BODY_CHARS: usize = 200;

/// Classify a non-success HTTP response.
///
/// 401/403 always mean a rejected credential. Otherwise the service's error
/// message is classified by content; an empty body carries no detail and is
/// reported as `Unknown`.
pub fn classify_http_error(status: u16, body: &str) -> ServiceError {
    if status == 401 || status == 403 {
        return ServiceError::InvalidCredential;
    }

    let message = serde_json::from_str::<WireErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(message) => match ServiceError::from_message(message) {
            ServiceError::Transient(message) => {
                ServiceError::Transient(format!("HTTP {status}: {message}"))
            }
            classified => classified,
        },
        None if body.trim().is_empty() => ServiceError::Unknown(format!("HTTP {status}")),
        None => ServiceError::from_message(format!("HTTP {status}: {}", raw_excerpt(body))),
    }
}

/// The leading part of a raw body, for echoing into failure messages.
pub fn raw_excerpt(body: &str) -> String {
    body.trim().chars().take(MAX_RAW_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use veraz_contracts::{
        error::ServiceError,
        generation::{ContentPart, GenerateRequest},
    };

    use super::{classify_http_error, WireRequest, WireResponse};

    fn decode(value: serde_json::Value) -> Result<veraz_contracts::generation::GenerateResponse, ServiceError> {
        serde_json::from_value::<WireResponse>(value)
            .unwrap()
            .into_generate_response()
    }

    // ── Request encoding ─────────────────────────────────────────────────────

    #[test]
    fn request_encodes_image_then_text_with_search_tool() {
        let request = GenerateRequest {
            parts: vec![
                ContentPart::InlineData {
                    mime_type: "image/png".to_string(),
                    data: b"hello".to_vec(),
                },
                ContentPart::Text("¿Es cierto?".to_string()),
            ],
            web_search: true,
        };

        let value = serde_json::to_value(WireRequest::from(&request)).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } },
                        { "text": "¿Es cierto?" }
                    ]
                }],
                "tools": [{ "googleSearch": {} }]
            })
        );
    }

    #[test]
    fn request_without_search_omits_tools() {
        let request = GenerateRequest {
            parts: vec![ContentPart::Text("x".to_string())],
            web_search: false,
        };
        let value = serde_json::to_value(WireRequest::from(&request)).unwrap();
        assert!(value.get("tools").is_none());
    }

    // ── Response decoding ────────────────────────────────────────────────────

    #[test]
    fn response_concatenates_text_parts_and_maps_grounding() {
        let response = decode(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "Falso\n" },
                    { "text": "La afirmación no tiene respaldo." }
                ]},
                "finishReason": "STOP",
                "groundingMetadata": {
                    "webSearchQueries": ["afirmación"],
                    "groundingChunks": [
                        { "web": { "uri": "https://a.example", "title": "a.example" } },
                        { "web": { "uri": "https://b.example" } },
                        { "retrievedContext": { "uri": "ignored" } }
                    ]
                }
            }],
            "usageMetadata": { "totalTokenCount": 42 }
        }))
        .unwrap();

        assert_eq!(response.text, "Falso\nLa afirmación no tiene respaldo.");
        let chunks = response.grounding.unwrap().chunks;
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].title.as_deref(), Some("a.example"));
        assert_eq!(chunks[1].title, None);
        assert_eq!(chunks[2].uri, None);
    }

    #[test]
    fn response_without_grounding_has_none() {
        let response = decode(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Verdadero\nSí." }] } }]
        }))
        .unwrap();
        assert!(response.grounding.is_none());
    }

    #[test]
    fn safety_blocked_prompt() {
        let err = decode(json!({ "promptFeedback": { "blockReason": "SAFETY" } })).unwrap_err();
        assert_eq!(err, ServiceError::SafetyBlocked);
    }

    #[test]
    fn other_blocked_prompt_is_transient() {
        let err = decode(json!({ "promptFeedback": { "blockReason": "OTHER" } })).unwrap_err();
        assert_eq!(err, ServiceError::Transient("request blocked: OTHER".to_string()));
    }

    #[test]
    fn safety_stopped_candidate_without_text() {
        let err = decode(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap_err();
        assert_eq!(err, ServiceError::SafetyBlocked);
    }

    #[test]
    fn empty_response_is_transient() {
        let err = decode(json!({})).unwrap_err();
        assert!(matches!(err, ServiceError::Transient(m) if m.contains("no candidates")));
    }

    // ── Error classification ─────────────────────────────────────────────────

    #[test]
    fn invalid_api_key_message_on_400() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })
        .to_string();
        assert_eq!(classify_http_error(400, &body), ServiceError::InvalidCredential);
    }

    #[test]
    fn forbidden_status_is_invalid_credential() {
        assert_eq!(classify_http_error(403, ""), ServiceError::InvalidCredential);
    }

    #[test]
    fn rate_limit_is_transient_with_status() {
        let body = json!({
            "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" }
        })
        .to_string();
        assert_eq!(
            classify_http_error(429, &body),
            ServiceError::Transient("HTTP 429: Resource has been exhausted".to_string())
        );
    }

    #[test]
    fn safety_in_error_message() {
        let body = json!({ "error": { "message": "Blocked: SAFETY" } }).to_string();
        assert_eq!(classify_http_error(400, &body), ServiceError::SafetyBlocked);
    }

    #[test]
    fn empty_error_body_is_unknown() {
        assert_eq!(
            classify_http_error(500, "  "),
            ServiceError::Unknown("HTTP 500".to_string())
        );
    }

    #[test]
    fn raw_error_body_is_truncated() {
        let body = "x".repeat(1000);
        match classify_http_error(502, &body) {
            ServiceError::Transient(m) => {
                assert!(m.starts_with("HTTP 502: "));
                assert_eq!(m.len(), "HTTP 502: ".len() + 200);
            }
            other => panic!("expected Transient, got {:?}", other),
        }
    }
}
