//! The instruction template sent with every claim.
//!
//! The template and `parser::parse_response` form one contract: the model is
//! told to put a single verdict keyword on the first line and its
//! explanation below, and the parser reads exactly that shape. The keyword
//! list is rendered from `Verdict::MODEL_KEYWORDS` so the two cannot drift.

use tracing::debug;

use veraz_contracts::{
    generation::{ContentPart, GenerateRequest},
    request::VerificationRequest,
    verdict::Verdict,
};

/// Render the instruction text for `claim`. The claim is embedded verbatim.
pub fn instruction_text(claim: &str) -> String {
    let keywords = Verdict::MODEL_KEYWORDS
        .iter()
        .map(Verdict::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Realiza una verificación de hechos (fact-check) sobre la siguiente afirmación y/o imagen. \
         Sé conciso, objetivo y claro.\n\
         Inicia tu respuesta con una ÚNICA palabra clave de veredicto de esta lista: [{keywords}].\n\
         Después del veredicto, en una nueva línea, proporciona una breve explicación que lo respalde.\n\
         La afirmación es: \"{claim}\""
    )
}

/// Build the generation request for one verification.
///
/// The image, when present, goes first; the instruction text is always the
/// last part. Web-search grounding is always requested.
pub fn build_request(request: &VerificationRequest) -> GenerateRequest {
    let mut parts = Vec::with_capacity(2);

    if let Some(image) = &request.image {
        parts.push(ContentPart::InlineData {
            mime_type: image.mime_type.clone(),
            data: image.data.clone(),
        });
    }
    parts.push(ContentPart::Text(instruction_text(&request.prompt_text)));

    debug!(
        part_count = parts.len(),
        has_image = request.image.is_some(),
        claim_len = request.prompt_text.len(),
        "built generation request"
    );

    GenerateRequest {
        parts,
        web_search: true,
    }
}
