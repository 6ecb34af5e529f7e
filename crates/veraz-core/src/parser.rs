//! Turns the model's raw answer into a `VerificationResult`.
//!
//! Parsing is best effort and never fails: the first line is the verdict,
//! the rest is the analysis, and grounding chunks become sources. A verdict
//! outside the known vocabulary is kept as-is.

use tracing::debug;

use veraz_contracts::{
    generation::{GenerateResponse, GroundingMetadata},
    result::{Source, VerificationResult},
    verdict::NO_VERDICT,
};

/// Characters removed from the verdict line wherever they appear.
const VERDICT_PUNCTUATION: [char; 2] = ['.', ':'];

/// Parse a successful service response.
pub fn parse_response(response: &GenerateResponse) -> VerificationResult {
    let (verdict, analysis) = split_answer(&response.text);
    let sources = response
        .grounding
        .as_ref()
        .map(extract_sources)
        .unwrap_or_default();

    debug!(
        verdict = %verdict,
        analysis_len = analysis.len(),
        source_count = sources.len(),
        "parsed model response"
    );

    VerificationResult {
        verdict,
        analysis,
        sources,
    }
}

/// Split raw answer text into `(verdict, analysis)`.
pub fn split_answer(text: &str) -> (String, String) {
    let mut lines = text.split('\n');

    let first = lines.next().unwrap_or_default();
    let verdict: String = first
        .trim()
        .chars()
        .filter(|c| !VERDICT_PUNCTUATION.contains(c))
        .collect();
    let verdict = match verdict.trim() {
        "" => NO_VERDICT.to_string(),
        v => v.to_string(),
    };

    let analysis = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    (verdict, analysis)
}

/// Map grounding chunks to sources, dropping chunks without a usable URI.
/// Service ordering is preserved; nothing is deduplicated.
pub fn extract_sources(metadata: &GroundingMetadata) -> Vec<Source> {
    metadata
        .chunks
        .iter()
        .filter_map(|chunk| {
            let uri = chunk.uri.as_deref().filter(|u| !u.is_empty())?;
            let title = chunk
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(uri);
            Some(Source {
                uri: uri.to_string(),
                title: title.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use veraz_contracts::generation::{GenerateResponse, GroundingChunk, GroundingMetadata};

    use super::{parse_response, split_answer};

    fn response(text: &str) -> GenerateResponse {
        GenerateResponse {
            text: text.to_string(),
            grounding: None,
        }
    }

    fn chunk(uri: Option<&str>, title: Option<&str>) -> GroundingChunk {
        GroundingChunk {
            uri: uri.map(str::to_string),
            title: title.map(str::to_string),
        }
    }

    #[test]
    fn first_line_is_verdict_rest_is_analysis() {
        let result = parse_response(&response("Verdadero.\nExplanation."));
        assert_eq!(result.verdict, "Verdadero");
        assert_eq!(result.analysis, "Explanation.");
        assert!(result.sources.is_empty());
    }

    #[test]
    fn verdict_colon_is_stripped() {
        let (verdict, _) = split_answer("Falso:\nNo hay registros.");
        assert_eq!(verdict, "Falso");
    }

    #[test]
    fn whitespace_left_by_stripped_punctuation_is_trimmed() {
        let (verdict, _) = split_answer("Falso :\nNo hay registros.");
        assert_eq!(verdict, "Falso");

        let (verdict, _) = split_answer(". Engañoso .\nTexto.");
        assert_eq!(verdict, "Engañoso");
    }

    #[test]
    fn punctuation_inside_verdict_is_stripped() {
        let (verdict, _) = split_answer("  Sin. Evidencia:  \n...");
        assert_eq!(verdict, "Sin Evidencia");
    }

    #[test]
    fn empty_first_line_defaults_to_no_verdict() {
        let (verdict, analysis) = split_answer("\nSolo explicación.");
        assert_eq!(verdict, "Sin Veredicto");
        assert_eq!(analysis, "Solo explicación.");
    }

    #[test]
    fn punctuation_only_first_line_defaults_to_no_verdict() {
        let (verdict, _) = split_answer(" .: \nalgo");
        assert_eq!(verdict, "Sin Veredicto");
    }

    #[test]
    fn empty_text_yields_no_verdict_and_empty_analysis() {
        let (verdict, analysis) = split_answer("");
        assert_eq!(verdict, "Sin Veredicto");
        assert_eq!(analysis, "");
    }

    #[test]
    fn analysis_keeps_inner_newlines_and_is_trimmed() {
        let (_, analysis) = split_answer("Mixto\n\n  Primera parte.\n\nSegunda parte.  \n");
        assert_eq!(analysis, "Primera parte.\n\nSegunda parte.");
    }

    #[test]
    fn unknown_verdict_is_accepted_as_is() {
        let (verdict, _) = split_answer("Probablemente cierto\n...");
        assert_eq!(verdict, "Probablemente cierto");
    }

    #[test]
    fn sources_skip_missing_uri_and_fall_back_to_uri_title() {
        let mut resp = response("Verdadero\nOK");
        resp.grounding = Some(GroundingMetadata {
            chunks: vec![
                chunk(Some("https://a.example"), Some("Fuente A")),
                chunk(None, Some("sin uri")),
                chunk(Some(""), Some("uri vacía")),
                chunk(Some("https://b.example"), None),
                chunk(Some("https://c.example"), Some("")),
            ],
        });

        let result = parse_response(&resp);
        let pairs: Vec<(&str, &str)> = result
            .sources
            .iter()
            .map(|s| (s.uri.as_str(), s.title.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("https://a.example", "Fuente A"),
                ("https://b.example", "https://b.example"),
                ("https://c.example", "https://c.example"),
            ]
        );
    }

    #[test]
    fn duplicate_sources_are_kept_in_order() {
        let mut resp = response("Falso\nNo.");
        resp.grounding = Some(GroundingMetadata {
            chunks: vec![
                chunk(Some("https://dup.example"), Some("1")),
                chunk(Some("https://dup.example"), Some("2")),
            ],
        });

        let result = parse_response(&resp);
        assert_eq!(result.sources.len(), 2);
        assert_eq!(result.sources[0].title, "1");
        assert_eq!(result.sources[1].title, "2");
    }
}
