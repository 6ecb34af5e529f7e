//! Terminal rendering for verification results and badge progress.

use veraz_contracts::result::{AnalysisSegment, VerificationResult};
use veraz_progress::{Badge, BadgeProgress};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Width of the progress bar, in cells.
const BAR_WIDTH: usize = 20;

/// Render a result as the block printed after `veraz verify`.
///
/// `ansi` controls whether `**bold**` runs are emphasised with escape codes
/// or printed as plain text.
pub fn result_block(result: &VerificationResult, ansi: bool) -> String {
    let mut out = String::new();

    out.push_str(result.tone().title());
    out.push('\n');
    out.push_str(&format!("Veredicto: {}\n\n", result.verdict));

    for segment in result.analysis_segments() {
        match segment {
            AnalysisSegment::Plain(text) => out.push_str(text),
            AnalysisSegment::Bold(text) if ansi => {
                out.push_str(BOLD);
                out.push_str(text);
                out.push_str(RESET);
            }
            AnalysisSegment::Bold(text) => out.push_str(text),
        }
    }
    out.push('\n');

    if !result.sources.is_empty() {
        out.push_str("\nFuentes:\n");
        for (index, source) in result.sources.iter().enumerate() {
            out.push_str(&format!("  {}. {} <{}>\n", index + 1, source.title, source.uri));
        }
    }

    out
}

/// Render badge progress for `veraz progress`.
pub fn progress_block(count: u64, progress: &BadgeProgress) -> String {
    let mut out = format!("Verificaciones: {count}\n");

    out.push_str(&format!(
        "Insignia actual: {}\n",
        progress.current.map(|b| b.name).unwrap_or("Ninguna")
    ));

    match progress.next {
        Some(next) => out.push_str(&format!(
            "Siguiente insignia: {} ({} verificaciones)\n",
            next.name, next.threshold
        )),
        None => out.push_str("¡Has alcanzado la insignia más alta!\n"),
    }

    out.push_str(&format!(
        "[{}] {:.0}%\n",
        bar(progress.progress_percent),
        progress.progress_percent
    ));
    out
}

pub fn badge_announcement(badge: &Badge) -> String {
    format!("¡Nueva insignia desbloqueada: {}!", badge.name)
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use veraz_contracts::{
        error::ServiceError,
        result::{Source, VerificationResult},
    };
    use veraz_progress::badge_info;

    use super::{bar, progress_block, result_block, BOLD, RESET};

    fn sample() -> VerificationResult {
        VerificationResult {
            verdict: "Falso".to_string(),
            analysis: "La cifra es **incorrecta** según el censo.".to_string(),
            sources: vec![
                Source {
                    uri: "https://a.example".to_string(),
                    title: "Censo".to_string(),
                },
                Source {
                    uri: "https://b.example".to_string(),
                    title: "https://b.example".to_string(),
                },
            ],
        }
    }

    #[test]
    fn result_block_has_title_verdict_and_numbered_sources() {
        let out = result_block(&sample(), false);

        assert!(out.starts_with("Información Falsa\n"));
        assert!(out.contains("Veredicto: Falso"));
        assert!(out.contains("La cifra es incorrecta según el censo."));
        assert!(out.contains("  1. Censo <https://a.example>"));
        assert!(out.contains("  2. https://b.example <https://b.example>"));
    }

    #[test]
    fn bold_runs_use_escape_codes_when_enabled() {
        let out = result_block(&sample(), true);
        assert!(out.contains(&format!("{BOLD}incorrecta{RESET}")));
    }

    #[test]
    fn error_result_has_no_sources_section() {
        let result = VerificationResult::from_error(&ServiceError::SafetyBlocked);
        let out = result_block(&result, false);

        assert!(out.starts_with("Análisis de IA\n"));
        assert!(out.contains("Veredicto: Error"));
        assert!(!out.contains("Fuentes:"));
    }

    #[test]
    fn progress_block_before_first_badge() {
        let out = progress_block(0, &badge_info(0));
        assert!(out.contains("Insignia actual: Ninguna"));
        assert!(out.contains("Siguiente insignia: Verificador Novato (1 verificaciones)"));
        assert!(out.contains("0%"));
    }

    #[test]
    fn progress_block_at_top_level() {
        let out = progress_block(60, &badge_info(60));
        assert!(out.contains("Insignia actual: Guardián de la Verdad"));
        assert!(out.contains("insignia más alta"));
        assert!(out.contains(&format!("[{}] 100%", "#".repeat(20))));
    }

    #[test]
    fn bar_is_clamped() {
        assert_eq!(bar(0.0), "-".repeat(20));
        assert_eq!(bar(50.0), format!("{}{}", "#".repeat(10), "-".repeat(10)));
        assert_eq!(bar(250.0), "#".repeat(20));
    }
}
