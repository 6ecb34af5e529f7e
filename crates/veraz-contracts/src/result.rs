//! Verification result types.
//!
//! A `VerificationResult` is produced fresh by every call, successful or
//! not, and is never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::{
    error::ServiceError,
    verdict::{VerdictTone, ERROR_VERDICT},
};

/// Delimiter the model uses for bold text inside the analysis.
const BOLD_DELIMITER: &str = "**";

/// The outcome of one verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Verdict keyword. Usually one of the `Verdict` vocabulary, but any
    /// string the model answered with is accepted.
    pub verdict: String,
    /// Free-text explanation. May contain `**bold**` markup.
    pub analysis: String,
    /// Web citations backing the analysis, in service order.
    pub sources: Vec<Source>,
}

/// A web citation shown alongside the verdict. Display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    /// Falls back to `uri` when the service provided no title.
    pub title: String,
}

/// A run of analysis text, either plain or bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSegment<'a> {
    Plain(&'a str),
    Bold(&'a str),
}

impl VerificationResult {
    /// The uniform result shape for a failed verification.
    pub fn from_error(error: &ServiceError) -> Self {
        Self {
            verdict: ERROR_VERDICT.to_string(),
            analysis: error.user_message(),
            sources: Vec::new(),
        }
    }

    /// True when this result reports a failure rather than a verdict.
    pub fn is_error(&self) -> bool {
        self.verdict.eq_ignore_ascii_case(ERROR_VERDICT)
    }

    /// Presentation tone for this result's verdict.
    pub fn tone(&self) -> VerdictTone {
        VerdictTone::of(&self.verdict)
    }

    /// Split the analysis on `**` delimiters. Odd-numbered runs are bold.
    ///
    /// An unbalanced trailing delimiter turns the rest of the text bold,
    /// mirroring a naive split. Empty runs are dropped.
    pub fn analysis_segments(&self) -> Vec<AnalysisSegment<'_>> {
        self.analysis
            .split(BOLD_DELIMITER)
            .enumerate()
            .filter(|(_, part)| !part.is_empty())
            .map(|(index, part)| {
                if index % 2 == 1 {
                    AnalysisSegment::Bold(part)
                } else {
                    AnalysisSegment::Plain(part)
                }
            })
            .collect()
    }
}
