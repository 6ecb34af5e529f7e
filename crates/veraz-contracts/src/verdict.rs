//! The verdict vocabulary.
//!
//! The external model is instructed to open its answer with one of a small
//! set of Spanish keywords. `Verdict` names that set so callers can match on
//! it, but results keep the raw keyword: a model answer outside the
//! vocabulary is still a valid verdict string.

use serde::{Deserialize, Serialize};

/// Keyword used when the model's first line is empty after cleanup.
pub const NO_VERDICT: &str = "Sin Veredicto";

/// Keyword carried by every failed verification.
pub const ERROR_VERDICT: &str = "Error";

/// The known verdict keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// "Verdadero"
    True,
    /// "Falso"
    False,
    /// "Engañoso"
    Misleading,
    /// "Mixto"
    Mixed,
    /// "Sin Evidencia"
    NoEvidence,
    /// "Sin Veredicto": the parser's fallback, never requested from the model.
    NoVerdict,
    /// "Error": produced locally when verification fails.
    Error,
}

impl Verdict {
    /// The keywords the model is allowed to answer with, in prompt order.
    pub const MODEL_KEYWORDS: [Verdict; 5] = [
        Verdict::True,
        Verdict::False,
        Verdict::Misleading,
        Verdict::Mixed,
        Verdict::NoEvidence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "Verdadero",
            Self::False => "Falso",
            Self::Misleading => "Engañoso",
            Self::Mixed => "Mixto",
            Self::NoEvidence => "Sin Evidencia",
            Self::NoVerdict => NO_VERDICT,
            Self::Error => ERROR_VERDICT,
        }
    }

    /// Match a raw verdict string against the vocabulary, ignoring case and
    /// surrounding whitespace. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        [
            Self::True,
            Self::False,
            Self::Misleading,
            Self::Mixed,
            Self::NoEvidence,
            Self::NoVerdict,
            Self::Error,
        ]
        .into_iter()
        .find(|v| v.as_str().to_lowercase() == needle)
    }

    /// How a result with this verdict should be presented.
    pub fn tone(&self) -> VerdictTone {
        match self {
            Self::True => VerdictTone::Confirmed,
            Self::False => VerdictTone::Refuted,
            Self::Misleading | Self::Mixed => VerdictTone::Disputed,
            Self::NoEvidence | Self::NoVerdict | Self::Error => VerdictTone::Neutral,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation grouping for verdicts.
///
/// Unknown verdict strings fall into `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictTone {
    Confirmed,
    Refuted,
    Disputed,
    Neutral,
}

impl VerdictTone {
    /// Heading shown above the analysis.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Confirmed => "Información Verificada",
            Self::Refuted => "Información Falsa",
            Self::Disputed => "Posible Desinformación",
            Self::Neutral => "Análisis de IA",
        }
    }

    /// Tone for an arbitrary verdict string.
    pub fn of(verdict: &str) -> Self {
        Verdict::parse(verdict)
            .map(|v| v.tone())
            .unwrap_or(Self::Neutral)
    }
}
