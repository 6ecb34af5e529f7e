//! Error types for the veraz client.
//!
//! `ServiceError` classifies a failed call to the generative service once,
//! at the failure site. It is rendered to user-facing text only at the
//! boundary, through `ServiceError::user_message`.
//!
//! `VerazError` covers everything else that can go wrong around a
//! verification: configuration, image ingestion and progress persistence.

use thiserror::Error;

/// Marker the service puts in failures caused by its safety filters.
const SAFETY_MARKER: &str = "SAFETY";

/// Text the service returns when the API key is rejected.
const INVALID_KEY_MARKER: &str = "API key not valid";

/// Why a single call to the generative service failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service refused the request on safety or policy grounds.
    #[error("request blocked by the service's SAFETY filters")]
    SafetyBlocked,

    /// The service rejected the configured credential.
    #[error("API key not valid")]
    InvalidCredential,

    /// Network failure, rate limiting, malformed response and the like.
    #[error("{0}")]
    Transient(String),

    /// A failure whose shape carries no usable detail.
    #[error("unknown service failure: {0}")]
    Unknown(String),
}

impl ServiceError {
    /// Classify a free-form failure message.
    ///
    /// Safety markers win over credential markers; anything unrecognised is
    /// treated as transient.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(SAFETY_MARKER) {
            Self::SafetyBlocked
        } else if message.contains(INVALID_KEY_MARKER) {
            Self::InvalidCredential
        } else {
            Self::Transient(message)
        }
    }

    /// The Spanish message shown to end users for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::SafetyBlocked => "La solicitud fue bloqueada por motivos de seguridad. \
                                    Por favor, ajusta tu consulta o la imagen."
                .to_string(),
            Self::InvalidCredential => "La clave de API no es válida. \
                                        Por favor, contacta al administrador del sitio."
                .to_string(),
            Self::Transient(message) => format!(
                "Error al verificar: {message}. Por favor, inténtalo de nuevo más tarde."
            ),
            Self::Unknown(_) => "Ocurrió un error desconocido durante la verificación.".to_string(),
        }
    }
}

/// The unified error type for everything around a verification call.
#[derive(Debug, Error)]
pub enum VerazError {
    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An image could not be accepted for verification.
    #[error("image rejected: {reason}")]
    ImageRejected { reason: String },

    /// The progress store could not be read or written.
    #[error("progress store error: {reason}")]
    ProgressStore { reason: String },

    /// A result could not be rendered for output.
    #[error("output error: {reason}")]
    Output { reason: String },

    /// The generative service failed.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}

/// Convenience alias used throughout the veraz crates.
pub type VerazResult<T> = Result<T, VerazError>;
