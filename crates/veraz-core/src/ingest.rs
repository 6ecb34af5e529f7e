//! Image ingestion for callers that read images from disk.
//!
//! The verification client trusts the image it is given. This module is
//! where that trust is earned: files are size-bounded and must look like an
//! image before they become an `InlineImage`.

use std::path::Path;

use tracing::debug;

use veraz_contracts::{
    error::{VerazError, VerazResult},
    request::InlineImage,
};

/// Largest image accepted, in bytes (4 MiB).
pub const MAX_IMAGE_BYTES: u64 = 4 * 1024 * 1024;

/// Infer an image media type from a file extension.
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Read and validate an image file.
///
/// Returns `VerazError::ImageRejected` when the file is not a recognised
/// image type, exceeds `MAX_IMAGE_BYTES`, or cannot be read.
pub fn load_image(path: &Path) -> VerazResult<InlineImage> {
    let mime_type = mime_type_for(path).ok_or_else(|| VerazError::ImageRejected {
        reason: "Por favor, suelta un archivo de imagen válido.".to_string(),
    })?;

    let read_error = |e: std::io::Error| VerazError::ImageRejected {
        reason: format!("Error al leer la imagen '{}': {}", path.display(), e),
    };

    let size = std::fs::metadata(path).map_err(read_error)?.len();
    if size > MAX_IMAGE_BYTES {
        return Err(VerazError::ImageRejected {
            reason: "El tamaño de la imagen no debe exceder 4MB.".to_string(),
        });
    }

    let data = std::fs::read(path).map_err(read_error)?;
    debug!(path = %path.display(), mime_type, size, "image loaded");

    Ok(InlineImage::new(data, mime_type))
}
