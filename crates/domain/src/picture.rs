//! Group picture payload checks.
//!
//! Pictures arrive as base64 text, optionally wrapped in a data URL
//! (`data:image/png;base64,....`). Resizing happens elsewhere; this only
//! unwraps the payload and enforces the configured size ceiling.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;

const DATA_URL_MARKER: &str = "base64,";

/// Why a picture payload was refused. Surfaced as a soft rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureRejection {
    NotBase64,
    TooLarge { size: usize, max: usize },
}

impl std::fmt::Display for PictureRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotBase64 => write!(f, "Group picture is not valid base64 data"),
            Self::TooLarge { size, max } => write!(
                f,
                "Group picture is {} bytes, maximum allowed is {} bytes",
                size, max
            ),
        }
    }
}

/// Returns the bare base64 payload, `None` for an empty one.
pub fn normalize_picture(
    raw: &str,
    max_bytes: usize,
) -> Result<Option<Arc<str>>, PictureRejection> {
    let payload = if raw.contains(DATA_URL_MARKER) {
        match raw.find(',') {
            Some(idx) => &raw[idx + 1..],
            None => raw,
        }
    } else {
        raw
    };
    let payload = payload.trim();

    if payload.is_empty() {
        return Ok(None);
    }

    let decoded = STANDARD
        .decode(payload)
        .map_err(|_| PictureRejection::NotBase64)?;

    if decoded.len() > max_bytes {
        return Err(PictureRejection::TooLarge {
            size: decoded.len(),
            max: max_bytes,
        });
    }

    Ok(Some(Arc::from(payload)))
}
