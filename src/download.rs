//! Turns a base64 image blob into a binary download attachment.
//!
//! Exists to work around browser `download` attribute limitations for
//! cross-origin blobs: the front-end posts the processed image back and
//! receives it as a `Content-Disposition: attachment` response.

use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

static DATA_URL_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/\w+;base64,").unwrap());

/// A decoded image ready to be served as a file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Decode a base64 image (optionally a `data:image/...;base64,` URL) into
/// raw bytes with a timestamped download filename.
pub fn build_attachment(blob: &str) -> Result<Attachment> {
    if blob.trim().is_empty() {
        return Err(Error::invalid_input("No blob data provided"));
    }

    let data = DATA_URL_PREFIX_RE.replace(blob, "");
    let bytes = general_purpose::STANDARD.decode(data.as_ref())?;

    let filename = format!("removed-bg-{}.png", Utc::now().timestamp_millis());

    Ok(Attachment { bytes, filename })
}
