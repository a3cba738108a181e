//! Minimal byte-oriented `multipart/form-data` extractor.
//!
//! Locates a single named file field in a raw request body. All offset
//! arithmetic happens on byte slices so arbitrary 8-bit payloads survive
//! untouched; only the header block of a part is ever treated as text.
//!
//! This is not a general multipart decoder: it finds the first part named
//! `image`, and ignores additional files, nested parts, and percent-encoded
//! filenames.

use once_cell::sync::Lazy;
use regex::Regex;

/// Field name the extractor looks for.
pub const IMAGE_FIELD: &str = "image";

/// Filename used when the part declares none.
const DEFAULT_FILENAME: &str = "image.jpg";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|;\s*)name="([^"]*)""#).unwrap());
static FILENAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"filename="([^"]*)""#).unwrap());

/// A file pulled out of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Pull the boundary parameter out of a `Content-Type` header value.
pub fn boundary(content_type: &str) -> Option<&str> {
    let raw = content_type.split("boundary=").nth(1)?;
    let raw = raw.split(';').next()?;
    let raw = raw.trim().trim_matches('"');
    if raw.is_empty() { None } else { Some(raw) }
}

/// Extract the part named `image` from a raw multipart body.
///
/// Returns `None` when no such part exists or its payload span is empty;
/// callers surface that as a client error rather than proceeding with empty
/// bytes.
pub fn extract(body: &[u8], boundary: &str) -> Option<UploadedFile> {
    let marker = format!("--{boundary}").into_bytes();

    for segment in split_segments(body, &marker) {
        // Header block ends at the first blank line; payload starts after it.
        let Some(header_end) = find(segment, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&segment[..header_end]);
        if !headers.contains("Content-Disposition") {
            continue;
        }

        let disposition_name = NAME_RE
            .captures(&headers)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());
        if disposition_name != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = FILENAME_RE
            .captures(&headers)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        // Payload runs from just past the blank line to the line terminator
        // preceding the next boundary marker.
        let content_start = header_end + 4;
        let content_end = rfind(segment, b"\r\n")?;
        if content_end <= content_start {
            return None;
        }

        return Some(UploadedFile {
            filename,
            bytes: segment[content_start..content_end].to_vec(),
        });
    }

    None
}

/// Split `body` on every occurrence of `marker`, excluding the marker itself.
fn split_segments<'a>(body: &'a [u8], marker: &[u8]) -> Vec<&'a [u8]> {
    let mut segments = Vec::new();
    let mut start = 0;

    while let Some(pos) = find(&body[start..], marker) {
        segments.push(&body[start..start + pos]);
        start += pos + marker.len();
    }
    segments.push(&body[start..]);

    segments
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BOUNDARY: &str = "----WebKitFormBoundaryX3yrZl0vGzq8TW5c";

    fn build_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, payload) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n").as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            body.extend_from_slice(payload);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    #[test]
    fn test_boundary_from_content_type() {
        assert_eq!(
            boundary("multipart/form-data; boundary=----abc123"),
            Some("----abc123")
        );
        assert_eq!(
            boundary("multipart/form-data; boundary=\"quoted\"; charset=utf-8"),
            Some("quoted")
        );
        assert_eq!(boundary("application/json"), None);
        assert_eq!(boundary("multipart/form-data; boundary="), None);
    }

    #[test]
    fn test_extract_named_image_field() {
        let payload = b"\xff\xd8\xff\xe0 jpeg bytes";
        let body = build_body(&[("image", Some("cat.jpg"), payload)]);

        let file = extract(&body, BOUNDARY).unwrap();
        assert_eq!(file.filename, "cat.jpg");
        assert_eq!(file.bytes, payload);
    }

    #[test]
    fn test_extract_defaults_filename() {
        let body = build_body(&[("image", None, b"raw")]);

        let file = extract(&body, BOUNDARY).unwrap();
        assert_eq!(file.filename, "image.jpg");
        assert_eq!(file.bytes, b"raw");
    }

    #[test]
    fn test_extract_skips_other_fields() {
        let body = build_body(&[
            ("comment", None, b"not a file"),
            ("image", Some("dog.png"), b"png-bytes"),
        ]);

        let file = extract(&body, BOUNDARY).unwrap();
        assert_eq!(file.filename, "dog.png");
        assert_eq!(file.bytes, b"png-bytes");
    }

    #[test]
    fn test_extract_missing_field_is_none() {
        let body = build_body(&[("file", Some("cat.jpg"), b"payload")]);
        assert_eq!(extract(&body, BOUNDARY), None);
    }

    #[test]
    fn test_extract_empty_payload_is_none() {
        let body = build_body(&[("image", Some("cat.jpg"), b"")]);
        assert_eq!(extract(&body, BOUNDARY), None);
    }

    #[test]
    fn test_extract_preserves_arbitrary_binary() {
        // Every byte value, including CRLF pairs and boundary-ish text inside
        // the payload.
        let mut payload: Vec<u8> = (0u8..=255).collect();
        payload.extend_from_slice(b"\r\ntrailing line");

        let body = build_body(&[("image", Some("blob.bin"), &payload)]);

        let file = extract(&body, BOUNDARY).unwrap();
        assert_eq!(file.bytes, payload);
    }

    #[test]
    fn test_extract_does_not_match_filename_attribute() {
        // A part whose *filename* is "image" but whose field name is not.
        let body = build_body(&[("file", Some("image"), b"payload")]);
        assert_eq!(extract(&body, BOUNDARY), None);
    }

    #[test]
    fn test_extract_garbage_body_is_none() {
        assert_eq!(extract(b"not multipart at all", BOUNDARY), None);
        assert_eq!(extract(b"", BOUNDARY), None);
    }
}
