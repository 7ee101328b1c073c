//! Inline representation of resources as data URIs
//!
//! Everything here is a pure function of its inputs: no network, no I/O.
//! The produced representation is `data:<mimetype>;base64,<payload>`, the
//! standard data URI scheme accepted directly by browsers.

pub mod mime;

pub use mime::{DEFAULT_MIME_TYPE, is_binary_mime_type, mime_type_of, normalize_content_type};

use base64::Engine;

/// Base64-encode `content` and wrap it as a data URI of type `mime_type`
#[must_use]
pub fn encode(mime_type: &str, content: &[u8]) -> String {
    let encoded_capacity = base64::encoded_len(content.len(), true).unwrap_or(0);
    let mut encoded = String::with_capacity(encoded_capacity + 13 + mime_type.len());

    encoded.push_str("data:");
    encoded.push_str(mime_type);
    encoded.push_str(";base64,");

    // STANDARD (padded) alphabet for renderer compatibility
    base64::engine::general_purpose::STANDARD.encode_string(content, &mut encoded);

    encoded
}

/// Pick the MIME type for a fetched resource
///
/// An explicit `Content-Type` header wins; the URL's extension is only a
/// fallback for servers that omit it.
#[must_use]
pub fn content_type_for(content_type_header: Option<&str>, url: &str) -> String {
    content_type_header
        .map(normalize_content_type)
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| mime_type_of(url).to_string())
}

/// Encode a resource, preferring the response's content type over inference
#[must_use]
pub fn data_uri(content_type_header: Option<&str>, url: &str, content: &[u8]) -> String {
    encode(&content_type_for(content_type_header, url), content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_produces_data_uri() {
        assert_eq!(encode("image/png", b"hello"), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_encode_empty_content() {
        assert_eq!(encode("text/plain", b""), "data:text/plain;base64,");
    }

    #[test]
    fn test_data_uri_infers_from_extension() {
        assert_eq!(
            data_uri(None, "image.png", b"hello"),
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_header_content_type_wins_over_extension() {
        assert_eq!(
            data_uri(Some("image/webp"), "https://cdn.example.com/photo.png", b"hello"),
            "data:image/webp;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_header_parameters_are_compacted() {
        assert_eq!(
            content_type_for(Some("text/css; charset=utf-8"), "style"),
            "text/css;charset=utf-8"
        );
    }

    #[test]
    fn test_blank_header_falls_back_to_inference() {
        assert_eq!(content_type_for(Some("  "), "/js/app.js"), "text/javascript");
    }
}
