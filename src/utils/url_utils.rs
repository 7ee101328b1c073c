//! URL resolution helpers for references found in documents.

use url::Url;

use crate::errors::{BundleError, BundleResult};

/// Schemes the fetcher knows how to request
const FETCHABLE_SCHEMES: [&str; 2] = ["http", "https"];

/// Resolve a potentially relative reference against a base URL
///
/// Relative references become absolute and scheme-relative references
/// (`//cdn.example.com/x.js`) inherit the base scheme. The query is kept
/// exactly as written and only the fragment is dropped.
///
/// Empty and fragment-only references are rejected as invalid URLs, and
/// anything that resolves to a scheme other than http(s) is an invalid
/// protocol. Both errors are [`BundleError::is_skippable`].
pub fn resolve_url(base_url: &str, reference: &str) -> BundleResult<Url> {
    let reference = reference.trim();
    if reference.is_empty() || reference.starts_with('#') {
        return Err(BundleError::InvalidUrl {
            reference: reference.to_string(),
            reason: "reference does not point to a resource".to_string(),
        });
    }

    let base = Url::parse(base_url).map_err(|e| BundleError::InvalidUrl {
        reference: base_url.to_string(),
        reason: format!("invalid base URL: {e}"),
    })?;
    let mut resolved = base.join(reference).map_err(|e| BundleError::InvalidUrl {
        reference: reference.to_string(),
        reason: e.to_string(),
    })?;

    if !FETCHABLE_SCHEMES.contains(&resolved.scheme()) {
        return Err(BundleError::InvalidProtocol {
            url: resolved.to_string(),
            scheme: resolved.scheme().to_string(),
        });
    }

    resolved.set_fragment(None);
    Ok(resolved)
}

/// Parse the URL of a top-level bundle request
pub fn parse_document_url(url: &str) -> BundleResult<Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(BundleError::MissingUrl);
    }

    let parsed = Url::parse(url).map_err(|e| BundleError::InvalidUrl {
        reference: url.to_string(),
        reason: e.to_string(),
    })?;

    if !FETCHABLE_SCHEMES.contains(&parsed.scheme()) {
        return Err(BundleError::InvalidProtocol {
            url: url.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }

    Ok(parsed)
}

/// Whether a reference found in a document is worth resolving at all
///
/// Already-inlined `data:` URIs and blank values are left alone.
#[must_use]
pub fn is_fetchable_reference(reference: &str) -> bool {
    let reference = reference.trim();
    !reference.is_empty()
        && !reference
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_resolution() {
        let resolved = resolve_url("https://example.com/path/page.html", "../styles/main.css").unwrap();

        assert_eq!(resolved.as_str(), "https://example.com/styles/main.css");
    }

    #[test]
    fn test_scheme_relative_reference_inherits_scheme() {
        let resolved = resolve_url("http://example.com/index.html", "//cdn.example.com/app.js").unwrap();

        assert_eq!(resolved.as_str(), "http://cdn.example.com/app.js");
    }

    #[test]
    fn test_absolute_reference_ignores_base() {
        let resolved = resolve_url("https://example.com/", "https://other.org/logo.png").unwrap();

        assert_eq!(resolved.as_str(), "https://other.org/logo.png");
    }

    #[test]
    fn test_query_is_kept_as_written() {
        let base = "http://example.com/";

        for (reference, expected) in [
            ("a.css?v1", "http://example.com/a.css?v1"),
            ("a.css?a=1;b=2", "http://example.com/a.css?a=1;b=2"),
            ("img.png?sig=ab%3Dcd&x=", "http://example.com/img.png?sig=ab%3Dcd&x="),
            (
                "https://fonts.googleapis.com/css2?family=Inter:wght@400;700&display=swap",
                "https://fonts.googleapis.com/css2?family=Inter:wght@400;700&display=swap",
            ),
        ] {
            assert_eq!(resolve_url(base, reference).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn test_fragment_is_dropped() {
        let resolved = resolve_url("https://example.com/", "sprite.svg#icon").unwrap();

        assert_eq!(resolved.as_str(), "https://example.com/sprite.svg");
    }

    #[test]
    fn test_javascript_reference_is_invalid_protocol() {
        let err = resolve_url("https://example.com/", "javascript:void(0)").unwrap_err();

        assert!(matches!(err, BundleError::InvalidProtocol { ref scheme, .. } if scheme == "javascript"));
        assert!(err.is_skippable());
    }

    #[test]
    fn test_empty_and_fragment_references_are_invalid() {
        assert!(matches!(
            resolve_url("https://example.com/", "   "),
            Err(BundleError::InvalidUrl { .. })
        ));
        assert!(matches!(
            resolve_url("https://example.com/", "#top"),
            Err(BundleError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_document_url_requires_http() {
        assert!(matches!(parse_document_url(""), Err(BundleError::MissingUrl)));
        assert!(matches!(
            parse_document_url("ftp://example.com/file"),
            Err(BundleError::InvalidProtocol { .. })
        ));
        assert!(parse_document_url("https://example.com").is_ok());
    }

    #[test]
    fn test_data_uris_are_not_fetchable() {
        assert!(!is_fetchable_reference("data:image/png;base64,aGVsbG8="));
        assert!(!is_fetchable_reference("DATA:text/plain,hi"));
        assert!(!is_fetchable_reference(""));
        assert!(is_fetchable_reference("/img/logo.png"));
        assert!(is_fetchable_reference("a"));
    }
}
