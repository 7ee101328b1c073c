//! Shared configuration constants for pagebundle
//!
//! Default values used by [`crate::config::BundleConfig`] and the transport
//! layer, kept in one place to avoid magic numbers.

/// Default timeout for fetching the original document: 30 seconds
pub const DEFAULT_DOCUMENT_TIMEOUT_SECS: u64 = 30;

/// Default timeout for fetching a single resource: 30 seconds
pub const DEFAULT_RESOURCE_TIMEOUT_SECS: u64 = 30;

/// Maximum size of the original document (bytes)
///
/// Large documentation pages rarely exceed 2-3MB of markup.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 10 * 1024 * 1024;

/// Maximum size of a single inlined resource (bytes)
///
/// Anything larger inflates the bundle by a third again once base64-encoded.
pub const DEFAULT_MAX_RESOURCE_SIZE: usize = 5 * 1024 * 1024;

/// Default number of redirects followed per request
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Browser-like user agent sent unless a hook overrides it
///
/// Some CDNs refuse to serve stylesheets and fonts to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// `Accept` header for the original document request
pub const DOCUMENT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// `Accept` header for resource requests
pub const RESOURCE_ACCEPT: &str = "*/*";
