//! Error types for bundling operations
//!
//! Errors are split into two classes. Fatal errors end a bundle request and
//! are returned from [`crate::Bundler::bundle`]. Local errors belong to a single
//! resource fetch; they are reported to the observer and recorded in the
//! bundle's failure list, but never surface as an `Err`.

use thiserror::Error;

use crate::hooks::HookName;

/// Result type alias for bundling operations
pub type BundleResult<T> = Result<T, BundleError>;

/// Error types for bundling operations
#[derive(Debug, Clone, Error)]
pub enum BundleError {
    /// `bundle` was called without a target URL
    #[error("No URL provided to bundler")]
    MissingUrl,

    /// A reference could not be resolved into an absolute URL
    #[error("Invalid URI '{reference}': {reason}")]
    InvalidUrl { reference: String, reason: String },

    /// A reference resolved to a scheme that cannot be fetched
    #[error("Invalid protocol '{scheme}' for {url}")]
    InvalidProtocol { url: String, scheme: String },

    /// The transport failed before a response was received
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The server answered with a non-success status
    #[error("HTTP error {status}: {url}")]
    Status { url: String, status: u16 },

    /// The response body exceeded the configured size limit
    #[error("Response from {url} exceeds size limit of {limit} bytes")]
    TooLarge { url: String, limit: usize },

    /// A registered hook reported a failure
    #[error("{hook} hook failed: {message}")]
    Hook { hook: HookName, message: String },

    /// A resource handler was configured with an unparsable selector
    #[error("Invalid selector '{0}'")]
    Selector(String),

    /// The diff matcher could not be built from the diff keys
    #[error("Failed to build diff matcher: {0}")]
    Matcher(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for BundleError {
    fn from(error: anyhow::Error) -> Self {
        BundleError::Other(format!("{error:#}"))
    }
}

impl BundleError {
    /// Construct a hook failure for the given extension point
    pub fn hook(hook: HookName, message: impl Into<String>) -> Self {
        BundleError::Hook {
            hook,
            message: message.into(),
        }
    }

    /// Malformed references (`javascript:` links, empty sources, unsupported
    /// schemes) are expected in real pages and are skipped without being
    /// treated as failures.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            BundleError::InvalidUrl { .. } | BundleError::InvalidProtocol { .. }
        )
    }

    /// URL the error refers to, when there is one
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            BundleError::InvalidProtocol { url, .. }
            | BundleError::Request { url, .. }
            | BundleError::Status { url, .. }
            | BundleError::TooLarge { url, .. } => Some(url),
            BundleError::InvalidUrl { reference, .. } => Some(reference),
            _ => None,
        }
    }
}
