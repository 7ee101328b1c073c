//! Per-resource outcome reporting.

use crate::errors::BundleError;
use crate::fetcher::ResourceContext;

/// A resource that could not be inlined
#[derive(Debug, Clone)]
pub struct ResourceFailure {
    /// The reference as written in its containing document
    pub reference: String,
    /// URL of the containing document
    pub base_url: String,
    pub error: BundleError,
}

/// Receives the outcome of every resource fetch
///
/// Called from concurrent fetch branches, so implementations must be
/// thread-safe. Every method defaults to doing nothing.
pub trait BundleObserver: Send + Sync {
    fn resource_inlined(&self, _resource: &ResourceContext) {}

    /// A malformed or unsupported reference was left untouched
    fn resource_skipped(&self, _reference: &str, _reason: &BundleError) {}

    fn resource_failed(&self, _failure: &ResourceFailure) {}
}

/// Reports outcomes through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl BundleObserver for LogObserver {
    fn resource_inlined(&self, resource: &ResourceContext) {
        log::debug!(
            "Inlined {} ({} bytes, {})",
            resource.url(),
            resource.body().len(),
            resource.mime_type()
        );
    }

    fn resource_skipped(&self, reference: &str, reason: &BundleError) {
        log::debug!("Skipping reference '{reference}': {reason}");
    }

    fn resource_failed(&self, failure: &ResourceFailure) {
        log::warn!(
            "Failed to inline '{}' from {}: {}",
            failure.reference,
            failure.base_url,
            failure.error
        );
    }
}
