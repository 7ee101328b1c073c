//! Core configuration types for bundling

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::builder::BundleConfigBuilder;
use crate::utils::{
    DEFAULT_DOCUMENT_TIMEOUT_SECS, DEFAULT_MAX_DOCUMENT_SIZE, DEFAULT_MAX_REDIRECTS,
    DEFAULT_MAX_RESOURCE_SIZE, DEFAULT_RESOURCE_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Settings that seed the request options of every bundle request
///
/// Hooks registered on the bundler can still rewrite each request; these
/// values only provide the starting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Timeout in seconds for fetching the original document
    pub(crate) document_timeout_secs: u64,

    /// Timeout in seconds for fetching each resource
    pub(crate) resource_timeout_secs: u64,

    /// Maximum size of the original document (bytes)
    pub(crate) max_document_size: usize,

    /// Maximum size of a single resource (bytes)
    ///
    /// Resources over the limit fail locally and keep their original reference.
    pub(crate) max_resource_size: usize,

    /// Number of redirects to follow; 0 disables redirect following
    pub(crate) max_redirects: usize,

    /// Accept invalid TLS certificates
    ///
    /// Useful when bundling through intercepting proxies. Default: false
    pub(crate) accept_invalid_certs: bool,

    /// `User-Agent` header sent with every request
    pub(crate) user_agent: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            document_timeout_secs: DEFAULT_DOCUMENT_TIMEOUT_SECS,
            resource_timeout_secs: DEFAULT_RESOURCE_TIMEOUT_SECS,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_resource_size: DEFAULT_MAX_RESOURCE_SIZE,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            accept_invalid_certs: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl BundleConfig {
    /// Start building a configuration from the defaults
    #[must_use]
    pub fn builder() -> BundleConfigBuilder {
        BundleConfigBuilder::default()
    }

    #[must_use]
    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_secs)
    }

    #[must_use]
    pub fn resource_timeout(&self) -> Duration {
        Duration::from_secs(self.resource_timeout_secs)
    }

    #[must_use]
    pub fn max_document_size(&self) -> usize {
        self.max_document_size
    }

    #[must_use]
    pub fn max_resource_size(&self) -> usize {
        self.max_resource_size
    }

    #[must_use]
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    #[must_use]
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
