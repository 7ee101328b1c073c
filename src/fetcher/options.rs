//! Immutable request descriptions passed through request hooks.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::BundleConfig;
use crate::utils::constants::{DOCUMENT_ACCEPT, RESOURCE_ACCEPT};

/// Redirect handling for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Redirects {
    /// Follow up to this many redirects
    Follow(usize),
    /// Return the redirect response itself
    Stop,
}

impl Redirects {
    /// `0` means do not follow redirects
    #[must_use]
    pub fn limited(max: usize) -> Self {
        if max == 0 {
            Redirects::Stop
        } else {
            Redirects::Follow(max)
        }
    }
}

/// Everything a transport needs to perform one GET request
///
/// Hooks transform options by value: every `with_*` method consumes the
/// options and returns a modified copy. Header names are matched
/// case-insensitively; setting a header replaces any existing spelling of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    url: String,
    headers: BTreeMap<String, String>,
    proxy: Option<String>,
    redirects: Redirects,
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
    max_body_size: Option<usize>,
}

impl RequestOptions {
    /// Bare options: no headers, no timeout, no size limit
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            proxy: None,
            redirects: Redirects::Follow(crate::utils::constants::DEFAULT_MAX_REDIRECTS),
            accept_invalid_certs: false,
            timeout: None,
            max_body_size: None,
        }
    }

    /// Defaults for fetching the original document
    pub fn for_document(url: impl Into<String>, config: &BundleConfig) -> Self {
        Self::from_config(url, config)
            .with_header("Accept", DOCUMENT_ACCEPT)
            .with_timeout(config.document_timeout())
            .with_max_body_size(config.max_document_size())
    }

    /// Defaults for fetching a referenced resource
    pub fn for_resource(url: impl Into<String>, config: &BundleConfig) -> Self {
        Self::from_config(url, config)
            .with_header("Accept", RESOURCE_ACCEPT)
            .with_timeout(config.resource_timeout())
            .with_max_body_size(config.max_resource_size())
    }

    fn from_config(url: impl Into<String>, config: &BundleConfig) -> Self {
        Self::new(url)
            .with_header("User-Agent", config.user_agent())
            .with_redirects(Redirects::limited(config.max_redirects()))
            .with_accept_invalid_certs(config.accept_invalid_certs())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Value of a header, looked up case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn redirects(&self) -> Redirects {
        self.redirects
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn max_body_size(&self) -> Option<usize> {
        self.max_body_size
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    #[must_use]
    pub fn without_header(mut self, name: &str) -> Self {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    #[must_use]
    pub fn without_proxy(mut self) -> Self {
        self.proxy = None;
        self
    }

    #[must_use]
    pub fn with_redirects(mut self, redirects: Redirects) -> Self {
        self.redirects = redirects;
        self
    }

    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = Some(limit);
        self
    }
}
