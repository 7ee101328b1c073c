//! Stock request hooks
//!
//! Every hook here is a pure transformation of [`RequestOptions`] and can be
//! registered at either request extension point.

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::traits::{RequestHook, ResourceRequestHook};
use crate::errors::BundleResult;
use crate::fetcher::{Redirects, RequestOptions, SourceDocument};

/// Implement both request hook traits in terms of `fn transform(&self, RequestOptions)`
macro_rules! options_hook {
    ($ty:ty) => {
        impl RequestHook for $ty {
            fn prepare(&self, options: RequestOptions) -> BoxFuture<'_, BundleResult<RequestOptions>> {
                future::ready(Ok(self.transform(options))).boxed()
            }
        }

        impl ResourceRequestHook for $ty {
            fn prepare<'a>(
                &'a self,
                options: RequestOptions,
                _origin: &'a SourceDocument,
            ) -> BoxFuture<'a, BundleResult<RequestOptions>> {
                future::ready(Ok(self.transform(options))).boxed()
            }
        }
    };
}

/// Send the named headers with empty values
///
/// Overrides defaults such as `User-Agent` that a plain removal would let
/// the HTTP client fill back in.
#[derive(Debug, Clone, Default)]
pub struct StripHeaders {
    names: Vec<String>,
}

impl StripHeaders {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    fn transform(&self, options: RequestOptions) -> RequestOptions {
        self.names
            .iter()
            .fold(options, |options, name| options.with_header(name.as_str(), ""))
    }
}

options_hook!(StripHeaders);

/// Set headers, replacing any existing values
#[derive(Debug, Clone, Default)]
pub struct SpoofHeaders {
    headers: Vec<(String, String)>,
}

impl SpoofHeaders {
    pub fn new<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    fn transform(&self, options: RequestOptions) -> RequestOptions {
        self.headers.iter().fold(options, |options, (name, value)| {
            options.with_header(name.as_str(), value.as_str())
        })
    }
}

options_hook!(SpoofHeaders);

/// Route requests through an HTTP proxy
#[derive(Debug, Clone)]
pub struct ProxyTo {
    proxy: String,
}

impl ProxyTo {
    pub fn new(proxy: impl Into<String>) -> Self {
        Self {
            proxy: proxy.into(),
        }
    }

    fn transform(&self, options: RequestOptions) -> RequestOptions {
        options.with_proxy(self.proxy.as_str())
    }
}

options_hook!(ProxyTo);

/// Override the redirect policy
#[derive(Debug, Clone, Copy)]
pub struct RedirectPolicy {
    redirects: Redirects,
}

impl RedirectPolicy {
    /// Follow at most `max` redirects, `0` disables following
    #[must_use]
    pub fn limited(max: usize) -> Self {
        Self {
            redirects: Redirects::limited(max),
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self {
            redirects: Redirects::Stop,
        }
    }

    fn transform(&self, options: RequestOptions) -> RequestOptions {
        options.with_redirects(self.redirects)
    }
}

options_hook!(RedirectPolicy);
