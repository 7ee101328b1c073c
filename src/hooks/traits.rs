//! Capability traits, one per hook kind.

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::diff::Diff;
use crate::errors::BundleResult;
use crate::fetcher::{RequestOptions, ResourceContext, ResourceFetcher, SourceDocument};

/// `beforeOriginalRequest`: transform the options of the original request
///
/// Implemented for any `Fn(RequestOptions) -> BundleResult<RequestOptions>`.
pub trait RequestHook: Send + Sync {
    fn prepare(&self, options: RequestOptions) -> BoxFuture<'_, BundleResult<RequestOptions>>;
}

impl<F> RequestHook for F
where
    F: Fn(RequestOptions) -> BundleResult<RequestOptions> + Send + Sync,
{
    fn prepare(&self, options: RequestOptions) -> BoxFuture<'_, BundleResult<RequestOptions>> {
        future::ready(self(options)).boxed()
    }
}

/// `onOriginalReceived`: discover and fetch one category of resource
///
/// Handlers run concurrently with each other and each returns a partial diff
/// for the original document. An `Err` aborts the whole bundle, so handlers
/// should only fail for reasons that make their category meaningless;
/// individual fetch failures are absorbed by [`ResourceFetcher::fetch_all`].
pub trait ResourceHandler: Send + Sync {
    fn handle<'a>(
        &'a self,
        fetcher: &'a ResourceFetcher<'_>,
        document: &'a SourceDocument,
    ) -> BoxFuture<'a, BundleResult<Diff>>;
}

/// `beforeResourceRequest`: transform the options of one resource request
///
/// Receives the original document so hooks can derive headers such as
/// `Referer` from it. Implemented for any
/// `Fn(RequestOptions, &SourceDocument) -> BundleResult<RequestOptions>`.
pub trait ResourceRequestHook: Send + Sync {
    fn prepare<'a>(
        &'a self,
        options: RequestOptions,
        origin: &'a SourceDocument,
    ) -> BoxFuture<'a, BundleResult<RequestOptions>>;
}

impl<F> ResourceRequestHook for F
where
    F: Fn(RequestOptions, &SourceDocument) -> BundleResult<RequestOptions> + Send + Sync,
{
    fn prepare<'a>(
        &'a self,
        options: RequestOptions,
        origin: &'a SourceDocument,
    ) -> BoxFuture<'a, BundleResult<RequestOptions>> {
        future::ready(self(options, origin)).boxed()
    }
}

/// `onResourceReceived`: inspect a fetched textual resource
///
/// Hooks are chained: each receives the diff accumulated so far for this
/// resource and returns it, possibly extended. The final diff is applied to
/// the resource body before it is encoded.
pub trait ResourceReceivedHook: Send + Sync {
    fn received<'a>(
        &'a self,
        fetcher: &'a ResourceFetcher<'_>,
        resource: &'a ResourceContext,
        diffs: Diff,
    ) -> BoxFuture<'a, BundleResult<Diff>>;
}

/// `onDiffsReceived`: inspect or rewrite the merged diff before substitution
///
/// Implemented for any `Fn(Diff) -> BundleResult<Diff>`.
pub trait DiffHook: Send + Sync {
    fn process(&self, diffs: Diff) -> BoxFuture<'_, BundleResult<Diff>>;
}

impl<F> DiffHook for F
where
    F: Fn(Diff) -> BundleResult<Diff> + Send + Sync,
{
    fn process(&self, diffs: Diff) -> BoxFuture<'_, BundleResult<Diff>> {
        future::ready(self(diffs)).boxed()
    }
}
