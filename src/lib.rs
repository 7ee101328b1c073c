pub mod bundler;
pub mod config;
pub mod diff;
pub mod encoder;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod hooks;
pub mod locator;
pub mod observer;
pub mod resolver;
pub mod utils;

pub use bundler::{Bundle, Bundler};
pub use config::{BundleConfig, BundleConfigBuilder};
pub use diff::Diff;
pub use errors::{BundleError, BundleResult};
pub use fetcher::{
    HttpResponse, Redirects, RequestOptions, ReqwestTransport, ResourceContext, ResourceFetcher,
    SourceDocument, Transport,
};
pub use hooks::{
    DiffHook, Hook, HookName, HookRegistry, RequestHook, ResourceHandler, ResourceReceivedHook,
    ResourceRequestHook,
};
pub use observer::{BundleObserver, LogObserver, ResourceFailure};
pub use resolver::CssResolver;

/// Bundle `url` with the stock handlers and default configuration
///
/// See [`Bundler::standard`] for the hooks involved.
pub async fn bundle(url: &str) -> BundleResult<Bundle> {
    Bundler::standard(BundleConfig::default()).bundle(url).await
}
