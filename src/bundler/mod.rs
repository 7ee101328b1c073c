//! Pipeline orchestration
//!
//! [`Bundler::bundle`] runs one request through the extension points in
//! order:
//!
//! 1. `beforeOriginalRequest` hooks shape the request for the page.
//! 2. The page is fetched; a transport failure or non-2xx status is fatal.
//! 3. `onOriginalReceived` handlers run concurrently, each fetching one
//!    category of resource through a shared [`ResourceFetcher`]. Any handler
//!    error is fatal.
//! 4. The partial diffs are merged in registration order, later handlers
//!    winning on identical keys.
//! 5. `onDiffsReceived` hooks rewrite the merged diff.
//! 6. The diff is applied to the page in a single pass.
//!
//! Bundler state is read-only during a request, so one bundler can serve
//! concurrent `bundle` calls. All state scoped to a request lives in its
//! fetcher.

mod types;

pub use types::Bundle;

use futures::future::try_join_all;
use std::sync::Arc;

use crate::config::BundleConfig;
use crate::handlers;
use crate::resolver::CssResolver;
use crate::diff::Diff;
use crate::errors::{BundleError, BundleResult};
use crate::fetcher::{ReqwestTransport, RequestOptions, ResourceFetcher, SourceDocument, Transport};
use crate::hooks::{
    DiffHook, Hook, HookRegistry, RequestHook, ResourceHandler, ResourceReceivedHook,
    ResourceRequestHook,
};
use crate::observer::{BundleObserver, LogObserver};
use crate::utils::parse_document_url;

/// Hook-driven page bundler
pub struct Bundler {
    config: BundleConfig,
    hooks: HookRegistry,
    transport: Arc<dyn Transport>,
    observer: Arc<dyn BundleObserver>,
}

impl Default for Bundler {
    fn default() -> Self {
        Self::new(BundleConfig::default())
    }
}

impl Bundler {
    /// A bundler with no hooks, using reqwest and logging outcomes
    #[must_use]
    pub fn new(config: BundleConfig) -> Self {
        Self {
            config,
            hooks: HookRegistry::new(),
            transport: Arc::new(ReqwestTransport::new()),
            observer: Arc::new(LogObserver),
        }
    }

    /// A bundler with the stock handlers for images, stylesheets, scripts and
    /// inline styles, and recursive stylesheet resolution
    #[must_use]
    pub fn standard(config: BundleConfig) -> Self {
        let mut bundler = Self::new(config);
        bundler
            .on_original_received(handlers::replace_images())
            .on_original_received(handlers::replace_css_files())
            .on_original_received(handlers::replace_js_files())
            .on_original_received(handlers::replace_url_calls())
            .on_resource_received(CssResolver::new());
        bundler
    }

    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn BundleObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Register a hook by name, see [`HookRegistry::on`]
    pub fn on(&mut self, name: &str, hook: Hook) -> &mut Self {
        self.hooks.on(name, hook);
        self
    }

    pub fn register(&mut self, hook: Hook) -> &mut Self {
        self.hooks.register(hook);
        self
    }

    pub fn before_original_request(&mut self, hook: impl RequestHook + 'static) -> &mut Self {
        self.register(Hook::original_request(hook))
    }

    pub fn on_original_received(&mut self, handler: impl ResourceHandler + 'static) -> &mut Self {
        self.register(Hook::original_received(handler))
    }

    pub fn before_resource_request(&mut self, hook: impl ResourceRequestHook + 'static) -> &mut Self {
        self.register(Hook::resource_request(hook))
    }

    pub fn on_resource_received(&mut self, hook: impl ResourceReceivedHook + 'static) -> &mut Self {
        self.register(Hook::resource_received(hook))
    }

    pub fn on_diffs_received(&mut self, hook: impl DiffHook + 'static) -> &mut Self {
        self.register(Hook::diffs_received(hook))
    }

    /// Bundle the page at `url` into a single self-contained document
    ///
    /// Resources that cannot be fetched are left as written and reported in
    /// [`Bundle::failures`].
    ///
    /// # Errors
    ///
    /// - [`BundleError::MissingUrl`] or [`BundleError::InvalidProtocol`] for an unusable `url`
    /// - Transport errors or [`BundleError::Status`] for the page itself
    /// - Any error returned by a request hook, handler or diff hook
    pub async fn bundle(&self, url: &str) -> BundleResult<Bundle> {
        let target = parse_document_url(url)?;
        log::info!("Bundling {target}");

        let mut options = RequestOptions::for_document(target.as_str(), &self.config);
        for hook in self.hooks.original_request_hooks() {
            options = hook.prepare(options).await?;
        }

        let response = self.transport.send(&options).await?;
        if !response.is_success() {
            return Err(BundleError::Status {
                url: response.url,
                status: response.status,
            });
        }

        let source = SourceDocument::from_response(target.as_str(), response);
        log::debug!(
            "Received {} bytes from {} (base {})",
            source.text().len(),
            source.final_url(),
            source.base_url()
        );

        let fetcher = ResourceFetcher::new(
            &self.hooks,
            &self.config,
            self.transport.as_ref(),
            self.observer.as_ref(),
            &source,
        );

        let partials = try_join_all(
            self.hooks
                .resource_handlers()
                .iter()
                .map(|handler| handler.handle(&fetcher, &source)),
        )
        .await?;
        let mut diffs = Diff::merge(partials);

        for hook in self.hooks.diff_hooks() {
            diffs = hook.process(diffs).await?;
        }
        log::info!("Applying {} diffs to {}", diffs.len(), source.final_url());

        let html = diffs.apply(source.text())?;
        let (inlined, failures) = fetcher.finish();

        let bundle = Bundle {
            url: source.final_url().to_string(),
            html,
            replacements: diffs.len(),
            inlined,
            failures,
        };
        if bundle.has_failures() {
            log::warn!(
                "Bundled {} with {} of {} resources failing",
                bundle.url,
                bundle.failures.len(),
                bundle.total()
            );
        }
        Ok(bundle)
    }
}
