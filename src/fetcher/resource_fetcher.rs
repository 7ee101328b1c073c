//! Per-bundle resource fetching.

use futures::future::{BoxFuture, join_all};
use parking_lot::Mutex;
use std::collections::HashSet;
use url::Url;

use super::documents::{ResourceContext, SourceDocument};
use super::options::RequestOptions;
use super::transport::Transport;
use super::visited::VisitedSet;
use crate::config::BundleConfig;
use crate::diff::Diff;
use crate::errors::{BundleError, BundleResult};
use crate::hooks::HookRegistry;
use crate::observer::{BundleObserver, ResourceFailure};
use crate::utils::{is_fetchable_reference, resolve_url};

#[derive(Debug, Default)]
struct FetchOutcome {
    inlined: usize,
    failures: Vec<ResourceFailure>,
}

/// Fetches and encodes resources for one bundle request
///
/// Created by the bundler once the original document has been received, and
/// handed to every resource handler and received hook. It owns the state that
/// is scoped to a single bundle: the visited set used for cycle detection and
/// the tally of inlined and failed resources.
pub struct ResourceFetcher<'s> {
    hooks: &'s HookRegistry,
    config: &'s BundleConfig,
    transport: &'s dyn Transport,
    observer: &'s dyn BundleObserver,
    origin: &'s SourceDocument,
    visited: VisitedSet,
    outcome: Mutex<FetchOutcome>,
}

impl<'s> ResourceFetcher<'s> {
    pub fn new(
        hooks: &'s HookRegistry,
        config: &'s BundleConfig,
        transport: &'s dyn Transport,
        observer: &'s dyn BundleObserver,
        origin: &'s SourceDocument,
    ) -> Self {
        Self {
            hooks,
            config,
            transport,
            observer,
            origin,
            visited: VisitedSet::new(),
            outcome: Mutex::new(FetchOutcome::default()),
        }
    }

    /// The original document of this bundle
    pub fn origin(&self) -> &SourceDocument {
        self.origin
    }

    pub fn config(&self) -> &BundleConfig {
        self.config
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Resolve `reference` against `base_url`
    pub fn resolve(&self, base_url: &str, reference: &str) -> BundleResult<Url> {
        resolve_url(base_url, reference)
    }

    /// Fetch one resource through the resource hooks
    ///
    /// Resolves the reference, runs the `beforeResourceRequest` chain, sends
    /// the request and, for textual resources, runs the `onResourceReceived`
    /// chain and applies its diff to the body.
    ///
    /// # Errors
    ///
    /// Resolution failures, transport failures, non-2xx statuses and hook
    /// failures. Callers inside the pipeline go through
    /// [`ResourceFetcher::fetch_diff`], which absorbs them.
    pub fn fetch<'a>(
        &'a self,
        base_url: &'a str,
        reference: &'a str,
    ) -> BoxFuture<'a, BundleResult<ResourceContext>> {
        self.fetch_in(&[], base_url, reference)
    }

    fn fetch_in<'a>(
        &'a self,
        chain: &'a [String],
        base_url: &'a str,
        reference: &'a str,
    ) -> BoxFuture<'a, BundleResult<ResourceContext>> {
        Box::pin(async move {
            let url = self.resolve(base_url, reference)?;

            let mut options = RequestOptions::for_resource(url.as_str(), self.config);
            for hook in self.hooks.resource_request_hooks() {
                options = hook.prepare(options, self.origin).await?;
            }

            log::debug!("Fetching {url} as {}", options.url());
            let response = self.transport.send(&options).await?;
            if !response.is_success() {
                return Err(BundleError::Status {
                    url: response.url,
                    status: response.status,
                });
            }

            let mut resource = ResourceContext::new(reference, base_url, url.as_str(), response)
                .with_import_chain(chain.to_vec());
            self.run_received_hooks(&mut resource).await?;
            Ok(resource)
        })
    }

    async fn run_received_hooks(&self, resource: &mut ResourceContext) -> BundleResult<()> {
        let hooks = self.hooks.resource_received_hooks();
        if hooks.is_empty() || !resource.is_textual() {
            return Ok(());
        }

        let mut diffs = Diff::new();
        for hook in hooks {
            diffs = hook.received(self, &*resource, diffs).await?;
        }
        if diffs.is_empty() {
            return Ok(());
        }

        let rewritten = match resource.text() {
            Some(text) => diffs.apply(text)?,
            None => return Ok(()),
        };
        resource.set_body(rewritten.into_bytes());
        Ok(())
    }

    /// Fetch one resource and return the diff that inlines it
    ///
    /// Never fails: `data:` and blank references yield an empty diff, as do
    /// malformed references (reported as skipped) and fetch failures (reported
    /// and recorded as failures).
    pub fn fetch_diff<'a>(&'a self, base_url: &'a str, reference: &'a str) -> BoxFuture<'a, Diff> {
        self.fetch_diff_in(&[], base_url, reference)
    }

    fn fetch_diff_in<'a>(
        &'a self,
        chain: &'a [String],
        base_url: &'a str,
        reference: &'a str,
    ) -> BoxFuture<'a, Diff> {
        Box::pin(async move {
            if !is_fetchable_reference(reference) {
                return Diff::new();
            }

            match self.fetch_in(chain, base_url, reference).await {
                Ok(resource) => {
                    let data_uri = resource.to_data_uri();
                    self.observer.resource_inlined(&resource);
                    self.outcome.lock().inlined += 1;
                    Diff::single(reference, data_uri)
                }
                Err(error) if error.is_skippable() => {
                    self.observer.resource_skipped(reference, &error);
                    Diff::new()
                }
                Err(error) => {
                    let failure = ResourceFailure {
                        reference: reference.to_string(),
                        base_url: base_url.to_string(),
                        error,
                    };
                    self.observer.resource_failed(&failure);
                    self.outcome.lock().failures.push(failure);
                    Diff::new()
                }
            }
        })
    }

    /// Fetch every reference concurrently and merge the resulting diffs
    ///
    /// Duplicate references are fetched once. A failing reference contributes
    /// nothing and does not affect the others.
    pub fn fetch_all<'a>(&'a self, base_url: &'a str, references: Vec<String>) -> BoxFuture<'a, Diff> {
        self.fetch_all_in(&[], base_url, references)
    }

    /// Fetch the references found inside `resource` and merge the resulting diffs
    ///
    /// References resolve against the URL the resource was served from, and
    /// the fetched resources carry `resource` on their import chain.
    pub fn fetch_nested<'a>(
        &'a self,
        resource: &'a ResourceContext,
        references: Vec<String>,
    ) -> BoxFuture<'a, Diff> {
        Box::pin(async move {
            let chain = resource.nested_chain();
            self.fetch_all_in(&chain, resource.final_url(), references).await
        })
    }

    fn fetch_all_in<'a>(
        &'a self,
        chain: &'a [String],
        base_url: &'a str,
        references: Vec<String>,
    ) -> BoxFuture<'a, Diff> {
        Box::pin(async move {
            let mut seen = HashSet::new();
            let unique: Vec<String> = references
                .into_iter()
                .filter(|reference| seen.insert(reference.clone()))
                .collect();

            let partials = join_all(
                unique
                    .iter()
                    .map(|reference| self.fetch_diff_in(chain, base_url, reference)),
            )
            .await;

            Diff::merge(partials)
        })
    }

    /// Number of resources inlined so far, and the failures recorded
    pub(crate) fn finish(self) -> (usize, Vec<ResourceFailure>) {
        let outcome = self.outcome.into_inner();
        (outcome.inlined, outcome.failures)
    }
}
