//! Recursive stylesheet inlining
//!
//! Stylesheets reference further resources through `url()`: fonts, images and
//! other stylesheets via `@import`. [`CssResolver`] is an
//! `onResourceReceived` hook that fetches each of those through the same
//! fetcher, so nested stylesheets are resolved in turn. Every resource is
//! resolved against the URL its stylesheet was served from, not the page.
//!
//! Termination relies on the bundle's [`VisitedSet`](crate::fetcher::VisitedSet):
//! a stylesheet is claimed before its references are followed, so a
//! stylesheet reached twice is inlined both times but only expanded once.
//! References back to a stylesheet on the current import chain are left as
//! written.

use futures::future::BoxFuture;

use crate::diff::Diff;
use crate::errors::BundleResult;
use crate::fetcher::{ResourceContext, ResourceFetcher};
use crate::hooks::ResourceReceivedHook;
use crate::locator::{ReferenceSet, css_urls};

/// Inline every `url()` reference of fetched stylesheets
#[derive(Debug, Default, Clone, Copy)]
pub struct CssResolver;

impl CssResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ResourceReceivedHook for CssResolver {
    fn received<'a>(
        &'a self,
        fetcher: &'a ResourceFetcher<'_>,
        resource: &'a ResourceContext,
        mut diffs: Diff,
    ) -> BoxFuture<'a, BundleResult<Diff>> {
        Box::pin(async move {
            diffs.extend(bundle_css_recursively(fetcher, resource).await);
            Ok(diffs)
        })
    }
}

/// Diff inlining the `url()` references of one stylesheet
///
/// Returns an empty diff when `resource` is not CSS or when its URL was
/// already visited in this bundle.
pub async fn bundle_css_recursively(fetcher: &ResourceFetcher<'_>, resource: &ResourceContext) -> Diff {
    let Some(content) = resource.text() else {
        return Diff::new();
    };
    if !resource.mime_type().to_ascii_lowercase().contains("css") {
        return Diff::new();
    }
    let resource_url = resource.url();
    if !fetcher.visited().insert(resource_url) {
        log::debug!("Stylesheet {resource_url} already visited");
        return Diff::new();
    }

    let references = nested_references(fetcher, resource, content);
    if references.is_empty() {
        return Diff::new();
    }

    log::debug!("Found {} url() references in {resource_url}", references.len());
    fetcher.fetch_nested(resource, references).await
}

fn nested_references(fetcher: &ResourceFetcher<'_>, resource: &ResourceContext, css: &str) -> ReferenceSet {
    css_urls(css)
        .filter(|reference| match fetcher.resolve(resource.final_url(), reference) {
            Ok(url) if resource.is_on_import_chain(url.as_str()) => {
                log::debug!("Leaving cyclic reference '{reference}' in {}", resource.url());
                false
            }
            _ => true,
        })
        .map(str::to_string)
        .collect()
}
