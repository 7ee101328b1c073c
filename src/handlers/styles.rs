use futures::future::BoxFuture;
use scraper::Html;

use crate::diff::Diff;
use crate::errors::BundleResult;
use crate::fetcher::{ResourceFetcher, SourceDocument};
use crate::hooks::ResourceHandler;
use crate::locator::{ReferenceSet, TagLocator, css_urls, style_element_bodies};

/// Inline `url()` references written directly in the page
///
/// Covers `style` attributes and the bodies of `<style>` elements. References
/// are resolved against the document base.
#[derive(Debug, Clone)]
pub struct InlineStyleUrls {
    attributes: TagLocator,
}

impl Default for InlineStyleUrls {
    fn default() -> Self {
        Self {
            attributes: TagLocator::style_attributes(),
        }
    }
}

impl InlineStyleUrls {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn references(&self, html: &str) -> ReferenceSet {
        let document = Html::parse_document(html);
        let mut references: ReferenceSet = self
            .attributes
            .locate(&document)
            .flat_map(css_urls)
            .map(str::to_string)
            .collect();

        for body in style_element_bodies(&document) {
            references.extend(css_urls(&body).map(str::to_string));
        }
        references
    }
}

impl ResourceHandler for InlineStyleUrls {
    fn handle<'a>(
        &'a self,
        fetcher: &'a ResourceFetcher<'_>,
        document: &'a SourceDocument,
    ) -> BoxFuture<'a, BundleResult<Diff>> {
        Box::pin(async move {
            // Html is not Send, keep it out of the await below
            let references = self.references(document.text());
            log::info!(
                "Found {} inline url() references in {}",
                references.len(),
                document.url()
            );
            Ok(fetcher.fetch_all(document.base_url(), references).await)
        })
    }
}
