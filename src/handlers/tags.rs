use futures::future::BoxFuture;

use crate::diff::Diff;
use crate::errors::BundleResult;
use crate::fetcher::{ResourceFetcher, SourceDocument};
use crate::hooks::ResourceHandler;
use crate::locator::TagLocator;

/// Fetch and inline every attribute value matched by a [`TagLocator`]
#[derive(Debug, Clone)]
pub struct TagResources {
    locator: TagLocator,
}

impl TagResources {
    /// Handler for an arbitrary selector and attribute
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Selector`](crate::BundleError::Selector) if the
    /// selector does not parse.
    pub fn new(selector: &str, attribute: &str) -> BundleResult<Self> {
        Ok(Self::from_locator(TagLocator::new(selector, attribute)?))
    }

    #[must_use]
    pub fn from_locator(locator: TagLocator) -> Self {
        Self { locator }
    }

    #[must_use]
    pub fn images() -> Self {
        Self::from_locator(TagLocator::images())
    }

    #[must_use]
    pub fn stylesheets() -> Self {
        Self::from_locator(TagLocator::stylesheets())
    }

    #[must_use]
    pub fn scripts() -> Self {
        Self::from_locator(TagLocator::scripts())
    }

    pub fn locator(&self) -> &TagLocator {
        &self.locator
    }
}

impl ResourceHandler for TagResources {
    fn handle<'a>(
        &'a self,
        fetcher: &'a ResourceFetcher<'_>,
        document: &'a SourceDocument,
    ) -> BoxFuture<'a, BundleResult<Diff>> {
        Box::pin(async move {
            let references = self.locator.locate_in(document.text());
            log::info!(
                "Found {} {}[{}] references in {}",
                references.len(),
                self.locator.selector(),
                self.locator.attribute(),
                document.url()
            );
            Ok(fetcher.fetch_all(document.base_url(), references).await)
        })
    }
}
