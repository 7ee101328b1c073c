use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::diff::Diff;
use crate::errors::BundleResult;
use crate::fetcher::{ResourceFetcher, SourceDocument};
use crate::hooks::ResourceHandler;
use crate::locator::TagLocator;

/// Rewrite anchor targets without fetching them
///
/// The replacer receives the document URL and each `href` as written, and
/// returns the new value or `None` to leave the link alone.
pub struct LinkRewriter<F> {
    locator: TagLocator,
    replacer: F,
}

impl<F> LinkRewriter<F>
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    pub fn new(replacer: F) -> Self {
        Self {
            locator: TagLocator::anchors(),
            replacer,
        }
    }

    fn rewrite(&self, document: &SourceDocument) -> Diff {
        self.locator
            .locate_in(document.text())
            .into_iter()
            .filter_map(|href| {
                let replacement = (self.replacer)(document.url(), &href)?;
                (replacement != href).then_some((href, replacement))
            })
            .collect()
    }
}

impl<F> ResourceHandler for LinkRewriter<F>
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn handle<'a>(
        &'a self,
        _fetcher: &'a ResourceFetcher<'_>,
        document: &'a SourceDocument,
    ) -> BoxFuture<'a, BundleResult<Diff>> {
        future::ready(Ok(self.rewrite(document))).boxed()
    }
}
