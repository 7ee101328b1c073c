use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::diff::Diff;
use crate::errors::BundleResult;
use crate::fetcher::{ResourceFetcher, SourceDocument};
use crate::hooks::ResourceHandler;

/// A handler that only runs when `predicate` accepts the document
pub struct Predicated<P> {
    predicate: P,
    handler: Box<dyn ResourceHandler>,
}

impl<P> Predicated<P>
where
    P: Fn(&SourceDocument) -> bool + Send + Sync,
{
    pub fn new(predicate: P, handler: impl ResourceHandler + 'static) -> Self {
        Self {
            predicate,
            handler: Box::new(handler),
        }
    }
}

impl<P> ResourceHandler for Predicated<P>
where
    P: Fn(&SourceDocument) -> bool + Send + Sync,
{
    fn handle<'a>(
        &'a self,
        fetcher: &'a ResourceFetcher<'_>,
        document: &'a SourceDocument,
    ) -> BoxFuture<'a, BundleResult<Diff>> {
        if (self.predicate)(document) {
            self.handler.handle(fetcher, document)
        } else {
            log::debug!("Handler skipped for {}", document.url());
            future::ready(Ok(Diff::new())).boxed()
        }
    }
}
