//! Stock `onDiffsReceived` hooks.

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::traits::DiffHook;
use crate::diff::Diff;
use crate::errors::BundleResult;

/// Drop diff entries rejected by `predicate(reference, replacement)`
pub struct FilterDiffs<P> {
    predicate: P,
}

impl<P> FilterDiffs<P>
where
    P: Fn(&str, &str) -> bool + Send + Sync,
{
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

impl<P> DiffHook for FilterDiffs<P>
where
    P: Fn(&str, &str) -> bool + Send + Sync,
{
    fn process(&self, mut diffs: Diff) -> BoxFuture<'_, BundleResult<Diff>> {
        let before = diffs.len();
        diffs.retain(|reference, replacement| (self.predicate)(reference, replacement));
        log::debug!("Filtered {} of {before} diffs", before - diffs.len());
        future::ready(Ok(diffs)).boxed()
    }
}

/// Keep only the diff entries accepted by `predicate(reference, replacement)`
pub fn filter_diffs<P>(predicate: P) -> FilterDiffs<P>
where
    P: Fn(&str, &str) -> bool + Send + Sync,
{
    FilterDiffs::new(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_removes_rejected_entries() {
        let diffs: Diff = [
            ("a.png", "data:image/png;base64,AA=="),
            ("huge.png", "data:image/png;base64,AAAAAAAAAAAA"),
        ]
        .into_iter()
        .collect();

        let hook = filter_diffs(|_reference: &str, replacement: &str| replacement.len() < 30);
        let filtered = futures::executor::block_on(hook.process(diffs)).expect("filter is infallible");

        assert!(filtered.contains("a.png"));
        assert!(!filtered.contains("huge.png"));
    }
}
