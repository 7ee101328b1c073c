//! Stock `onOriginalReceived` handlers
//!
//! Each handler covers one category of reference in the original document
//! and returns the partial diff for it.

mod links;
mod predicated;
mod styles;
mod tags;

pub use links::LinkRewriter;
pub use predicated::Predicated;
pub use styles::InlineStyleUrls;
pub use tags::TagResources;

use crate::fetcher::SourceDocument;

/// Inline `<img src>` references
#[must_use]
pub fn replace_images() -> TagResources {
    TagResources::images()
}

/// Inline `<link rel="stylesheet" href>` references
#[must_use]
pub fn replace_css_files() -> TagResources {
    TagResources::stylesheets()
}

/// Inline `<script src>` references
#[must_use]
pub fn replace_js_files() -> TagResources {
    TagResources::scripts()
}

/// Inline `url()` references in `style` attributes and `<style>` elements
#[must_use]
pub fn replace_url_calls() -> InlineStyleUrls {
    InlineStyleUrls::new()
}

/// Rewrite `<a href>` values with `replacer(document_url, href)`
pub fn replace_links<F>(replacer: F) -> LinkRewriter<F>
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    LinkRewriter::new(replacer)
}

/// Run `handler` only for documents matching `predicate`
pub fn predicated<P>(predicate: P, handler: impl crate::hooks::ResourceHandler + 'static) -> Predicated<P>
where
    P: Fn(&SourceDocument) -> bool + Send + Sync,
{
    Predicated::new(predicate, handler)
}
