//! Resource discovery inside documents
//!
//! Two kinds of scans produce reference strings: tag/attribute selection over
//! parsed HTML ([`TagLocator`]) and a best-effort `url()` scan over raw CSS
//! text ([`CssUrls`]). Neither mutates its input and both re-scan from
//! scratch on every invocation.

pub mod css_urls;
pub mod tags;

pub use css_urls::{CssUrls, css_urls};
pub use tags::{TagLocator, base_href, style_element_bodies};

/// Ordered reference strings discovered by one locator invocation
///
/// Not deduplicated: the diff engine keys on the literal string anyway.
pub type ReferenceSet = Vec<String>;

/// A kind of reference discovery
#[derive(Debug, Clone)]
pub enum Locator {
    /// Attribute values of elements matching a selector
    Tag(TagLocator),
    /// `url(...)` references in CSS text
    CssUrl,
}

impl Locator {
    /// Run this locator over a document or stylesheet body
    #[must_use]
    pub fn locate(&self, text: &str) -> ReferenceSet {
        match self {
            Locator::Tag(locator) => locator.locate_in(text),
            Locator::CssUrl => css_urls(text).map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_dispatches_by_kind() {
        let html = r#"<img src="a.png"><div style="background:url(b.png)"></div>"#;

        let tags = Locator::Tag(TagLocator::images()).locate(html);
        let css = Locator::CssUrl.locate(html);

        assert_eq!(tags, vec!["a.png".to_string()]);
        assert_eq!(css, vec!["b.png".to_string()]);
    }
}
