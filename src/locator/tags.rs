//! Tag-based resource discovery.

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use super::ReferenceSet;
use crate::errors::{BundleError, BundleResult};

lazy_static! {
    // These selectors are hardcoded and syntactically valid CSS selectors.
    // If they fail to parse, it indicates a compile-time bug in the selector strings.
    static ref IMG_SELECTOR: Selector =
        Selector::parse("img")
            .expect("BUG: hardcoded CSS selector 'img' is invalid - this is a compile-time bug");

    static ref STYLESHEET_SELECTOR: Selector =
        Selector::parse("link[rel=\"stylesheet\"]")
            .expect("BUG: hardcoded CSS selector 'link[rel=\"stylesheet\"]' is invalid - this is a compile-time bug");

    static ref SCRIPT_SELECTOR: Selector =
        Selector::parse("script")
            .expect("BUG: hardcoded CSS selector 'script' is invalid - this is a compile-time bug");

    static ref ANCHOR_SELECTOR: Selector =
        Selector::parse("a")
            .expect("BUG: hardcoded CSS selector 'a' is invalid - this is a compile-time bug");

    static ref STYLE_ATTR_SELECTOR: Selector =
        Selector::parse("[style]")
            .expect("BUG: hardcoded CSS selector '[style]' is invalid - this is a compile-time bug");

    static ref STYLE_ELEMENT_SELECTOR: Selector =
        Selector::parse("style")
            .expect("BUG: hardcoded CSS selector 'style' is invalid - this is a compile-time bug");

    static ref BASE_SELECTOR: Selector =
        Selector::parse("base[href]")
            .expect("BUG: hardcoded CSS selector 'base[href]' is invalid - this is a compile-time bug");
}

/// Finds the values of one attribute on elements matching a selector
///
/// Elements without the attribute, or with a blank value, are skipped.
#[derive(Debug, Clone)]
pub struct TagLocator {
    selector: Selector,
    selector_source: String,
    attribute: String,
}

impl TagLocator {
    /// Build a locator from a CSS selector and the attribute to read
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Selector`] if `selector` does not parse.
    pub fn new(selector: &str, attribute: impl Into<String>) -> BundleResult<Self> {
        let parsed =
            Selector::parse(selector).map_err(|e| BundleError::Selector(format!("{selector}: {e}")))?;
        Ok(Self::from_selector(parsed, selector, attribute))
    }

    fn from_selector(selector: Selector, source: &str, attribute: impl Into<String>) -> Self {
        Self {
            selector,
            selector_source: source.to_string(),
            attribute: attribute.into(),
        }
    }

    /// `src` of every `<img>`
    #[must_use]
    pub fn images() -> Self {
        Self::from_selector(IMG_SELECTOR.clone(), "img", "src")
    }

    /// `href` of every `<link rel="stylesheet">`
    #[must_use]
    pub fn stylesheets() -> Self {
        Self::from_selector(STYLESHEET_SELECTOR.clone(), "link[rel=\"stylesheet\"]", "href")
    }

    /// `src` of every `<script>`
    #[must_use]
    pub fn scripts() -> Self {
        Self::from_selector(SCRIPT_SELECTOR.clone(), "script", "src")
    }

    /// `href` of every `<a>`
    #[must_use]
    pub fn anchors() -> Self {
        Self::from_selector(ANCHOR_SELECTOR.clone(), "a", "href")
    }

    /// `style` attribute of every element carrying one
    #[must_use]
    pub fn style_attributes() -> Self {
        Self::from_selector(STYLE_ATTR_SELECTOR.clone(), "[style]", "style")
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector_source
    }

    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Lazily yield matching attribute values from a parsed document
    pub fn locate<'d>(&'d self, document: &'d Html) -> impl Iterator<Item = &'d str> + 'd {
        document
            .select(&self.selector)
            .filter_map(move |element| element.value().attr(&self.attribute))
            .filter(|value| !value.trim().is_empty())
    }

    /// Parse `html` and collect every matching attribute value
    #[must_use]
    pub fn locate_in(&self, html: &str) -> ReferenceSet {
        let document = Html::parse_document(html);
        self.locate(&document).map(str::to_string).collect()
    }
}

/// Text bodies of every `<style>` element
#[must_use]
pub fn style_element_bodies(document: &Html) -> Vec<String> {
    document
        .select(&STYLE_ELEMENT_SELECTOR)
        .map(|element| element.text().collect::<String>())
        .filter(|body| !body.trim().is_empty())
        .collect()
}

/// `href` of the document's first non-empty `<base>` element
#[must_use]
pub fn base_href(document: &Html) -> Option<String> {
    document
        .select(&BASE_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <link rel="stylesheet" href="/css/site.css">
    <link rel="icon" href="/favicon.ico">
    <script src="app.js"></script>
    <script>console.log("inline");</script>
    <style>body { background: url(bg.png); }</style>
</head>
<body>
    <img src="a.png">
    <img alt="no source">
    <img src="">
    <a href="/about">About</a>
</body>
</html>"#;

    #[test]
    fn test_images_skip_missing_and_empty_sources() {
        assert_eq!(TagLocator::images().locate_in(PAGE), vec!["a.png".to_string()]);
    }

    #[test]
    fn test_stylesheets_ignore_other_links() {
        assert_eq!(
            TagLocator::stylesheets().locate_in(PAGE),
            vec!["/css/site.css".to_string()]
        );
    }

    #[test]
    fn test_scripts_skip_inline_scripts() {
        assert_eq!(TagLocator::scripts().locate_in(PAGE), vec!["app.js".to_string()]);
    }

    #[test]
    fn test_custom_selector() {
        let locator = TagLocator::new("link[rel=\"icon\"]", "href").unwrap();

        assert_eq!(locator.locate_in(PAGE), vec!["/favicon.ico".to_string()]);
        assert_eq!(locator.selector(), "link[rel=\"icon\"]");
        assert_eq!(locator.attribute(), "href");
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        assert!(matches!(
            TagLocator::new("img[", "src"),
            Err(BundleError::Selector(_))
        ));
    }

    #[test]
    fn test_locate_is_restartable() {
        let locator = TagLocator::images();
        let document = Html::parse_document(PAGE);

        let first: Vec<_> = locator.locate(&document).collect();
        let second: Vec<_> = locator.locate(&document).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_style_element_bodies() {
        let bodies = style_element_bodies(&Html::parse_document(PAGE));

        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("url(bg.png)"));
    }

    #[test]
    fn test_base_href() {
        assert_eq!(base_href(&Html::parse_document(PAGE)), None);
        assert_eq!(
            base_href(&Html::parse_document(
                r#"<head><base href="https://cdn.example.com/site/"></head>"#
            )),
            Some("https://cdn.example.com/site/".to_string())
        );
    }
}
