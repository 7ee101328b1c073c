//! Diff collection and application
//!
//! A [`Diff`] maps a reference string, exactly as it appears in the source
//! document, to the text that replaces it. Keys are opaque text tokens rather
//! than normalized URLs: `/a/` and `/a` are distinct keys.
//!
//! [`Diff::apply`] substitutes every key in a single leftmost-longest pass
//! over the document. Match positions come from the original text only, so a
//! replacement value is never rescanned for other keys and the result does not
//! depend on the iteration order of the map.

use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashMap;
use std::collections::hash_map;

use crate::errors::{BundleError, BundleResult};

/// Mapping from a literal reference string to its replacement text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    entries: HashMap<String, String>,
}

impl Diff {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A diff holding one entry
    #[must_use]
    pub fn single(reference: impl Into<String>, replacement: impl Into<String>) -> Self {
        let mut diff = Self::new();
        diff.insert(reference, replacement);
        diff
    }

    /// Insert an entry, returning the replacement it displaced
    pub fn insert(
        &mut self,
        reference: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(reference.into(), replacement.into())
    }

    #[must_use]
    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries.get(reference).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.entries.contains_key(reference)
    }

    pub fn remove(&mut self, reference: &str) -> Option<String> {
        self.entries.remove(reference)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(reference, replacement)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keep only the entries matching `predicate(reference, replacement)`
    pub fn retain(&mut self, mut predicate: impl FnMut(&str, &str) -> bool) {
        self.entries.retain(|k, v| predicate(k, v));
    }

    /// Fold `other` into this diff; entries of `other` win on collision
    pub fn extend(&mut self, other: Diff) {
        self.entries.extend(other.entries);
    }

    /// Right-fold union of diffs: the last diff holding a key wins
    #[must_use]
    pub fn merge(diffs: impl IntoIterator<Item = Diff>) -> Diff {
        diffs.into_iter().fold(Diff::new(), |mut merged, diff| {
            merged.extend(diff);
            merged
        })
    }

    /// Replace every occurrence of every key in `document` with its value
    ///
    /// Where keys overlap in the text, the leftmost match wins and, among
    /// matches starting at the same offset, the longest one. Empty keys are
    /// ignored. An empty diff leaves the document unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Matcher`] if the key set is too large to compile
    /// into a matcher.
    pub fn apply(&self, document: &str) -> BundleResult<String> {
        let (patterns, replacements): (Vec<&str>, Vec<&str>) = self
            .entries
            .iter()
            .filter(|(reference, _)| !reference.is_empty())
            .map(|(reference, replacement)| (reference.as_str(), replacement.as_str()))
            .unzip();

        if patterns.is_empty() {
            return Ok(document.to_string());
        }

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| BundleError::Matcher(e.to_string()))?;

        Ok(matcher.replace_all(document, &replacements))
    }
}

/// Right-fold union over all maps; see [`Diff::merge`]
#[must_use]
pub fn merge(diffs: impl IntoIterator<Item = Diff>) -> Diff {
    Diff::merge(diffs)
}

/// Apply `diffs` to `document`; see [`Diff::apply`]
pub fn apply(document: &str, diffs: &Diff) -> BundleResult<String> {
    diffs.apply(document)
}

impl From<HashMap<String, String>> for Diff {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Diff {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Diff {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_diff_is_identity() {
        let doc = "<img src=\"a.png\"> a.png";

        assert_eq!(Diff::new().apply(doc).unwrap(), doc);
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let doc = "<img src=\"a.png\"><img src=\"a.png\">";
        let diff = Diff::single("a.png", "data:image/png;base64,AAA=");

        assert_eq!(
            diff.apply(doc).unwrap(),
            "<img src=\"data:image/png;base64,AAA=\"><img src=\"data:image/png;base64,AAA=\">"
        );
    }

    #[test]
    fn test_replacements_are_not_rescanned() {
        // "b" appears inside the replacement for "a"; it must stay untouched.
        let diff: Diff = [("a", "[b]"), ("b", "[c]")].into_iter().collect();

        assert_eq!(diff.apply("a b").unwrap(), "[b] [c]");
    }

    #[test]
    fn test_longest_key_wins_at_same_offset() {
        let diff: Diff = [("img/a.png", "LONG"), ("img", "SHORT")].into_iter().collect();

        assert_eq!(diff.apply("img/a.png img").unwrap(), "LONG SHORT");
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let diff: Diff = [("", "X"), ("a", "b")].into_iter().collect();

        assert_eq!(diff.apply("aaa").unwrap(), "bbb");
    }

    #[test]
    fn test_merge_last_writer_wins() {
        let first: Diff = [("a", "1"), ("b", "1")].into_iter().collect();
        let second: Diff = [("b", "2"), ("c", "2")].into_iter().collect();

        let merged = Diff::merge([first, second]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("a"), Some("1"));
        assert_eq!(merged.get("b"), Some("2"));
        assert_eq!(merged.get("c"), Some("2"));
    }

    #[test]
    fn test_disjoint_diffs_commute() {
        let doc = "<img src=\"a.png\"><script src=\"b.js\"></script>";
        let a = Diff::single("a.png", "X");
        let b = Diff::single("b.js", "Y");

        let ab = b.apply(&a.apply(doc).unwrap()).unwrap();
        let ba = a.apply(&b.apply(doc).unwrap()).unwrap();

        assert_eq!(ab, ba);
        assert_eq!(ab, "<img src=\"X\"><script src=\"Y\"></script>");
    }

    #[test]
    fn test_retain_filters_entries() {
        let mut diff: Diff = [("https://google.com", "test data"), ("/image.png", "test data 2")]
            .into_iter()
            .collect();

        diff.retain(|source, _| !source.contains("google"));

        assert!(!diff.contains("https://google.com"));
        assert_eq!(diff.get("/image.png"), Some("test data 2"));
    }
}
