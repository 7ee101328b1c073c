use parking_lot::Mutex;
use std::collections::HashSet;

/// Set of absolute URLs already processed within one bundle
///
/// Shared by every concurrent branch of a bundle request. [`VisitedSet::insert`]
/// is a single atomic test-and-set, so two branches racing on the same URL
/// cannot both claim it.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `url` visited; `false` if it already was
    pub fn insert(&self, url: &str) -> bool {
        self.urls.lock().insert(url.to_string())
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.lock().contains(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_insert_is_test_and_set() {
        let visited = VisitedSet::new();

        assert!(visited.insert("http://example.com/a.css"));
        assert!(!visited.insert("http://example.com/a.css"));
        assert!(visited.contains("http://example.com/a.css"));
        assert!(!visited.contains("http://example.com/b.css"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_claim_once() {
        let visited = Arc::new(VisitedSet::new());
        let winners: usize = (0..8)
            .map(|_| {
                let visited = Arc::clone(&visited);
                std::thread::spawn(move || visited.insert("http://example.com/a.css"))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| usize::from(handle.join().unwrap_or(false)))
            .sum();

        assert_eq!(winners, 1);
    }
}
