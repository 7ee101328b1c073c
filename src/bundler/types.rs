use crate::observer::ResourceFailure;

/// Result of bundling a page
#[derive(Debug, Clone)]
pub struct Bundle {
    /// URL the document was served from, after redirects
    pub url: String,
    /// The self-contained document
    pub html: String,
    /// Number of distinct references replaced in the document
    pub replacements: usize,
    /// Resources fetched and encoded, nested stylesheet references included
    pub inlined: usize,
    pub failures: Vec<ResourceFailure>,
}

impl Bundle {
    /// Total number of resources processed
    #[must_use]
    pub fn total(&self) -> usize {
        self.inlined + self.failures.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Failures as a ratio between 0.0 and 1.0
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.failures.len() as f64 / total as f64
        }
    }

    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BundleError;

    #[test]
    fn test_failure_rate() {
        let mut bundle = Bundle {
            url: "http://example.com/".to_string(),
            html: String::new(),
            replacements: 0,
            inlined: 0,
            failures: Vec::new(),
        };
        assert_eq!(bundle.failure_rate(), 0.0);

        bundle.inlined = 3;
        bundle.failures.push(ResourceFailure {
            reference: "missing.png".to_string(),
            base_url: "http://example.com/".to_string(),
            error: BundleError::Status {
                url: "http://example.com/missing.png".to_string(),
                status: 404,
            },
        });

        assert_eq!(bundle.total(), 4);
        assert!(bundle.has_failures());
        assert!((bundle.failure_rate() - 0.25).abs() < f64::EPSILON);
    }
}
