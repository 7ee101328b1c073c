//! Builder for `BundleConfig`
//!
//! Every field has a default, so the builder only validates the values it is
//! given when `build()` is called.

use anyhow::{Result, bail};

use super::types::BundleConfig;

#[derive(Debug, Clone, Default)]
pub struct BundleConfigBuilder {
    config: BundleConfig,
}

impl BundleConfigBuilder {
    #[must_use]
    pub fn document_timeout_secs(mut self, secs: u64) -> Self {
        self.config.document_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn resource_timeout_secs(mut self, secs: u64) -> Self {
        self.config.resource_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn max_document_size(mut self, bytes: usize) -> Self {
        self.config.max_document_size = bytes;
        self
    }

    #[must_use]
    pub fn max_resource_size(mut self, bytes: usize) -> Self {
        self.config.max_resource_size = bytes;
        self
    }

    #[must_use]
    pub fn max_redirects(mut self, redirects: usize) -> Self {
        self.config.max_redirects = redirects;
        self
    }

    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Validate and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout or size limit is zero, or if the user
    /// agent is blank.
    pub fn build(self) -> Result<BundleConfig> {
        let config = self.config;

        if config.document_timeout_secs == 0 || config.resource_timeout_secs == 0 {
            bail!("Timeouts must be at least one second");
        }
        if config.max_document_size == 0 {
            bail!("max_document_size must be greater than zero");
        }
        if config.max_resource_size == 0 {
            bail!("max_resource_size must be greater than zero");
        }
        if config.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }

        Ok(config)
    }
}
