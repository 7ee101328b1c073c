//! Configuration module for bundling
//!
//! This module provides the `BundleConfig` struct and its builder. The
//! configuration is an explicit value handed to the [`crate::Bundler`] at
//! construction; nothing in the pipeline reads ambient global settings.

// Sub-modules
pub mod builder;
pub mod types;

// Re-exports for public API
pub use builder::BundleConfigBuilder;
pub use types::BundleConfig;
