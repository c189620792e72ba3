//! Configuration module for course-link discovery
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder
//! for configuring discovery runs with validation and sensible defaults,
//! plus the options of the detail-extraction pass.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithStartUrl};
pub use types::{ExtractionOptions, PaginationTimings, ScrapeConfig};
