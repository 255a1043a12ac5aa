//! # GitHub Listing Provider
//!
//! Implements `PanoramaSource` against the GitHub REST API.
//!
//! ## Overview
//!
//! Two calls per listing, both bearer-authenticated and bounded by the shared
//! external API timeout:
//!
//! 1. Branch lookup to resolve the tip tree identifier (the trees API can
//!    list up to 100k entries / 7MB, far beyond the contents API)
//! 2. Recursive tree listing, filtered to regular files under the configured
//!    directory and reduced to basenames
//!
//! Failures are never retried: a single failed call aborts the whole sync.

pub mod connector;
pub mod error;
pub mod types;

pub use connector::GitHubConnector;
pub use error::{GitHubError, Result};
