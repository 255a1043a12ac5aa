//! # Host Bridge Traits
//!
//! Capability seams between the panorama sync core and its environment.
//!
//! ## Overview
//!
//! This crate defines the contract between the sync core and the I/O it
//! depends on. Each trait represents a capability the core requires but that
//! is implemented elsewhere (the real service process, or a test harness):
//!
//! - [`HttpClient`](http::HttpClient) - async HTTP with bearer auth and bounded timeouts
//! - [`SyncLock`](lock::SyncLock) - named advisory lock guaranteeing one sync in flight
//! - [`PanoramaSource`](source::PanoramaSource) - listing of candidate panorama filenames
//!
//! Production adapters live in `bridge-native` (reqwest, flock) and
//! `provider-github` (the GitHub listing source). Tests substitute mocks or
//! the in-process [`LocalSyncLock`](lock::LocalSyncLock).
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! convert their own error types at the seam and keep messages actionable.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so capabilities can be shared
//! across async tasks behind `Arc`.

pub mod error;
pub mod http;
pub mod lock;
pub mod source;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use lock::{LocalSyncLock, SyncGuard, SyncLock};
pub use source::PanoramaSource;
