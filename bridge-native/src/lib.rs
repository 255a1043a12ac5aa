//! # Native Bridge Implementations
//!
//! Production adapters for the `bridge-traits` capabilities:
//!
//! - [`ReqwestHttpClient`](http::ReqwestHttpClient) - single-attempt HTTP
//!   with bounded timeouts over a pooled `reqwest` client
//! - [`FlockSyncLock`](lock::FlockSyncLock) - cross-process advisory lock
//!   backed by `flock(2)` on a named lock file (Unix only)

pub mod http;
#[cfg(unix)]
pub mod lock;

pub use http::ReqwestHttpClient;
#[cfg(unix)]
pub use lock::FlockSyncLock;
