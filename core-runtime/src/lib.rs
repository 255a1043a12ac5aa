//! # Runtime Support Module
//!
//! Configuration and logging bootstrap for the panorama sync service.
//!
//! ## Components
//!
//! - **Settings** (`config`): repository coordinates, public host prefix,
//!   timeouts, and call-time credential lookup from the environment
//! - **Logging** (`logging`): `tracing-subscriber` initialization with
//!   env-filter support and selectable output format

pub mod config;
pub mod error;
pub mod logging;

pub use config::{SyncSettings, DEFAULT_EXTERNAL_API_TIMEOUT_SECS, SYNC_LOCK_NAME};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
