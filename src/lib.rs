//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-service`, `bridge-native`). Host applications
//! can depend on `panomesh-workspace` with the `native` feature and get the
//! service facade plus the native HTTP and lock bridges without wiring each
//! crate individually.

#[cfg(feature = "native")]
pub use bridge_native;
#[cfg(feature = "native")]
pub use core_service;
