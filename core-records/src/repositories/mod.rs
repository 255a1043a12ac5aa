//! Repository traits and SQLite implementations
//!
//! Each repository is a trait seam over the pool so the sync core can be
//! tested against mocks; the SQLite implementations work directly on a
//! `SqlitePool`.

pub mod building;
pub mod install;

pub use building::{BuildingRepository, SqliteBuildingRepository};
pub use install::{InstallRepository, SqliteInstallRepository};
