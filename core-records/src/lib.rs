//! # Record Store Module
//!
//! The installation/building database the panorama sync writes into.
//!
//! ## Overview
//!
//! - **Models** (`models`): `Building` (owner of the ordered `panoramas` URL
//!   sequence) and `Install` (maps the public install number to a building)
//! - **Database** (`db`): SQLite connection pooling with embedded migrations
//! - **Repositories** (`repositories`): trait seams plus SQLite
//!   implementations for lookups and the panorama sequence write
//!
//! Only the sync reconciler mutates `Building.panoramas`; everything else in
//! the system treats the sequence as read-only.

pub mod db;
pub mod error;
pub mod models;
pub mod repositories;

pub use db::{create_pool, create_test_pool, DatabaseConfig};
pub use error::{RecordsError, Result};
pub use models::{Building, BuildingId, Install, InstallId, InstallStatus};
pub use repositories::{
    BuildingRepository, InstallRepository, SqliteBuildingRepository, SqliteInstallRepository,
};
