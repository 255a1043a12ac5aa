//! Building repository trait and SQLite implementation
//!
//! The panorama sequence write (`update_panoramas`) is the only mutation the
//! sync performs; it replaces the stored JSON array wholesale, so the caller
//! is responsible for having merged new URLs into the existing order. The
//! duplicate-free invariant is re-checked here before anything is written.

use crate::error::{RecordsError, Result};
use crate::models::{now_ts, validate_panoramas, Building, BuildingId};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Building repository interface for data access operations
#[async_trait]
pub trait BuildingRepository: Send + Sync {
    /// Find a building by its ID
    async fn find_by_id(&self, id: &BuildingId) -> Result<Option<Building>>;

    /// Insert a new building
    async fn insert(&self, building: &Building) -> Result<()>;

    /// Replace the building's panorama sequence
    ///
    /// # Errors
    /// Returns error if:
    /// - The sequence contains a duplicate URL
    /// - The building does not exist
    /// - A database error occurs
    async fn update_panoramas(&self, id: &BuildingId, panoramas: &[String]) -> Result<()>;
}

/// SQLite implementation of BuildingRepository
pub struct SqliteBuildingRepository {
    pool: SqlitePool,
}

impl SqliteBuildingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn validate_building(building: &Building) -> Result<()> {
        building
            .validate()
            .map_err(|msg| RecordsError::InvalidInput {
                field: "Building".to_string(),
                message: msg,
            })
    }

    fn encode_panoramas(panoramas: &[String]) -> Result<String> {
        serde_json::to_string(panoramas).map_err(|e| RecordsError::InvalidInput {
            field: "panoramas".to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl BuildingRepository for SqliteBuildingRepository {
    async fn find_by_id(&self, id: &BuildingId) -> Result<Option<Building>> {
        let row = sqlx::query("SELECT * FROM buildings WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| row_to_building(&row)).transpose()
    }

    async fn insert(&self, building: &Building) -> Result<()> {
        Self::validate_building(building)?;
        sqlx::query(
            r#"
            INSERT INTO buildings (
                id, street_address, latitude, longitude, altitude, panoramas,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(building.id.to_string())
        .bind(building.street_address.as_deref())
        .bind(building.latitude)
        .bind(building.longitude)
        .bind(building.altitude)
        .bind(Self::encode_panoramas(&building.panoramas)?)
        .bind(building.created_at)
        .bind(building.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_panoramas(&self, id: &BuildingId, panoramas: &[String]) -> Result<()> {
        validate_panoramas(panoramas).map_err(|msg| RecordsError::InvalidInput {
            field: "panoramas".to_string(),
            message: msg,
        })?;

        let affected = sqlx::query(
            "UPDATE buildings SET panoramas = ?, updated_at = ? WHERE id = ?",
        )
        .bind(Self::encode_panoramas(panoramas)?)
        .bind(now_ts())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(RecordsError::NotFound {
                entity_type: "Building".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn row_to_building(row: &SqliteRow) -> Result<Building> {
    let id: String = row.try_get("id")?;
    let panoramas: String = row.try_get("panoramas")?;

    Ok(Building {
        id: BuildingId::from_string(&id).map_err(|e| invalid("id", e))?,
        street_address: row.try_get("street_address")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        altitude: row.try_get("altitude")?,
        panoramas: serde_json::from_str(&panoramas).map_err(|e| invalid("panoramas", e))?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn invalid(field: &str, err: impl std::fmt::Display) -> RecordsError {
    RecordsError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}
