//! Install repository trait and SQLite implementation

use crate::error::{RecordsError, Result};
use crate::models::{BuildingId, Install, InstallId, InstallStatus};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Install repository interface for data access operations
#[async_trait]
pub trait InstallRepository: Send + Sync {
    /// Find an install by its public install number
    ///
    /// # Returns
    /// - `Ok(Some(install))` if found
    /// - `Ok(None)` if not found
    /// - `Err` if a database error occurs
    async fn find_by_install_number(&self, install_number: i64) -> Result<Option<Install>>;

    /// Insert a new install
    ///
    /// # Errors
    /// Returns error if validation fails, the install number already exists,
    /// or a database error occurs
    async fn insert(&self, install: &Install) -> Result<()>;

    /// Count total installs
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of InstallRepository
pub struct SqliteInstallRepository {
    pool: SqlitePool,
}

impl SqliteInstallRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn validate_install(install: &Install) -> Result<()> {
        install.validate().map_err(|msg| RecordsError::InvalidInput {
            field: "Install".to_string(),
            message: msg,
        })
    }
}

#[async_trait]
impl InstallRepository for SqliteInstallRepository {
    async fn find_by_install_number(&self, install_number: i64) -> Result<Option<Install>> {
        let row = sqlx::query("SELECT * FROM installs WHERE install_number = ?")
            .bind(install_number)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| row_to_install(&row)).transpose()
    }

    async fn insert(&self, install: &Install) -> Result<()> {
        Self::validate_install(install)?;
        sqlx::query(
            r#"
            INSERT INTO installs (
                id, install_number, status, building_id, request_date, notes,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(install.id.to_string())
        .bind(install.install_number)
        .bind(install.status.as_str())
        .bind(install.building_id.to_string())
        .bind(install.request_date)
        .bind(install.notes.as_deref())
        .bind(install.created_at)
        .bind(install.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM installs")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}

fn row_to_install(row: &SqliteRow) -> Result<Install> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    let building_id: String = row.try_get("building_id")?;

    Ok(Install {
        id: InstallId::from_string(&id).map_err(|e| invalid("id", e))?,
        install_number: row.try_get("install_number")?,
        status: status
            .parse::<InstallStatus>()
            .map_err(|e| invalid("status", e))?,
        building_id: BuildingId::from_string(&building_id)
            .map_err(|e| invalid("building_id", e))?,
        request_date: row.try_get("request_date")?,
        notes: row.try_get("notes")?,
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
