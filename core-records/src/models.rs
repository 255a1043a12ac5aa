//! Domain models for the installation database
//!
//! Rich domain models with validation. Identifiers are UUIDs stored as TEXT;
//! the public-facing key of an [`Install`] is its `install_number`, which is
//! what panorama filenames encode.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub Uuid);

impl BuildingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for BuildingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an install
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstallId(pub Uuid);

impl InstallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for InstallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Domain Models
// =============================================================================

/// Lifecycle status of an install
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallStatus {
    RequestReceived,
    Pending,
    Blocked,
    Active,
    Inactive,
    Closed,
    NnReassigned,
}

impl InstallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestReceived => "Request Received",
            Self::Pending => "Pending",
            Self::Blocked => "Blocked",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Closed => "Closed",
            Self::NnReassigned => "NN Reassigned",
        }
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Request Received" => Ok(Self::RequestReceived),
            "Pending" => Ok(Self::Pending),
            "Blocked" => Ok(Self::Blocked),
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            "Closed" => Ok(Self::Closed),
            "NN Reassigned" => Ok(Self::NnReassigned),
            other => Err(format!("unknown install status: {}", other)),
        }
    }
}

/// A physical building, owner of the panorama URL sequence.
///
/// `panoramas` is an ordered sequence treated as a set with stable insertion
/// order: the same URL never appears twice, and existing entries are never
/// reordered by a sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Unique identifier
    pub id: BuildingId,
    /// Street address, if known
    pub street_address: Option<String>,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude in meters, if surveyed
    pub altitude: Option<f64>,
    /// Ordered, duplicate-free panorama URLs
    pub panoramas: Vec<String>,
    /// Creation time (epoch seconds)
    pub created_at: i64,
    /// Last update time (epoch seconds)
    pub updated_at: i64,
}

impl Building {
    /// Create a building at the given coordinates with no panoramas.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let now = now_ts();
        Self {
            id: BuildingId::new(),
            street_address: None,
            latitude,
            longitude,
            altitude: None,
            panoramas: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude out of range: {}", self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude out of range: {}", self.longitude));
        }
        validate_panoramas(&self.panoramas)
    }
}

/// An install request tied to a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Install {
    /// Unique identifier
    pub id: InstallId,
    /// Public install number, the key panorama filenames encode
    pub install_number: i64,
    /// Lifecycle status
    pub status: InstallStatus,
    /// Building this install belongs to
    pub building_id: BuildingId,
    /// When the install was requested (epoch seconds)
    pub request_date: Option<i64>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Creation time (epoch seconds)
    pub created_at: i64,
    /// Last update time (epoch seconds)
    pub updated_at: i64,
}

impl Install {
    pub fn new(install_number: i64, building_id: BuildingId, status: InstallStatus) -> Self {
        let now = now_ts();
        Self {
            id: InstallId::new(),
            install_number,
            status,
            building_id,
            request_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.install_number < 1 {
            return Err(format!(
                "install number must be positive: {}",
                self.install_number
            ));
        }
        Ok(())
    }
}

/// Check the duplicate-free invariant of a panorama sequence.
pub fn validate_panoramas(panoramas: &[String]) -> Result<(), String> {
    for (i, url) in panoramas.iter().enumerate() {
        if panoramas[..i].contains(url) {
            return Err(format!("duplicate panorama URL: {}", url));
        }
    }
    Ok(())
}

/// Current time as epoch seconds.
pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}
