//! Reconciling identifier groups into building records
//!
//! For each install number the reconciler resolves the install, then its
//! building, and merges the served URLs into the building's panorama
//! sequence. Existing entries are never reordered or removed; a candidate
//! already present is not appended again. Every identifier is an independent
//! commit: one failure becomes a warning and the rest of the run proceeds.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::grouper::PanoGroups;
use crate::report::SyncReport;
use core_records::models::BuildingId;
use core_records::repositories::{BuildingRepository, InstallRepository};
use core_records::RecordsError;

/// Why one identifier could not be reconciled. Recovered per identifier,
/// surfaced as a warning, never fatal to the run.
#[derive(Error, Debug)]
pub enum ReconcileIssue {
    #[error("install number is not a valid integer: {0}")]
    InvalidNumber(String),

    #[error("install #{0} does not exist")]
    MissingInstall(i64),

    #[error("building {0} does not exist")]
    MissingBuilding(BuildingId),

    #[error("record store error: {0}")]
    Store(#[from] RecordsError),
}

/// Typed result of reconciling one identifier group.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// URLs merged and the building persisted; `files` counts the filenames
    /// processed for the identifier, not the URLs actually appended.
    Saved { files: usize },

    /// Candidates already equal the stored sequence; nothing written.
    Unchanged,

    /// The identifier could not be reconciled.
    Warned { issue: ReconcileIssue },
}

/// Merges panorama URL groups into building records.
pub struct Reconciler {
    installs: Arc<dyn InstallRepository>,
    buildings: Arc<dyn BuildingRepository>,
    host_url: String,
}

impl Reconciler {
    pub fn new(
        installs: Arc<dyn InstallRepository>,
        buildings: Arc<dyn BuildingRepository>,
        host_url: impl Into<String>,
    ) -> Self {
        Self {
            installs,
            buildings,
            host_url: host_url.into(),
        }
    }

    /// Reconcile every group, in mapping order, into a report.
    pub async fn reconcile(&self, groups: &PanoGroups) -> SyncReport {
        let mut report = SyncReport::default();

        for (install_number, filenames) in groups {
            match self.reconcile_one(install_number, filenames).await {
                ReconcileOutcome::Saved { files } => {
                    report.saved += files;
                }
                ReconcileOutcome::Unchanged => {
                    debug!(install_number = %install_number, "Panoramas already in sync");
                }
                ReconcileOutcome::Warned { issue } => {
                    warn!(
                        install_number = %install_number,
                        issue = %issue,
                        "Could not add panoramas to building"
                    );
                    report.warnings.push(install_number.clone());
                }
            }
        }

        report
    }

    /// Reconcile a single identifier group, converting any failure into a
    /// warning outcome.
    pub async fn reconcile_one(
        &self,
        install_number: &str,
        filenames: &[String],
    ) -> ReconcileOutcome {
        match self.try_reconcile(install_number, filenames).await {
            Ok(outcome) => outcome,
            Err(issue) => ReconcileOutcome::Warned { issue },
        }
    }

    async fn try_reconcile(
        &self,
        install_number: &str,
        filenames: &[String],
    ) -> Result<ReconcileOutcome, ReconcileIssue> {
        // Integer coercion of the digit string; leading zeros collapse here.
        let number: i64 = install_number
            .parse()
            .map_err(|_| ReconcileIssue::InvalidNumber(install_number.to_string()))?;

        let install = self
            .installs
            .find_by_install_number(number)
            .await?
            .ok_or(ReconcileIssue::MissingInstall(number))?;

        let building = self
            .buildings
            .find_by_id(&install.building_id)
            .await?
            .ok_or(ReconcileIssue::MissingBuilding(install.building_id))?;

        let candidates: Vec<String> = filenames
            .iter()
            .map(|filename| format!("{}{}", self.host_url, filename))
            .collect();

        // Idempotence fast path: an unchanged listing writes nothing.
        if building.panoramas == candidates {
            return Ok(ReconcileOutcome::Unchanged);
        }

        let mut panoramas = building.panoramas.clone();
        for url in &candidates {
            if !panoramas.contains(url) {
                panoramas.push(url.clone());
            }
        }

        self.buildings
            .update_panoramas(&building.id, &panoramas)
            .await?;

        Ok(ReconcileOutcome::Saved {
            files: filenames.len(),
        })
    }
}
