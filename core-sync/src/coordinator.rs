//! # Sync Coordinator
//!
//! Sequences one panorama sync invocation: acquire the advisory lock, read
//! the credential, fetch the remote listing, group, reconcile, report.
//!
//! ## Workflow
//!
//! 1. Acquire the named sync lock; concurrent callers block here, then run
//!    their own full sync against whatever state the previous one left
//! 2. Read the bearer token from the environment (fail fast, no network yet)
//! 3. List candidate filenames via `PanoramaSource` (two remote calls);
//!    any failure or an empty listing aborts with `RemoteListing`
//! 4. Group filenames by parsed install number, recording rejects
//! 5. Reconcile each group into its building record
//!
//! The lock guard is held until the report is built, covering both network
//! calls and every record write.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{Result, SyncError};
use crate::grouper::build_pano_groups;
use crate::reconciler::Reconciler;
use crate::report::SyncReport;
use bridge_traits::lock::SyncLock;
use bridge_traits::source::PanoramaSource;
use core_records::repositories::{BuildingRepository, InstallRepository};
use core_runtime::config::SyncSettings;

/// Coordinates one full panorama sync per call.
pub struct PanoSyncCoordinator {
    settings: SyncSettings,
    source: Arc<dyn PanoramaSource>,
    lock: Arc<dyn SyncLock>,
    reconciler: Reconciler,
}

impl PanoSyncCoordinator {
    /// Create a new coordinator
    ///
    /// # Arguments
    ///
    /// * `settings` - repository coordinates, host prefix, token env var
    /// * `source` - remote listing implementation
    /// * `lock` - advisory lock scoping the whole sync
    /// * `installs` / `buildings` - record store access
    pub fn new(
        settings: SyncSettings,
        source: Arc<dyn PanoramaSource>,
        lock: Arc<dyn SyncLock>,
        installs: Arc<dyn InstallRepository>,
        buildings: Arc<dyn BuildingRepository>,
    ) -> Self {
        let reconciler = Reconciler::new(installs, buildings, settings.host_url.clone());
        Self {
            settings,
            source,
            lock,
            reconciler,
        }
    }

    /// Run one full sync.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Lock`] if the advisory lock cannot be acquired
    /// - [`SyncError::Configuration`] if the credential is absent
    /// - [`SyncError::RemoteListing`] if the listing fails or comes back
    ///   empty; no reconciliation happens in that case
    ///
    /// Per-identifier problems do not error; they come back as warnings in
    /// the report.
    #[instrument(skip(self))]
    pub async fn sync(&self) -> Result<SyncReport> {
        let _guard = self
            .lock
            .acquire()
            .await
            .map_err(|e| SyncError::Lock(e.to_string()))?;
        debug!(lock = self.lock.name(), "Acquired panorama sync lock");

        let token = self.settings.github_token()?;

        let files = self
            .source
            .list_panorama_files(&token)
            .await
            .map_err(|e| SyncError::RemoteListing(e.to_string()))?;
        if files.is_empty() {
            return Err(SyncError::RemoteListing(
                "remote listing returned no files".to_string(),
            ));
        }
        info!(files = files.len(), "Fetched panorama listing");

        let (groups, rejected) = build_pano_groups(&files);
        let mut report = self.reconciler.reconcile(&groups).await;
        report.rejected = rejected;

        info!(
            saved = report.saved,
            warnings = report.warnings.len(),
            rejected = report.rejected.len(),
            "Panorama sync finished"
        );
        Ok(report)
    }
}
