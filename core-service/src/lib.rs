//! Service facade for the panorama update trigger.
//!
//! The host framework owns the transport and the authentication of the
//! triggering request (the panorama-update permission check happens there,
//! before this facade is reached). What lives here is the mapping between
//! one sync invocation and the wire-level response:
//!
//! - a successful sync becomes a `200` with the saved/warning summary
//! - configuration and remote-listing failures become a `500` whose `detail`
//!   is the stable error-kind name
//! - anything else is returned as `Err` and propagates through the host
//!   framework's default error handling

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use core_sync::{PanoSyncCoordinator, SyncError};

/// HTTP-ish status codes the facade can produce without pulling in a
/// framework dependency.
pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Successful response body for the update trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePanoramasResponse {
    /// Human-readable summary
    pub detail: String,
    /// Number of panorama files saved
    pub saved: usize,
    /// Number of warning identifiers
    pub warnings: usize,
    /// Install numbers that could not be resolved, in encounter order
    pub warn_install_nums: Vec<String>,
}

/// Status + JSON body handed back to the host framework.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Facade exposed to host applications.
#[derive(Clone)]
pub struct PanoService {
    coordinator: Arc<PanoSyncCoordinator>,
}

impl PanoService {
    /// Create a new service over a wired coordinator.
    pub fn new(coordinator: Arc<PanoSyncCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Run one panorama sync and shape the response.
    ///
    /// # Errors
    ///
    /// Only failures the trigger contract does not map to a response are
    /// returned as `Err`; configuration and remote-listing failures come back
    /// as an `Ok` 500 response.
    pub async fn update_panoramas(&self) -> Result<ApiResponse, SyncError> {
        match self.coordinator.sync().await {
            Ok(report) => {
                let response = UpdatePanoramasResponse {
                    detail: format!(
                        "Saved {} panoramas. Got {} warnings.",
                        report.saved,
                        report.warning_count()
                    ),
                    saved: report.saved,
                    warnings: report.warning_count(),
                    warn_install_nums: report.warnings.clone(),
                };
                let body = serde_json::to_value(&response)
                    .map_err(|e| SyncError::Internal(e.to_string()))?;
                Ok(ApiResponse {
                    status: STATUS_OK,
                    body,
                })
            }
            Err(err @ (SyncError::Configuration(_) | SyncError::RemoteListing(_))) => {
                error!(error = %err, "Error when syncing panoramas");
                Ok(ApiResponse {
                    status: STATUS_INTERNAL_SERVER_ERROR,
                    body: json!({ "detail": err.kind() }),
                })
            }
            Err(other) => Err(other),
        }
    }
}
