//! Panorama Listing Source
//!
//! Seam over the external repository that hosts panorama images. The
//! production implementation (`provider_github::GitHubConnector`) resolves
//! the branch tip and walks the repository tree; tests substitute fixed
//! listings.

use async_trait::async_trait;

use crate::error::Result;

/// Lists candidate panorama filenames from the configured remote repository.
#[async_trait]
pub trait PanoramaSource: Send + Sync {
    /// Return the basenames of every candidate file under the configured
    /// directory at the tip of the configured branch.
    ///
    /// The credential is passed per call because it is read from the
    /// environment at sync time, never stored.
    ///
    /// # Errors
    ///
    /// Any failure here is fatal to the sync: the caller must not retry and
    /// must not fall back to a partial listing.
    async fn list_panorama_files(&self, token: &str) -> Result<Vec<String>>;
}
