//! # Sync Configuration Module
//!
//! Settings for gathering and publishing panorama links. The defaults are
//! the production coordinates of the panorama repository; every field can be
//! overridden through the builder for staging or tests.
//!
//! The GitHub credential is deliberately NOT part of the settings: it is read
//! from the environment each time a sync runs, so a rotated token takes
//! effect without restarting the service and is never held longer than one
//! invocation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_runtime::config::SyncSettings;
//!
//! let settings = SyncSettings::default()
//!     .branch("staging")
//!     .directory("data/panoramas");
//! let token = settings.github_token()?;
//! ```

use std::time::Duration;

use crate::error::{Error, Result};

/// Owner of the repository that hosts panorama images.
pub const DEFAULT_PANO_REPO_OWNER: &str = "nycmeshnet";

/// Repository that hosts panorama images.
pub const DEFAULT_PANO_REPO: &str = "node-db";

/// Branch whose tip is listed.
pub const DEFAULT_PANO_BRANCH: &str = "master";

/// Directory inside the repository that holds panorama files.
pub const DEFAULT_PANO_DIR: &str = "data/panoramas";

/// Public host prefix the synced panorama URLs point at.
pub const DEFAULT_PANO_HOST: &str = "https://node-db.netlify.app/panoramas/";

/// Base URL of the code-hosting API.
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Environment variable holding the bearer token for the code-hosting API.
pub const DEFAULT_TOKEN_ENV: &str = "PANO_GITHUB_TOKEN";

/// Shared timeout applied to each external API call.
pub const DEFAULT_EXTERNAL_API_TIMEOUT_SECS: u64 = 3;

/// Name of the advisory lock serializing sync invocations.
pub const SYNC_LOCK_NAME: &str = "update_panoramas_lock";

/// Settings for the panorama sync.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Repository owner (user or organization)
    pub repo_owner: String,

    /// Repository name
    pub repo_name: String,

    /// Branch whose tip tree is listed
    pub branch: String,

    /// Directory filter applied to the repository tree
    pub directory: String,

    /// Public prefix prepended to each filename to form a served URL
    pub host_url: String,

    /// Base URL of the code-hosting API
    pub api_base: String,

    /// Environment variable the bearer token is read from at call time
    pub token_env: String,

    /// Timeout applied to each external API call
    pub external_api_timeout: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            repo_owner: DEFAULT_PANO_REPO_OWNER.to_string(),
            repo_name: DEFAULT_PANO_REPO.to_string(),
            branch: DEFAULT_PANO_BRANCH.to_string(),
            directory: DEFAULT_PANO_DIR.to_string(),
            host_url: DEFAULT_PANO_HOST.to_string(),
            api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            external_api_timeout: Duration::from_secs(DEFAULT_EXTERNAL_API_TIMEOUT_SECS),
        }
    }
}

impl SyncSettings {
    /// Set the repository owner
    pub fn repo_owner(mut self, owner: impl Into<String>) -> Self {
        self.repo_owner = owner.into();
        self
    }

    /// Set the repository name
    pub fn repo_name(mut self, repo: impl Into<String>) -> Self {
        self.repo_name = repo.into();
        self
    }

    /// Set the branch
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the directory filter
    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the public host prefix
    pub fn host_url(mut self, host_url: impl Into<String>) -> Self {
        self.host_url = host_url.into();
        self
    }

    /// Set the code-hosting API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the environment variable the token is read from
    pub fn token_env(mut self, token_env: impl Into<String>) -> Self {
        self.token_env = token_env.into();
        self
    }

    /// Set the external API call timeout
    pub fn external_api_timeout(mut self, timeout: Duration) -> Self {
        self.external_api_timeout = timeout;
        self
    }

    /// Read the bearer token from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the variable is unset or not UTF-8,
    /// which the sync surfaces as a `ConfigurationError` before any network
    /// call is made.
    pub fn github_token(&self) -> Result<String> {
        std::env::var(&self.token_env)
            .map_err(|_| Error::Config(format!("Environment variable {} not found", self.token_env)))
    }
}
