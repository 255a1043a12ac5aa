use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Missing credential; surfaces before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Branch or tree lookup failed or returned unusable data.
    #[error("Remote listing failed: {0}")]
    RemoteListing(String),

    /// The advisory lock could not be acquired.
    #[error("Sync lock error: {0}")]
    Lock(String),

    /// Anything else; not mapped to a response by the service facade.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SyncError {
    /// Stable kind name used as the `detail` field of error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ConfigurationError",
            Self::RemoteListing(_) => "RemoteListingError",
            Self::Lock(_) => "LockError",
            Self::Internal(_) => "InternalError",
        }
    }
}

impl From<core_runtime::Error> for SyncError {
    fn from(err: core_runtime::Error) -> Self {
        match err {
            core_runtime::Error::Config(msg) => Self::Configuration(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
