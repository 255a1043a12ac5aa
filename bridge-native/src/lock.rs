//! Cross-process Advisory Lock
//!
//! `flock(2)`-based implementation of [`SyncLock`]. The lock is keyed by a
//! name that becomes a lock file inside the configured directory; every
//! process that opens and flocks the same path participates in the same
//! exclusion, so at most one sync runs system-wide regardless of how many
//! service processes are deployed.
//!
//! Acquisition runs on the blocking thread pool (LOCK_EX blocks the calling
//! thread until the holder releases). There is no acquisition timeout; a
//! blocked caller waits for the holder's full sync to finish.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    lock::{SyncGuard, SyncLock},
};
use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Cross-process advisory lock on a named lock file.
pub struct FlockSyncLock {
    name: String,
    path: PathBuf,
}

impl FlockSyncLock {
    /// Create a lock keyed by `name`, materialized as `{dir}/{name}.lock`.
    pub fn new(dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = dir.as_ref().join(format!("{}.lock", name));
        Self { name, path }
    }

    /// Path of the underlying lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Holds the flocked file; closing the descriptor on drop releases the lock.
struct FlockGuard {
    file: File,
}

impl Drop for FlockGuard {
    fn drop(&mut self) {
        // Unlock explicitly rather than relying on close ordering.
        unsafe {
            libc::flock(self.file.as_raw_fd(), libc::LOCK_UN);
        }
    }
}

impl SyncGuard for FlockGuard {}

/// Open (creating if missing) and exclusively flock the file, blocking until
/// the lock is granted.
fn acquire_exclusive_blocking(path: &Path) -> std::io::Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(path)?;
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(file)
}

/// Non-blocking probe used by tests and diagnostics: `Ok(None)` means the
/// lock is currently held elsewhere.
pub fn try_acquire_exclusive(path: &Path) -> std::io::Result<Option<File>> {
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(path)?;
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc != 0 {
        let err = std::io::Error::last_os_error();
        return if err.kind() == std::io::ErrorKind::WouldBlock {
            Ok(None)
        } else {
            Err(err)
        };
    }
    Ok(Some(file))
}

#[async_trait]
impl SyncLock for FlockSyncLock {
    async fn acquire(&self) -> Result<Box<dyn SyncGuard>> {
        let path = self.path.clone();
        let file = tokio::task::spawn_blocking(move || acquire_exclusive_blocking(&path))
            .await
            .map_err(|e| BridgeError::OperationFailed(format!("lock task panicked: {}", e)))??;
        debug!(lock = %self.name, path = %self.path.display(), "Acquired sync lock");
        Ok(Box::new(FlockGuard { file }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
