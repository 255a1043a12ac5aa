//! Advisory Sync Lock
//!
//! A named mutual-exclusion capability guaranteeing at most one panorama sync
//! in flight system-wide. The lock is injected into the coordinator rather
//! than reached for as global state, so deployments choose the scope:
//!
//! - [`LocalSyncLock`] - in-process `tokio` mutex for single-instance
//!   deployments and tests
//! - `bridge_native::FlockSyncLock` - cross-process `flock(2)` lock for
//!   multi-process deployments
//!
//! Acquisition blocks without a timeout; a blocked caller waits for the
//! holder to finish and then runs its own full sync.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::Result;

/// Witness that the sync lock is held. Dropping the guard releases the lock.
pub trait SyncGuard: Send {}

/// Named advisory lock around the whole sync operation.
#[async_trait]
pub trait SyncLock: Send + Sync {
    /// Block until the lock is held, returning a guard that releases on drop.
    async fn acquire(&self) -> Result<Box<dyn SyncGuard>>;

    /// The lock's name, for diagnostics.
    fn name(&self) -> &str;
}

/// In-process lock for single-instance deployments and tests.
pub struct LocalSyncLock {
    name: String,
    inner: Arc<Mutex<()>>,
}

impl LocalSyncLock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(())),
        }
    }
}

struct LocalSyncGuard {
    _guard: OwnedMutexGuard<()>,
}

impl SyncGuard for LocalSyncGuard {}

#[async_trait]
impl SyncLock for LocalSyncLock {
    async fn acquire(&self) -> Result<Box<dyn SyncGuard>> {
        let guard = Arc::clone(&self.inner).lock_owned().await;
        Ok(Box::new(LocalSyncGuard { _guard: guard }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_local_lock_excludes_concurrent_holders() {
        let lock = Arc::new(LocalSyncLock::new("test_lock"));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let lock = Arc::clone(&lock);
            let in_flight = Arc::clone(&in_flight);
            let max_seen = Arc::clone(&max_seen);
            handles.push(tokio::spawn(async move {
                let _guard = lock.acquire().await.unwrap();
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_guard_drop_releases_lock() {
        let lock = LocalSyncLock::new("test_lock");
        let guard = lock.acquire().await.unwrap();
        drop(guard);
        // A second acquisition must not dead-lock.
        let _second = lock.acquire().await.unwrap();
        assert_eq!(lock.name(), "test_lock");
    }
}
