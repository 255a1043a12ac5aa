//! Integration tests for the panorama sync workflow
//!
//! These tests drive the coordinator end-to-end against an in-memory record
//! store and stub listing sources, covering:
//! - The full fetch/group/reconcile flow with mixed-quality titles
//! - Idempotence of repeated syncs over an unchanged listing
//! - Preservation of existing panorama order
//! - Fail-fast behavior for missing credentials and unusable listings
//! - Mutual exclusion of concurrent sync invocations

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::lock::{LocalSyncLock, SyncLock};
use bridge_traits::source::PanoramaSource;
use core_records::models::{Building, Install, InstallStatus};
use core_records::repositories::{
    BuildingRepository, InstallRepository, SqliteBuildingRepository, SqliteInstallRepository,
};
use core_records::create_test_pool;
use core_runtime::config::SyncSettings;
use core_sync::{PanoSyncCoordinator, SyncError};
use sqlx::SqlitePool;

const HOST: &str = "https://node-db.netlify.app/panoramas/";

// ============================================================================
// Stub Implementations
// ============================================================================

/// Listing source returning a fixed set of filenames, tracking call overlap
/// so mutual exclusion can be asserted.
struct StubSource {
    files: Vec<String>,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl StubSource {
    fn new(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(|f| f.to_string()).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl PanoramaSource for StubSource {
    async fn list_panorama_files(&self, _token: &str) -> BridgeResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        // Hold the "network call" open long enough for overlap to show.
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.files.clone())
    }
}

/// Listing source that always fails, as a dead branch lookup would.
struct FailingSource;

#[async_trait]
impl PanoramaSource for FailingSource {
    async fn list_panorama_files(&self, _token: &str) -> BridgeResult<Vec<String>> {
        Err(BridgeError::OperationFailed(
            "GitHub API error (status 502): bad gateway".to_string(),
        ))
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

async fn seed_install(pool: &SqlitePool, install_number: i64, panoramas: &[&str]) -> Building {
    let buildings = SqliteBuildingRepository::new(pool.clone());
    let installs = SqliteInstallRepository::new(pool.clone());

    let mut building = Building::new(40.6958, -73.9171);
    building.panoramas = panoramas.iter().map(|p| p.to_string()).collect();
    buildings.insert(&building).await.unwrap();

    let install = Install::new(install_number, building.id, InstallStatus::Active);
    installs.insert(&install).await.unwrap();

    building
}

async fn stored_panoramas(pool: &SqlitePool, building: &Building) -> Vec<String> {
    SqliteBuildingRepository::new(pool.clone())
        .find_by_id(&building.id)
        .await
        .unwrap()
        .unwrap()
        .panoramas
}

fn coordinator(
    pool: &SqlitePool,
    source: Arc<dyn PanoramaSource>,
    lock: Arc<dyn SyncLock>,
    token_env: &str,
) -> PanoSyncCoordinator {
    PanoSyncCoordinator::new(
        SyncSettings::default().token_env(token_env),
        source,
        lock,
        Arc::new(SqliteInstallRepository::new(pool.clone())),
        Arc::new(SqliteBuildingRepository::new(pool.clone())),
    )
}

fn lock() -> Arc<dyn SyncLock> {
    Arc::new(LocalSyncLock::new("update_panoramas_lock"))
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_end_to_end_mixed_listing() {
    std::env::set_var("PANO_TOKEN_E2E", "gh-token");
    let pool = create_test_pool().await.unwrap();
    let building = seed_install(&pool, 101, &[]).await;

    let source = Arc::new(StubSource::new(&[
        "IMG_100.jpg",
        "101 Roof.jpg",
        "bad!!.jpg",
    ]));
    let coordinator = coordinator(&pool, source, lock(), "PANO_TOKEN_E2E");

    let report = coordinator.sync().await.unwrap();

    // Only install 101 resolves: one file saved. 100 has no install record,
    // and the unparseable title is skipped without becoming a warning.
    assert_eq!(report.saved, 1);
    assert_eq!(report.warnings, vec!["100"]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].filename, "bad!!.jpg");

    assert_eq!(
        stored_panoramas(&pool, &building).await,
        vec![format!("{}101 Roof.jpg", HOST)]
    );
}

#[tokio::test]
async fn test_second_sync_over_unchanged_listing_is_idempotent() {
    std::env::set_var("PANO_TOKEN_IDEMPOTENT", "gh-token");
    let pool = create_test_pool().await.unwrap();
    let building = seed_install(&pool, 42, &[]).await;

    let source = Arc::new(StubSource::new(&["42.jpg", "42 Lobby.jpg"]));
    let coordinator = coordinator(&pool, source, lock(), "PANO_TOKEN_IDEMPOTENT");

    let first = coordinator.sync().await.unwrap();
    assert_eq!(first.saved, 2);
    let after_first = stored_panoramas(&pool, &building).await;

    let second = coordinator.sync().await.unwrap();
    // The fast path writes nothing and counts nothing.
    assert_eq!(second.saved, 0);
    assert!(second.warnings.is_empty());
    assert_eq!(stored_panoramas(&pool, &building).await, after_first);
}

#[tokio::test]
async fn test_sync_never_reorders_or_removes_existing_urls() {
    std::env::set_var("PANO_TOKEN_ORDER", "gh-token");
    let pool = create_test_pool().await.unwrap();
    let existing = [
        "https://node-db.netlify.app/panoramas/7 Front.jpg",
        "https://node-db.netlify.app/panoramas/7.jpg",
    ];
    let building = seed_install(&pool, 7, &existing).await;

    let source = Arc::new(StubSource::new(&["7.jpg", "7 Roof.jpg"]));
    let coordinator = coordinator(&pool, source, lock(), "PANO_TOKEN_ORDER");

    let report = coordinator.sync().await.unwrap();
    assert_eq!(report.saved, 2);

    assert_eq!(
        stored_panoramas(&pool, &building).await,
        vec![
            existing[0].to_string(),
            existing[1].to_string(),
            format!("{}7 Roof.jpg", HOST),
        ]
    );
}

#[tokio::test]
async fn test_partial_failure_is_isolated_per_identifier() {
    std::env::set_var("PANO_TOKEN_PARTIAL", "gh-token");
    let pool = create_test_pool().await.unwrap();
    let building = seed_install(&pool, 202, &[]).await;

    let source = Arc::new(StubSource::new(&["201.jpg", "202.jpg", "203.jpg"]));
    let coordinator = coordinator(&pool, source, lock(), "PANO_TOKEN_PARTIAL");

    let report = coordinator.sync().await.unwrap();

    assert_eq!(report.saved, 1);
    assert_eq!(report.warnings, vec!["201", "203"]);
    assert_eq!(
        stored_panoramas(&pool, &building).await,
        vec![format!("{}202.jpg", HOST)]
    );
}

#[tokio::test]
async fn test_missing_token_fails_before_any_network_call() {
    std::env::remove_var("PANO_TOKEN_NEVER_SET");
    let pool = create_test_pool().await.unwrap();

    let source = Arc::new(StubSource::new(&["1.jpg"]));
    let calls = Arc::clone(&source.calls);
    let coordinator = coordinator(&pool, source, lock(), "PANO_TOKEN_NEVER_SET");

    let err = coordinator.sync().await.unwrap_err();
    assert!(matches!(err, SyncError::Configuration(_)));
    assert_eq!(err.kind(), "ConfigurationError");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failing_source_aborts_with_remote_listing_error() {
    std::env::set_var("PANO_TOKEN_FAILSRC", "gh-token");
    let pool = create_test_pool().await.unwrap();
    seed_install(&pool, 5, &[]).await;

    let coordinator = coordinator(
        &pool,
        Arc::new(FailingSource),
        lock(),
        "PANO_TOKEN_FAILSRC",
    );

    let err = coordinator.sync().await.unwrap_err();
    assert!(matches!(err, SyncError::RemoteListing(_)));
    assert_eq!(err.kind(), "RemoteListingError");
}

#[tokio::test]
async fn test_empty_listing_is_a_remote_listing_error() {
    std::env::set_var("PANO_TOKEN_EMPTY", "gh-token");
    let pool = create_test_pool().await.unwrap();

    let source = Arc::new(StubSource::new(&[]));
    let coordinator = coordinator(&pool, source, lock(), "PANO_TOKEN_EMPTY");

    let err = coordinator.sync().await.unwrap_err();
    assert!(matches!(err, SyncError::RemoteListing(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_syncs_never_interleave() {
    std::env::set_var("PANO_TOKEN_CONCURRENT", "gh-token");
    let pool = create_test_pool().await.unwrap();
    let building = seed_install(&pool, 303, &[]).await;

    let shared_lock = lock();
    let source_a = Arc::new(StubSource::new(&["303.jpg"]));
    // The second invocation's source shares the overlap counters so
    // cross-invocation overlap is visible.
    let source_b = Arc::new(StubSource {
        files: source_a.files.clone(),
        calls: Arc::clone(&source_a.calls),
        in_flight: Arc::clone(&source_a.in_flight),
        max_in_flight: Arc::clone(&source_a.max_in_flight),
    });
    let max_in_flight = Arc::clone(&source_a.max_in_flight);

    let coord_a = Arc::new(coordinator(
        &pool,
        source_a,
        Arc::clone(&shared_lock),
        "PANO_TOKEN_CONCURRENT",
    ));
    let coord_b = Arc::new(coordinator(
        &pool,
        source_b,
        shared_lock,
        "PANO_TOKEN_CONCURRENT",
    ));

    let (first, second) = tokio::join!(
        tokio::spawn({
            let coord_a = Arc::clone(&coord_a);
            async move { coord_a.sync().await }
        }),
        tokio::spawn({
            let coord_b = Arc::clone(&coord_b);
            async move { coord_b.sync().await }
        }),
    );
    let first = first.unwrap().unwrap();
    let second = second.unwrap().unwrap();

    // The listing call sits inside the locked region, so overlap there means
    // the exclusion failed.
    assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);

    // Whichever invocation ran second observed the first one's write and hit
    // the fast path: exactly one save total, and no duplicate URL.
    assert_eq!(first.saved + second.saved, 1);
    assert_eq!(
        stored_panoramas(&pool, &building).await,
        vec![format!("{}303.jpg", HOST)]
    );
}
