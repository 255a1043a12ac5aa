//! # Panorama Sync Module
//!
//! Synchronizes panorama image references from the remote repository into
//! building records.
//!
//! ## Overview
//!
//! One sync invocation, under a named advisory lock:
//! - Listing the candidate filenames via `PanoramaSource`
//! - Parsing each filename stem into an install number and optional label
//! - Grouping filenames by install number, recording unparseable titles
//! - Merging served URLs into each building's panorama sequence without
//!   duplicating or disturbing existing entries
//! - Aggregating saved counts and warning identifiers into a report
//!
//! ## Components
//!
//! - **Title Parser** (`title`): splits a filename stem into install number
//!   and label
//! - **Grouper** (`grouper`): builds insertion-ordered identifier groups
//! - **Reconciler** (`reconciler`): merges groups into building records
//! - **Sync Coordinator** (`coordinator`): lock, credential, and the
//!   fetch/group/reconcile sequencing
//! - **Report** (`report`): the per-invocation summary returned to callers

pub mod coordinator;
pub mod error;
pub mod grouper;
pub mod reconciler;
pub mod report;
pub mod title;

pub use coordinator::PanoSyncCoordinator;
pub use error::{Result, SyncError};
pub use grouper::{build_pano_groups, PanoGroups};
pub use reconciler::{ReconcileIssue, ReconcileOutcome, Reconciler};
pub use report::{RejectedTitle, SyncReport};
pub use title::{parse_pano_title, InvalidTitle, ParsedTitle};
