//! Grouping filenames by install number
//!
//! Bridges the flat remote listing and the per-identifier reconciliation:
//! filenames that parse to the same install number form one group, in
//! encounter order. Unparseable titles are recorded and skipped; they never
//! abort the run.

use indexmap::IndexMap;
use tracing::warn;

use crate::report::RejectedTitle;
use crate::title::{parse_pano_title, title_stem};

/// Filenames keyed by install number, iterated in first-encounter order.
pub type PanoGroups = IndexMap<String, Vec<String>>;

/// Group the listed filenames by their parsed install number.
///
/// Returns the groups plus the titles that did not parse, in encounter
/// order. The ORIGINAL filename (extension and all) is what lands in a
/// group; only the stem is parsed.
pub fn build_pano_groups(files: &[String]) -> (PanoGroups, Vec<RejectedTitle>) {
    let mut groups = PanoGroups::new();
    let mut rejected = Vec::new();

    for filename in files {
        match parse_pano_title(title_stem(filename)) {
            Ok(parsed) => {
                groups
                    .entry(parsed.number)
                    .or_insert_with(Vec::new)
                    .push(filename.clone());
            }
            Err(err) => {
                warn!(filename = %filename, error = %err, "Skipping unparseable panorama title");
                rejected.push(RejectedTitle {
                    filename: filename.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    (groups, rejected)
}
