//! GitHub API response types
//!
//! Data structures for deserializing the two REST endpoints the provider
//! touches. Only the fields the sync reads are modeled; everything else in
//! the responses is ignored.

use serde::Deserialize;

/// `GET /repos/{owner}/{repo}/branches/{branch}` response
///
/// See: https://docs.github.com/rest/branches/branches#get-a-branch
#[derive(Debug, Deserialize)]
pub struct BranchResponse {
    /// Branch name
    pub name: String,

    /// Tip commit of the branch
    pub commit: BranchCommit,
}

/// Commit object at the branch tip
#[derive(Debug, Deserialize)]
pub struct BranchCommit {
    /// Commit SHA
    pub sha: String,

    /// Git commit detail (nested under the REST commit object)
    pub commit: CommitDetail,
}

/// Git commit detail holding the root tree reference
#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    /// Root tree of the commit
    pub tree: TreeRef,
}

/// Reference to a git tree
#[derive(Debug, Deserialize)]
pub struct TreeRef {
    /// Tree SHA
    pub sha: String,
}

/// `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1` response
///
/// See: https://docs.github.com/rest/git/trees#get-a-tree
#[derive(Debug, Deserialize)]
pub struct TreeResponse {
    /// SHA of the listed tree
    pub sha: String,

    /// Flattened entries of the tree
    pub tree: Vec<TreeEntry>,

    /// Whether the listing was cut off at the API's size limit
    #[serde(default)]
    pub truncated: bool,
}

/// One entry of a recursive tree listing
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root
    pub path: String,

    /// Entry kind: "blob", "tree", or "commit"
    #[serde(rename = "type")]
    pub entry_type: String,

    /// Object SHA (absent for some submodule entries)
    pub sha: Option<String>,

    /// Blob size in bytes (absent for trees)
    pub size: Option<u64>,
}

impl TreeEntry {
    /// Whether this entry is a regular file.
    pub fn is_blob(&self) -> bool {
        self.entry_type == "blob"
    }
}
