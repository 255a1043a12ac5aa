//! GitHub API connector implementation
//!
//! Implements the `PanoramaSource` trait over the branch and recursive-tree
//! endpoints.

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpRequest};
use bridge_traits::source::PanoramaSource;
use core_runtime::config::SyncSettings;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{GitHubError, Result};
use crate::types::{BranchResponse, TreeResponse};

/// GitHub API connector
///
/// Resolves the configured branch to its tip tree and lists every regular
/// file under the configured directory. Each call is a single attempt with
/// the shared bounded timeout; any failure is fatal to the caller's sync.
pub struct GitHubConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Repository coordinates, API base, and timeout
    settings: SyncSettings,
}

impl GitHubConnector {
    /// Create a new GitHub connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `settings` - repository coordinates and API parameters
    pub fn new(http_client: Arc<dyn HttpClient>, settings: SyncSettings) -> Self {
        Self {
            http_client,
            settings,
        }
    }

    /// Execute a GET against the API and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        token: &str,
        what: &str,
    ) -> Result<T> {
        let request = HttpRequest::get(url)
            .header("Accept", "application/vnd.github+json")
            .bearer_token(token)
            .timeout(self.settings.external_api_timeout);

        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            warn!(status = response.status, what, "GitHub request failed");
            return Err(GitHubError::ApiError {
                status_code: response.status,
                message: response.text().unwrap_or_else(|_| "<non-utf8 body>".to_string()),
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| GitHubError::ParseError(format!("{}: {}", what, e)))
    }

    /// Resolve the configured branch to the SHA of its tip tree.
    ///
    /// The tree SHA is what the trees API wants; going through it lets one
    /// request list up to 100k entries / 7MB of data.
    #[instrument(skip(self, token))]
    pub async fn head_tree_sha(&self, token: &str) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/branches/{}",
            self.settings.api_base,
            self.settings.repo_owner,
            self.settings.repo_name,
            self.settings.branch
        );

        let branch: BranchResponse = self.get_json(url, token, "branch lookup").await?;
        debug!(sha = %branch.commit.commit.tree.sha, "Resolved branch tip tree");
        Ok(branch.commit.commit.tree.sha)
    }

    /// List the basenames of every regular file under the configured
    /// directory in the given tree.
    ///
    /// The directory test is a substring match on the full path, exactly as
    /// the panorama repository has always been filtered. A sibling directory
    /// whose name contains the target as a substring would also match.
    #[instrument(skip(self, token), fields(tree_sha = %tree_sha))]
    pub async fn list_directory_files(&self, tree_sha: &str, token: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.settings.api_base, self.settings.repo_owner, self.settings.repo_name, tree_sha
        );

        let listing: TreeResponse = self.get_json(url, token, "tree listing").await?;
        if listing.truncated {
            warn!(sha = %listing.sha, "GitHub tree listing was truncated");
        }

        let files: Vec<String> = listing
            .tree
            .into_iter()
            .filter(|entry| entry.is_blob() && entry.path.contains(&self.settings.directory))
            .map(|entry| basename(&entry.path).to_string())
            .collect();

        info!(files = files.len(), "Listed panorama candidates from GitHub");
        Ok(files)
    }
}

#[async_trait]
impl PanoramaSource for GitHubConnector {
    async fn list_panorama_files(&self, token: &str) -> bridge_traits::error::Result<Vec<String>> {
        let tree_sha = self.head_tree_sha(token).await?;
        Ok(self.list_directory_files(&tree_sha, token).await?)
    }
}

/// Final path segment of a tree entry path.
fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::BridgeError;
    use bridge_traits::http::HttpResponse;
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        Http {}

        #[async_trait]
        impl HttpClient for Http {
            async fn execute(
                &self,
                request: HttpRequest,
            ) -> bridge_traits::error::Result<HttpResponse>;
        }
    }

    fn test_settings() -> SyncSettings {
        SyncSettings::default()
            .repo_owner("nycmeshnet")
            .repo_name("node-db")
            .branch("master")
            .directory("data/panoramas")
    }

    fn ok_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from(body.as_bytes().to_vec()),
        }
    }

    const BRANCH_BODY: &str = r#"{
        "name": "master",
        "commit": {
            "sha": "commit-sha",
            "commit": {"tree": {"sha": "tree-sha-1"}}
        }
    }"#;

    const TREE_BODY: &str = r#"{
        "sha": "tree-sha-1",
        "tree": [
            {"path": "README.md", "type": "blob", "sha": "s0", "size": 12},
            {"path": "data/panoramas", "type": "tree", "sha": "s1"},
            {"path": "data/panoramas/IMG_100.jpg", "type": "blob", "sha": "s2", "size": 1},
            {"path": "data/panoramas/101 Roof.jpg", "type": "blob", "sha": "s3", "size": 2},
            {"path": "backup/data/panoramas-old/9.jpg", "type": "blob", "sha": "s4", "size": 3}
        ],
        "truncated": false
    }"#;

    #[tokio::test]
    async fn test_head_tree_sha() {
        let mut mock_http = MockHttp::new();
        mock_http.expect_execute().times(1).returning(|req| {
            assert!(req
                .url
                .ends_with("/repos/nycmeshnet/node-db/branches/master"));
            assert_eq!(
                req.headers.get("Authorization"),
                Some(&"Bearer tok".to_string())
            );
            assert!(req.timeout.is_some());
            Ok(ok_response(BRANCH_BODY))
        });

        let connector = GitHubConnector::new(Arc::new(mock_http), test_settings());
        let sha = connector.head_tree_sha("tok").await.unwrap();
        assert_eq!(sha, "tree-sha-1");
    }

    #[tokio::test]
    async fn test_list_directory_files_filters_and_basenames() {
        let mut mock_http = MockHttp::new();
        mock_http.expect_execute().times(1).returning(|req| {
            assert!(req.url.contains("/git/trees/tree-sha-1?recursive=1"));
            Ok(ok_response(TREE_BODY))
        });

        let connector = GitHubConnector::new(Arc::new(mock_http), test_settings());
        let files = connector
            .list_directory_files("tree-sha-1", "tok")
            .await
            .unwrap();

        // Tree entries and paths outside the directory are dropped; the
        // substring match intentionally admits "data/panoramas-old".
        assert_eq!(files, vec!["IMG_100.jpg", "101 Roof.jpg", "9.jpg"]);
    }

    #[tokio::test]
    async fn test_list_panorama_files_runs_both_calls() {
        let mut mock_http = MockHttp::new();
        mock_http.expect_execute().times(2).returning(|req| {
            if req.url.contains("/branches/") {
                Ok(ok_response(BRANCH_BODY))
            } else {
                assert!(req.url.contains("/git/trees/tree-sha-1"));
                Ok(ok_response(TREE_BODY))
            }
        });

        let connector = GitHubConnector::new(Arc::new(mock_http), test_settings());
        let files = connector.list_panorama_files("tok").await.unwrap();
        assert_eq!(files.len(), 3);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut mock_http = MockHttp::new();
        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 403,
                headers: HashMap::new(),
                body: Bytes::from_static(b"rate limited"),
            })
        });

        let connector = GitHubConnector::new(Arc::new(mock_http), test_settings());
        let err = connector.head_tree_sha("tok").await.unwrap_err();
        assert!(matches!(
            err,
            GitHubError::ApiError {
                status_code: 403,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let mut mock_http = MockHttp::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(ok_response(r#"{"commit": {}}"#)));

        let connector = GitHubConnector::new(Arc::new(mock_http), test_settings());
        let err = connector.head_tree_sha("tok").await.unwrap_err();
        assert!(matches!(err, GitHubError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let mut mock_http = MockHttp::new();
        mock_http.expect_execute().times(1).returning(|_| {
            Err(BridgeError::Timeout(std::time::Duration::from_secs(3)))
        });

        let connector = GitHubConnector::new(Arc::new(mock_http), test_settings());
        let err = connector.head_tree_sha("tok").await.unwrap_err();
        assert!(matches!(err, GitHubError::BridgeError(_)));
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("data/panoramas/IMG_100.jpg"), "IMG_100.jpg");
        assert_eq!(basename("IMG_100.jpg"), "IMG_100.jpg");
    }
}
