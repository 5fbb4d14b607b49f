use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;
use crate::gitlab::merge_request::MergeRequest;
use crate::gitlab::MergeRequestSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Records requested per call. The client reads a single page, so this is
/// also the cap on how many merge requests one sync can see.
const PAGE_SIZE: u32 = 100;

/// Thin client over the GitLab REST API.
///
/// Authentication is a `PRIVATE-TOKEN` header on every request. The client
/// holds no mutable state; one instance is reused across calls.
pub struct GitlabClient {
    base_url: String,
    token: String,
    username: String,
    client: reqwest::Client,
}

impl GitlabClient {
    pub fn new(base_url: String, token: String, username: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            username,
            client: reqwest::Client::new(),
        }
    }

    fn list_url(&self, query: &str) -> String {
        format!("{}/merge_requests?{}", self.base_url, query)
    }

    fn assigned_query() -> String {
        format!("state=opened&scope=assigned_to_me&per_page={PAGE_SIZE}")
    }

    fn review_query(&self) -> String {
        format!(
            "reviewer_username={}&per_page={PAGE_SIZE}",
            urlencoding::encode(&self.username)
        )
    }

    /// Fetch one page of merge requests and decode it. A body the decoder
    /// rejects is reported as [`TransportError::Payload`].
    async fn fetch(&self, query: &str) -> Result<Vec<MergeRequest>, TransportError> {
        let url = self.list_url(query);
        let response = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| TransportError::Payload { url, source })
    }
}

#[async_trait]
impl MergeRequestSource for GitlabClient {
    async fn fetch_assigned(&self) -> Result<Vec<MergeRequest>, TransportError> {
        debug!(username = %self.username, "fetching open merge requests");
        self.fetch(&Self::assigned_query()).await
    }

    async fn fetch_review_requested(&self) -> Result<Vec<MergeRequest>, TransportError> {
        debug!(username = %self.username, "fetching review requests");
        self.fetch(&self.review_query()).await
    }
}
