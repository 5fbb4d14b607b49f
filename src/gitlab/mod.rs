pub mod client;
pub mod merge_request;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::gitlab::merge_request::MergeRequest;

/// A remote source of merge-request records.
///
/// The production implementation is [`client::GitlabClient`]; tests
/// substitute in-memory sources. Implementations return records as the
/// server ordered them and leave filtering and sorting to the caller.
#[async_trait]
pub trait MergeRequestSource: Send + Sync {
    /// Merge requests in the opened state that are assigned to the
    /// configured user, drafts included.
    async fn fetch_assigned(&self) -> Result<Vec<MergeRequest>, TransportError>;

    /// Merge requests where the configured user is a requested reviewer,
    /// in any state.
    async fn fetch_review_requested(&self) -> Result<Vec<MergeRequest>, TransportError>;
}
