use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::SyncError;
use crate::gitlab::merge_request::MergeRequest;
use crate::gitlab::MergeRequestSource;
use crate::notes::render;
use crate::notes::store::NoteStore;

/// Note that lists merge requests waiting on the user's review.
pub const REVIEW_REQUESTS_NOTE: &str = "Gitlab - Review Requests";
/// Note that lists the user's own open merge requests.
pub const MERGE_REQUESTS_NOTE: &str = "Gitlab - Merge Requests";

/// What one sync operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The note was rebuilt with this many entries.
    Completed { items: usize },
    /// The same operation was already in flight; this call did nothing.
    Skipped,
}

/// Rebuilds the two notes from the API: fetch, filter, sort, render, write.
///
/// The operations write disjoint documents and may run concurrently with
/// each other. Each operation individually is single-flight; a second call
/// while one is running returns [`SyncOutcome::Skipped`].
pub struct Synchronizer {
    source: Box<dyn MergeRequestSource>,
    store: NoteStore,
    review_guard: Mutex<()>,
    assigned_guard: Mutex<()>,
}

impl Synchronizer {
    pub fn new(source: Box<dyn MergeRequestSource>, store: NoteStore) -> Self {
        Self {
            source,
            store,
            review_guard: Mutex::new(()),
            assigned_guard: Mutex::new(()),
        }
    }

    /// Rebuild [`REVIEW_REQUESTS_NOTE`] from the merge requests where the
    /// user is a requested reviewer. Drafts are dropped.
    pub async fn sync_review_requests(&self) -> Result<SyncOutcome, SyncError> {
        let Ok(_guard) = self.review_guard.try_lock() else {
            info!("review-request sync already running, skipping");
            return Ok(SyncOutcome::Skipped);
        };

        let mut requests = self.source.fetch_review_requested().await?;
        requests.retain(|mr| !mr.draft);
        self.write_note(REVIEW_REQUESTS_NOTE, requests).await
    }

    /// Rebuild [`MERGE_REQUESTS_NOTE`] from the user's open merge requests,
    /// drafts included.
    pub async fn sync_merge_requests(&self) -> Result<SyncOutcome, SyncError> {
        let Ok(_guard) = self.assigned_guard.try_lock() else {
            info!("merge-request sync already running, skipping");
            return Ok(SyncOutcome::Skipped);
        };

        let requests = self.source.fetch_assigned().await?;
        self.write_note(MERGE_REQUESTS_NOTE, requests).await
    }

    /// Sort by project and rewrite the named note from scratch. Runs only
    /// after a successful fetch, so a transport failure leaves the previous
    /// content in place.
    async fn write_note(
        &self,
        name: &str,
        mut requests: Vec<MergeRequest>,
    ) -> Result<SyncOutcome, SyncError> {
        // Stable sort: requests within a project keep their fetch order.
        requests.sort_by_key(|mr| mr.project_id);

        let document = self.store.prepare_fresh(name).await?;
        for mr in &requests {
            debug!(note = name, title = %mr.title, "writing entry");
            self.store
                .append(&document, &render::note_block(mr))
                .await?;
        }

        info!(
            note = name,
            path = %document.path().display(),
            items = requests.len(),
            "note rebuilt"
        );
        Ok(SyncOutcome::Completed {
            items: requests.len(),
        })
    }
}
