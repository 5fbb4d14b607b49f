use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::error::SyncError;
use crate::sync::Synchronizer;

/// Run one full pass: review requests first, then assigned merge requests.
///
/// Both operations are attempted even when the first fails; the first error
/// is returned once both have finished.
pub async fn run_once(sync: &Synchronizer) -> Result<(), SyncError> {
    info!("updating gitlab notes");

    let mut first_error = None;
    if let Err(e) = sync.sync_review_requests().await {
        error!(error = %e, "review-request sync failed");
        first_error = Some(e);
    }
    if let Err(e) = sync.sync_merge_requests().await {
        error!(error = %e, "merge-request sync failed");
        first_error.get_or_insert(e);
    }

    match first_error {
        None => {
            info!("gitlab notes updated");
            Ok(())
        }
        Some(e) => Err(e),
    }
}

fn sync_period(interval_minutes: u64) -> Duration {
    Duration::from_secs(interval_minutes.saturating_mul(60))
}

/// Run a pass immediately, then one per interval until ctrl-c.
///
/// A failed pass is logged and the next tick retries from scratch; shutdown
/// is only observed between passes, so a pass that has started always runs
/// to completion.
pub async fn run(sync: &Synchronizer, interval_minutes: u64) -> Result<()> {
    let mut ticker = tokio::time::interval(sync_period(interval_minutes));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(interval_minutes, "watching gitlab");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = run_once(sync).await {
                    error!(error = %e, "sync pass failed");
                }
            }
            result = &mut shutdown => {
                result.context("failed to listen for ctrl-c")?;
                info!("shutting down");
                return Ok(());
            }
        }
    }
}
