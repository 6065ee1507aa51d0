pub(crate) mod add;
pub(crate) mod serve;
pub(crate) mod sync;
pub(crate) mod view;

use anyhow::Result;
use movie_tracker_service::{SheetsTracker, SyncOutcome};

use crate::get_cache_path;

/// Load the tracker from the cache and, unless `offline`, reconcile it.
pub(crate) async fn open_tracker(offline: bool) -> Result<(SheetsTracker, Option<SyncOutcome>)> {
    let mut tracker = SheetsTracker::from_env(get_cache_path())?;
    if offline {
        return Ok((tracker, None));
    }
    let outcome = tracker.refresh().await;
    Ok((tracker, Some(outcome)))
}
