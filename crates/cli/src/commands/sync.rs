use anyhow::Result;
use movie_tracker_service::SyncOutcome;

use super::open_tracker;

pub(crate) async fn run() -> Result<()> {
    let (tracker, outcome) = open_tracker(false).await?;
    match outcome {
        Some(SyncOutcome::Remote { report, cached }) => {
            println!(
                "Synced {} movies ({} duplicates, {} invalid rows dropped)",
                report.kept, report.duplicates_dropped, report.invalid_dropped
            );
            if !cached {
                println!("Warning: local cache could not be updated");
            }
        },
        Some(SyncOutcome::UsedCache { reason }) => {
            println!(
                "RemoteStore unavailable ({reason}); keeping {} cached movies",
                tracker.movies().len()
            );
        },
        None => {},
    }
    Ok(())
}
