use std::sync::Arc;

use anyhow::Result;
use movie_tracker_http::AppState;
use movie_tracker_storage::SheetStore;

use crate::{ensure_parent_dir, get_sheet_path};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let sheet_path = get_sheet_path();
    ensure_parent_dir(&sheet_path)?;
    let sheet = SheetStore::new(&sheet_path)?;
    tracing::info!("Spreadsheet at {}", sheet_path.display());

    let state = Arc::new(AppState::new(sheet));
    let addr = format!("{host}:{port}");
    movie_tracker_http::serve(&addr, state).await?;
    Ok(())
}
