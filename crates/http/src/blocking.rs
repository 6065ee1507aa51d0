//! Run SQLite work off the async runtime.

use tokio::task::spawn_blocking;

use crate::api_error::ApiError;

/// Runs a blocking closure, mapping join and operation errors to [`ApiError`].
///
/// # Example
/// ```ignore
/// let sheet = Arc::clone(&state.sheet);
/// let rows = blocking_result(move || sheet.read_movies(Utc::now())).await?;
/// ```
pub async fn blocking_result<T, E, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("join error: {e}")))?
        .map_err(Into::into)
}
