use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use movie_tracker_core::{AppendRequest, AppendResponse, ReadResponse};

use crate::AppState;
use crate::api_error::{ApiError, ReadError};
use crate::blocking::blocking_result;

/// Full read: every data row of every year tab, in tab creation order.
pub async fn read_all(State(state): State<Arc<AppState>>) -> Result<Json<ReadResponse>, ReadError> {
    let sheet = Arc::clone(&state.sheet);
    let movies = blocking_result(move || sheet.read_movies(Utc::now())).await?;
    tracing::debug!(rows = movies.len(), "served full read");
    Ok(Json(ReadResponse::ok(movies)))
}

/// Append one movie to the tab for its year, creating the tab if needed.
pub async fn append(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AppendRequest>, JsonRejection>,
) -> Result<Json<AppendResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (title, year) = request.validate()?;
    let title = title.to_owned();
    let notes = request.notes.as_deref().map(str::trim).unwrap_or_default().to_owned();
    let score = request.score;

    let sheet = Arc::clone(&state.sheet);
    let logged_title = title.clone();
    blocking_result(move || sheet.append_movie(year, &title, score, &notes)).await?;

    tracing::info!(title = %logged_title, year, score, "appended movie");
    Ok(Json(AppendResponse::ok()))
}
