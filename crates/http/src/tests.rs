use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::IntoResponse;
use movie_tracker_core::{AppendResponse, MovieId, ReadResponse};
use movie_tracker_storage::{SheetStore, StorageError};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::api_error::{ApiError, ReadError};
use crate::{AppState, create_router};

fn setup() -> (Router, Arc<AppState>, TempDir) {
    let dir = TempDir::new().unwrap();
    let sheet = SheetStore::new(&dir.path().join("sheet.db")).unwrap();
    let state = Arc::new(AppState::new(sheet));
    (create_router(Arc::clone(&state)), state, dir)
}

fn post_json(body: &str) -> Request<Body> {
    Request::post("/exec")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (router, _state, _dir) = setup();
    let response =
        router.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_sheet_reads_no_movies() {
    let (router, _state, _dir) = setup();
    let response =
        router.oneshot(Request::get("/exec").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let envelope: ReadResponse = body_json(response).await;
    assert!(envelope.success);
    assert!(envelope.movies.is_empty());
}

#[tokio::test]
async fn append_then_read_round_trips_through_year_tab() {
    let (router, state, _dir) = setup();

    let response = router
        .clone()
        .oneshot(post_json(r#"{"title":" Dune ","score":2,"notes":" sand ","date":"2021-10-22"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let envelope: AppendResponse = body_json(response).await;
    assert_eq!(envelope, AppendResponse::ok());

    let rows = state.sheet.read_tab("2021").unwrap().unwrap();
    assert_eq!(rows[0], vec!["Title", "Score", "Notes"]);
    assert_eq!(rows[1], vec!["Dune", "2", "sand"]);

    let response =
        router.oneshot(Request::get("/exec").body(Body::empty()).unwrap()).await.unwrap();
    let envelope: ReadResponse = body_json(response).await;
    assert_eq!(envelope.movies.len(), 1);
    let movie = &envelope.movies[0];
    assert_eq!(movie.title.as_deref(), Some("Dune"));
    assert_eq!(movie.year, Some(2021));
    assert_eq!(movie.date.as_deref(), Some("2021-01-01"));
    assert_eq!(movie.id, Some(MovieId::stable("Dune", 2021)));
}

#[tokio::test]
async fn explicit_year_picks_the_tab() {
    let (router, state, _dir) = setup();
    let response = router
        .oneshot(post_json(r#"{"title":"Heat","score":1,"date":"2024-03-01","year":1995}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.sheet.tab_names().unwrap(), vec!["1995"]);
}

#[tokio::test]
async fn blank_title_is_rejected_with_envelope() {
    let (router, state, _dir) = setup();
    let response =
        router.oneshot(post_json(r#"{"title":"  ","score":1,"date":"2021-01-01"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: AppendResponse = body_json(response).await;
    assert!(!envelope.success);
    assert!(envelope.error.is_some());
    assert!(state.sheet.tab_names().unwrap().is_empty());
}

#[tokio::test]
async fn unresolvable_year_is_rejected() {
    let (router, _state, _dir) = setup();
    let response =
        router.oneshot(post_json(r#"{"title":"Dune","score":1,"date":"soon"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_rejected_with_envelope() {
    let (router, _state, _dir) = setup();
    let response = router.oneshot(post_json("{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: AppendResponse = body_json(response).await;
    assert!(!envelope.success);
}

#[tokio::test]
async fn year_outside_tab_range_is_rejected_and_not_stored() {
    let (router, state, _dir) = setup();
    let response = router
        .oneshot(post_json(r#"{"title":"Future","score":1,"date":"2020-01-01","year":12345}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: AppendResponse = body_json(response).await;
    assert!(envelope.error.unwrap().contains("12345"));
    assert!(state.sheet.tab_names().unwrap().is_empty());
}

fn busy_error() -> StorageError {
    StorageError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
        None,
    ))
}

#[tokio::test]
async fn busy_spreadsheet_answers_503_so_clients_retry() {
    let response = ApiError::from(busy_error()).into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let envelope: AppendResponse = body_json(response).await;
    assert!(!envelope.success);

    let response = ReadError::from(ApiError::from(busy_error())).into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let envelope: ReadResponse = body_json(response).await;
    assert!(envelope.movies.is_empty());
}

#[tokio::test]
async fn other_storage_failures_answer_500() {
    let err = StorageError::Migration("schema too new".to_owned());
    let response = ApiError::from(err).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
