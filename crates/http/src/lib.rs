//! HTTP server for movie-tracker.
//!
//! Serves the RemoteStore endpoint over a [`SheetStore`]: one URL, `GET` for
//! a full read of every year tab and `POST` to append a row.

#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod blocking;
mod handlers;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use movie_tracker_storage::SheetStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// The spreadsheet backing the endpoint.
    pub sheet: Arc<SheetStore>,
}

impl AppState {
    #[must_use]
    pub fn new(sheet: SheetStore) -> Self {
        Self { sheet: Arc::new(sheet) }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/exec", get(handlers::exec::read_all).post(handlers::exec::append))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting RemoteStore server on {}", listener.local_addr()?);
    axum::serve(listener, router).await
}

async fn health() -> &'static str {
    "ok"
}
