//! Dynamath: HTTP host for the flashcard generators.

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use crate::state::AppState;

/// Builds the application router without state or middleware layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/templates", routes::templates::router())
        .nest("/api/v1", routes::generation::router())
        .nest("/api/v1/cards", routes::cards::router())
}
