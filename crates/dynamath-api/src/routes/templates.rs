//! Routes for browsing the template registry.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use dynamath_templates::TemplateMeta;
use serde::Serialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// A registered template and its metadata.
#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: String,
    #[serde(flatten)]
    pub meta: TemplateMeta,
}

/// GET /
#[instrument(skip(state))]
async fn list_templates(State(state): State<AppState>) -> Json<Vec<TemplateSummary>> {
    let summaries = state
        .renderer
        .registry()
        .iter()
        .map(|(id, descriptor)| TemplateSummary {
            id: id.to_owned(),
            meta: descriptor.meta.clone(),
        })
        .collect();
    Json(summaries)
}

/// GET /{*id}
///
/// Template ids contain `/`, hence the wildcard.
#[instrument(skip(state))]
async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TemplateSummary>, ApiError> {
    let descriptor = state.renderer.registry().get(&id)?;
    Ok(Json(TemplateSummary {
        meta: descriptor.meta.clone(),
        id,
    }))
}

/// Returns the router for the template registry.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates))
        .route("/{*id}", get(get_template))
}
