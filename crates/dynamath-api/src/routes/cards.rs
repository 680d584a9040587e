//! Routes for the review render flow.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use dynamath_templates::{CardRequest, RenderedCard};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /render
///
/// Renders one side of a card, handing the review seed from the front pass
/// to the back pass through the server's seed store.
#[instrument(skip(state, request), fields(template_id = %request.template_id, side = %request.side))]
async fn render_card(
    State(state): State<AppState>,
    Json(request): Json<CardRequest>,
) -> Result<Json<RenderedCard>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling render request");

    let card = state.renderer.render(&request)?;

    Ok(Json(card))
}

/// Returns the router for card rendering.
pub fn router() -> Router<AppState> {
    Router::new().route("/render", post(render_card))
}
