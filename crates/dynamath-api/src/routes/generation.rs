//! Routes for seeded generation and self-checks.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use dynamath_templates::{GenerationRequest, GenerationResult, Side, TemplateConfig, ValidationReport};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /generate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub template_id: String,
    pub seed: u32,
    #[serde(default)]
    pub config: TemplateConfig,
    #[serde(default)]
    pub side: Side,
}

/// Request body for POST /validate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub template_id: String,
    pub seed: u32,
    #[serde(default)]
    pub config: TemplateConfig,
}

/// POST /generate
#[instrument(skip(state, request), fields(template_id = %request.template_id, seed = request.seed))]
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationResult>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, side = %request.side, "handling generate request");

    let descriptor = state.renderer.registry().get(&request.template_id)?;
    let result = descriptor.generate(&GenerationRequest {
        seed: request.seed,
        config: request.config,
        side: request.side,
    })?;

    Ok(Json(result))
}

/// POST /validate
#[instrument(skip(state, request), fields(template_id = %request.template_id, seed = request.seed))]
async fn validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidationReport>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling validate request");

    let descriptor = state.renderer.registry().get(&request.template_id)?;
    let report = descriptor
        .validate(&GenerationRequest::new(request.seed).with_config(request.config))?
        .ok_or(ApiError::NoValidator(request.template_id))?;

    Ok(Json(report))
}

/// Returns the router for generation endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/validate", post(validate))
}
