use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::PairingResult,
    routes::AppState,
    services::pairing::recommend_pairing,
};

#[derive(Debug, Deserialize)]
pub struct PairingQuery {
    dish: Option<String>,
}

/// Handler for the pairing endpoint
pub async fn pair(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PairingQuery>,
) -> AppResult<Json<PairingResult>> {
    tracing::info!(
        request_id = %request_id,
        dish = params.dish.as_deref().unwrap_or_default(),
        generative = state.recommender.is_some(),
        "Pairing requested"
    );

    let result = recommend_pairing(
        state.catalog.as_ref(),
        state.recommender.as_deref(),
        &state.engine,
        state.jitter,
        params.dish.as_deref(),
    )
    .await?;

    Ok(Json(result))
}
