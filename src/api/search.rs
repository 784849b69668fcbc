use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::{api::access_token, error::ApiError, state::AppState, types::SearchParams};

#[tracing::instrument(name = "search", skip_all, fields(q = ?params.q))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let query = match params.q {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(ApiError::validation("q parameter is required")),
    };

    let token = access_token(&state).await?;

    let results = state
        .player
        .search_tracks(&token, &query)
        .await
        .map_err(|e| ApiError::spotify("Could not search tracks", e))?;

    Ok(Json(results))
}
