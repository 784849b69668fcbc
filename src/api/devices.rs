use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;

use crate::{api::access_token, error::ApiError, state::AppState};

#[tracing::instrument(name = "devices", skip_all)]
pub async fn devices(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let token = access_token(&state).await?;

    let devices = state
        .player
        .devices(&token)
        .await
        .map_err(|e| ApiError::spotify("Could not list devices", e))?;

    Ok(Json(devices))
}
