use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{
    api::{access_token, json_body, target_device},
    error::ApiError,
    state::AppState,
    types::CommandResponse,
};

#[tracing::instrument(name = "play", skip_all)]
pub async fn play(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let body = json_body(payload)?;
    let track_uri = match body.get("track_uri").and_then(Value::as_str) {
        Some(uri) if !uri.is_empty() => uri.to_string(),
        _ => return Err(ApiError::validation("track_uri is required")),
    };

    let token = access_token(&state).await?;
    let device = target_device(&state, &token).await?;

    state
        .player
        .play(&token, &track_uri, device.as_deref())
        .await
        .map_err(|e| ApiError::spotify("Could not play track", e))?;

    tracing::info!(%track_uri, device = ?device, "playback started.");
    Ok(Json(CommandResponse::ok("Track is now playing")))
}

#[tracing::instrument(name = "pause", skip_all)]
pub async fn pause(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, ApiError> {
    let token = access_token(&state).await?;
    let device = target_device(&state, &token).await?;

    state
        .player
        .pause(&token, device.as_deref())
        .await
        .map_err(|e| ApiError::spotify("Could not pause playback", e))?;

    Ok(Json(CommandResponse::ok("Playback paused")))
}

#[tracing::instrument(name = "resume", skip_all)]
pub async fn resume(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CommandResponse>, ApiError> {
    let token = access_token(&state).await?;
    let device = target_device(&state, &token).await?;

    state
        .player
        .resume(&token, device.as_deref())
        .await
        .map_err(|e| ApiError::spotify("Could not resume playback", e))?;

    Ok(Json(CommandResponse::ok("Playback resumed")))
}
