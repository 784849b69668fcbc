use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    api::access_token,
    error::ApiError,
    state::AppState,
    types::{MessageResponse, NowPlaying},
};

pub const NOTHING_PLAYING: &str = "Nothing is currently playing";

#[tracing::instrument(name = "now_playing", skip_all)]
pub async fn now_playing(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let token = access_token(&state).await?;

    let playing = state
        .player
        .now_playing(&token)
        .await
        .map_err(|e| ApiError::spotify("Could not get the current track", e))?;

    Ok(match playing {
        NowPlaying::Playing(body) => Json(body).into_response(),
        NowPlaying::Nothing => Json(MessageResponse {
            message: NOTHING_PLAYING.to_string(),
        })
        .into_response(),
    })
}
