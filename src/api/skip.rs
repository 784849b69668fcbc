use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;

use crate::{
    api::{access_token, target_device},
    error::ApiError,
    state::AppState,
    types::{NowPlaying, TrackChangeResponse},
};

#[derive(Debug, Clone, Copy)]
enum Skip {
    Next,
    Previous,
}

impl Skip {
    fn success(self) -> &'static str {
        match self {
            Skip::Next => "Skipped to next track",
            Skip::Previous => "Went back to previous track",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            Skip::Next => "Could not skip to next track",
            Skip::Previous => "Could not go back to previous track",
        }
    }
}

#[tracing::instrument(name = "next", skip_all)]
pub async fn next(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrackChangeResponse>, ApiError> {
    change_track(&state, Skip::Next).await
}

#[tracing::instrument(name = "previous", skip_all)]
pub async fn previous(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TrackChangeResponse>, ApiError> {
    change_track(&state, Skip::Previous).await
}

/// Sends the skip, waits for Spotify to settle, then reports what is playing.
async fn change_track(
    state: &AppState,
    skip: Skip,
) -> Result<Json<TrackChangeResponse>, ApiError> {
    let token = access_token(state).await?;
    let device = match target_device(state, &token).await {
        Ok(device) => device,
        Err(e) => {
            tracing::warn!(error = %e, ?skip, "could not resolve the target device.");
            return Err(ApiError::Command(skip.failure()));
        }
    };

    let result = match skip {
        Skip::Next => state.player.next_track(&token, device.as_deref()).await,
        Skip::Previous => state.player.previous_track(&token, device.as_deref()).await,
    };
    if let Err(e) = result {
        tracing::warn!(error = %e, ?skip, "track change failed.");
        return Err(ApiError::Command(skip.failure()));
    }

    if !state.track_change_delay.is_zero() {
        tokio::time::sleep(state.track_change_delay).await;
    }

    let now_playing = match state.player.now_playing(&token).await {
        Ok(NowPlaying::Playing(body)) => body,
        Ok(NowPlaying::Nothing) => Value::Null,
        Err(e) => {
            tracing::warn!(error = %e, "could not re-query the current track.");
            Value::Null
        }
    };

    Ok(Json(TrackChangeResponse {
        success: true,
        message: skip.success().to_string(),
        now_playing,
    }))
}
