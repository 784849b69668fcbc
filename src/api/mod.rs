//! # API Module
//!
//! HTTP handlers of the Spotify Cloud Server. Every protected handler runs the
//! same sequence:
//!
//! 1. validate the request input (400 on failure)
//! 2. obtain an access token from the [`TokenProvider`](crate::spotify::TokenProvider)
//!    (401 on failure, Spotify is not contacted)
//! 3. issue one call to the Web API through [`PlayerApi`](crate::spotify::PlayerApi)
//! 4. map the remote answer to a JSON response
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /`, `GET /health`
//! - [`devices`] - `GET /devices`
//! - [`search`] - `GET /search?q=`
//! - [`play`], [`pause`], [`resume`] - `POST /play`, `/pause`, `/resume`
//! - [`now_playing`] - `GET /now-playing`, `GET /current`
//! - [`volume`] - `POST /volume`
//! - [`next`], [`previous`] - `POST /next`, `/previous`
//!
//! Remote answers of 200 and 204 are both successes. Remote failures keep the
//! remote status code, transport failures become 500.

use axum::{Json, extract::rejection::JsonRejection};
use serde_json::Value;

use crate::{
    config::DeviceTarget, error::ApiError, state::AppState, types::DevicesResponse,
};

mod devices;
mod health;
mod now_playing;
mod playback;
mod search;
mod skip;
mod volume;

pub use devices::devices;
pub use health::health;
pub use now_playing::now_playing;
pub use playback::{pause, play, resume};
pub use search::search;
pub use skip::{next, previous};
pub use volume::{parse_volume, volume};

/// Runs the token exchange for the current request.
pub(crate) async fn access_token(state: &AppState) -> Result<String, ApiError> {
    state.tokens.obtain_access_token().await.map_err(|e| {
        tracing::warn!(error = %e, "token exchange failed.");
        ApiError::Authorization(e)
    })
}

/// Resolves the `device_id` to send along with a playback command.
pub(crate) async fn target_device(
    state: &AppState,
    token: &str,
) -> Result<Option<String>, ApiError> {
    match &state.device {
        DeviceTarget::Active => Ok(None),
        DeviceTarget::Fixed(id) => Ok(Some(id.clone())),
        DeviceTarget::FirstAvailable => {
            let devices = state
                .player
                .devices(token)
                .await
                .map_err(|e| ApiError::spotify("Could not list devices", e))?;

            // An unexpected shape is treated like an empty list.
            let first = serde_json::from_value::<DevicesResponse>(devices)
                .ok()
                .and_then(|res| res.devices.into_iter().next())
                .and_then(|device| device.id);

            if first.is_none() {
                tracing::debug!("no device listed, falling back to the active device.");
            }
            Ok(first)
        }
    }
}

/// Unwraps a JSON body, turning any rejection into a 400.
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(ApiError::validation(
            "Content-Type must be application/json",
        )),
        Err(rejection) => Err(ApiError::validation(format!(
            "invalid JSON body: {}",
            rejection.body_text()
        ))),
    }
}
