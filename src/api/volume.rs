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

/// Extracts `volume` from the body. Only JSON integers in `0..=100` are
/// accepted: strings, floats and booleans are not.
pub fn parse_volume(body: &Value) -> Option<u8> {
    let volume = body.get("volume")?.as_i64()?;
    u8::try_from(volume).ok().filter(|v| *v <= 100)
}

#[tracing::instrument(name = "volume", skip_all)]
pub async fn volume(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let body = json_body(payload)?;
    let Some(volume) = parse_volume(&body) else {
        return Err(ApiError::validation(
            "volume must be an integer between 0 and 100",
        ));
    };

    let token = access_token(&state).await?;
    let device = target_device(&state, &token).await?;

    state
        .player
        .set_volume(&token, volume, device.as_deref())
        .await
        .map_err(|e| ApiError::spotify("Could not set volume", e))?;

    Ok(Json(CommandResponse {
        volume: Some(volume),
        ..CommandResponse::ok(format!("Volume set to {volume}%"))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_the_inclusive_range() {
        assert_eq!(parse_volume(&json!({ "volume": 0 })), Some(0));
        assert_eq!(parse_volume(&json!({ "volume": 55 })), Some(55));
        assert_eq!(parse_volume(&json!({ "volume": 100 })), Some(100));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(parse_volume(&json!({ "volume": -1 })), None);
        assert_eq!(parse_volume(&json!({ "volume": 101 })), None);
        assert_eq!(parse_volume(&json!({ "volume": 256 })), None);
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(parse_volume(&json!({ "volume": "50" })), None);
        assert_eq!(parse_volume(&json!({ "volume": 50.5 })), None);
        assert_eq!(parse_volume(&json!({ "volume": true })), None);
        assert_eq!(parse_volume(&json!({ "volume": null })), None);
        assert_eq!(parse_volume(&json!({})), None);
        assert_eq!(parse_volume(&json!([50])), None);
    }
}
