//! Error kinds for configuration, token exchange, Spotify calls and the HTTP
//! surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Startup configuration problems. Fatal: the server never starts with them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Failure to exchange the refresh token for an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint returned {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("token request failed: {0}")]
    Transport(String),

    #[error("token response is not usable: {0}")]
    InvalidResponse(String),
}

/// Outcome of a single call to the Spotify Web API that did not succeed.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Spotify answered with a status other than 200 or 204.
    #[error("{status} - {body}")]
    Remote { status: u16, body: String },

    /// The request never produced a response (refused, timed out, DNS).
    #[error("{0}")]
    Transport(String),

    /// Spotify answered 200 but the body could not be parsed as JSON.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl SpotifyError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        SpotifyError::Transport(err.to_string())
    }
}

/// Errors returned by the HTTP handlers. Each variant maps to one status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not obtain access token")]
    Authorization(#[from] AuthError),

    #[error("{context}: {source}")]
    Spotify {
        context: &'static str,
        #[source]
        source: SpotifyError,
    },

    /// Generic failure of a track-transition command.
    #[error("{0}")]
    Command(&'static str),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn spotify(context: &'static str, source: SpotifyError) -> Self {
        ApiError::Spotify { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Command(_) => StatusCode::BAD_REQUEST,
            ApiError::Authorization(_) => StatusCode::UNAUTHORIZED,
            ApiError::Spotify { source, .. } => match source {
                SpotifyError::Remote { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                SpotifyError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
                SpotifyError::Decode(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Authorization(err) => json!({
                "error": self.to_string(),
                "detail": err.to_string(),
            }),
            ApiError::Spotify {
                source: SpotifyError::Transport(text),
                ..
            } => json!({ "error": format!("Request failed: {text}") }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
