//! # Spotify Integration Module
//!
//! Client side of the Spotify Web API as used by the server: one module
//! obtains access tokens, the other issues the player and search calls.
//!
//! ```text
//! HTTP handlers (api)
//!          ↓
//! TokenProvider ── RefreshTokenProvider ── POST /api/token
//! PlayerApi ────── SpotifyClient ───────── /v1/me/player/*, /v1/search
//! ```
//!
//! Handlers only see the two traits, so tests swap in doubles without any
//! network access. Every call is attempted exactly once: there is no retry
//! and no backoff, and a bounded timeout on the shared [`reqwest::Client`]
//! keeps a hung upstream from stalling a request indefinitely.
//!
//! A remote answer of 200 or 204 is a success. Anything else comes back as
//! [`SpotifyError::Remote`] with the status and body text, and failures to get
//! an answer at all come back as [`SpotifyError::Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{AuthError, SpotifyError},
    types::NowPlaying,
};

pub mod auth;
pub mod player;

pub use auth::RefreshTokenProvider;
pub use player::SpotifyClient;

/// Number of tracks returned by a search.
pub const SEARCH_LIMIT: u32 = 10;

/// Source of bearer tokens for the Web API.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn obtain_access_token(&self) -> Result<String, AuthError>;
}

/// The Web API operations the server forwards. Each method is one HTTP call.
///
/// `device_id` of `None` lets Spotify pick the active device.
#[async_trait]
pub trait PlayerApi: Send + Sync {
    async fn devices(&self, token: &str) -> Result<serde_json::Value, SpotifyError>;

    async fn search_tracks(
        &self,
        token: &str,
        query: &str,
    ) -> Result<serde_json::Value, SpotifyError>;

    async fn play(
        &self,
        token: &str,
        track_uri: &str,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError>;

    async fn pause(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError>;

    async fn resume(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError>;

    async fn now_playing(&self, token: &str) -> Result<NowPlaying, SpotifyError>;

    async fn set_volume(
        &self,
        token: &str,
        volume: u8,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError>;

    async fn next_track(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError>;

    async fn previous_track(
        &self,
        token: &str,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError>;
}

/// Builds the HTTP client shared by the token provider and the player client.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}
