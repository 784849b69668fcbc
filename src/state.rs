use std::{sync::Arc, time::Duration};

use crate::{
    Res,
    config::{Config, DeviceTarget},
    spotify::{self, PlayerApi, RefreshTokenProvider, SpotifyClient, TokenProvider},
};

/// Read-only state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    // Trait objects so tests can hand in doubles.
    pub tokens: Arc<dyn TokenProvider>,
    pub player: Arc<dyn PlayerApi>,
    pub device: DeviceTarget,
    pub track_change_delay: Duration,
}

impl AppState {
    /// Wires the real token provider and Web API client from the configuration.
    pub fn from_config(config: &Config) -> Res<Self> {
        let http = spotify::http_client(config.request_timeout)?;

        let provider = RefreshTokenProvider::new(
            http.clone(),
            config.token_url.clone(),
            config.credentials.clone(),
        );
        let provider = if config.cache_tokens {
            provider.with_cache()
        } else {
            provider
        };

        Ok(AppState {
            tokens: Arc::new(provider),
            player: Arc::new(SpotifyClient::new(http, config.api_url.clone())),
            device: config.device.clone(),
            track_change_delay: config.track_change_delay,
        })
    }
}
