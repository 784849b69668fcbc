use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    config::DeviceTarget,
    error::{AuthError, SpotifyError},
    spotify::{PlayerApi, TokenProvider},
    state::AppState,
    types::NowPlaying,
};

// Token source with a fixed outcome that counts how often it was asked.
pub(crate) struct StubTokens {
    token: Option<String>,
    calls: AtomicUsize,
}

impl StubTokens {
    pub(crate) fn ok(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            token: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for StubTokens {
    async fn obtain_access_token(&self) -> Result<String, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.token.clone().ok_or(AuthError::Rejected {
            status: 400,
            body: r#"{"error":"invalid_grant"}"#.to_string(),
        })
    }
}

/// What the fake player answers to every command.
#[derive(Clone)]
pub(crate) enum Outcome {
    Success,
    Remote(u16, &'static str),
    Transport(&'static str),
}

impl Outcome {
    fn result(&self) -> Result<(), SpotifyError> {
        match self {
            Outcome::Success => Ok(()),
            Outcome::Remote(status, body) => Err(SpotifyError::Remote {
                status: *status,
                body: body.to_string(),
            }),
            Outcome::Transport(text) => Err(SpotifyError::Transport(text.to_string())),
        }
    }
}

/// One recorded call: operation name, token, argument, device id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub op: &'static str,
    pub token: String,
    pub arg: Option<String>,
    pub device: Option<String>,
}

pub(crate) struct RecordingPlayer {
    outcome: Outcome,
    now_playing: NowPlaying,
    devices: Value,
    calls: Mutex<Vec<Call>>,
}

impl RecordingPlayer {
    pub(crate) fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            now_playing: NowPlaying::Nothing,
            devices: json!({ "devices": [] }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_now_playing(mut self, now_playing: NowPlaying) -> Self {
        self.now_playing = now_playing;
        self
    }

    pub(crate) fn with_devices(mut self, devices: Value) -> Self {
        self.devices = devices;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(crate) fn ops(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|call| call.op).collect()
    }

    fn record(&self, op: &'static str, token: &str, arg: Option<String>, device: Option<&str>) {
        self.calls.lock().expect("calls mutex poisoned").push(Call {
            op,
            token: token.to_string(),
            arg,
            device: device.map(str::to_string),
        });
    }
}

#[async_trait]
impl PlayerApi for RecordingPlayer {
    async fn devices(&self, token: &str) -> Result<Value, SpotifyError> {
        self.record("devices", token, None, None);
        self.outcome.result().map(|_| self.devices.clone())
    }

    async fn search_tracks(&self, token: &str, query: &str) -> Result<Value, SpotifyError> {
        self.record("search", token, Some(query.to_string()), None);
        self.outcome
            .result()
            .map(|_| json!({ "tracks": { "items": [{ "uri": "spotify:track:abc123" }] } }))
    }

    async fn play(
        &self,
        token: &str,
        track_uri: &str,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError> {
        self.record("play", token, Some(track_uri.to_string()), device_id);
        self.outcome.result()
    }

    async fn pause(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError> {
        self.record("pause", token, None, device_id);
        self.outcome.result()
    }

    async fn resume(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError> {
        self.record("resume", token, None, device_id);
        self.outcome.result()
    }

    async fn now_playing(&self, token: &str) -> Result<NowPlaying, SpotifyError> {
        self.record("now_playing", token, None, None);
        self.outcome.result().map(|_| self.now_playing.clone())
    }

    async fn set_volume(
        &self,
        token: &str,
        volume: u8,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError> {
        self.record("volume", token, Some(volume.to_string()), device_id);
        self.outcome.result()
    }

    async fn next_track(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError> {
        self.record("next", token, None, device_id);
        self.outcome.result()
    }

    async fn previous_track(
        &self,
        token: &str,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError> {
        self.record("previous", token, None, device_id);
        self.outcome.result()
    }
}

pub(crate) fn state_with(
    tokens: Arc<StubTokens>,
    player: Arc<RecordingPlayer>,
    device: DeviceTarget,
) -> Arc<AppState> {
    Arc::new(AppState {
        tokens,
        player,
        device,
        track_change_delay: Duration::ZERO,
    })
}
