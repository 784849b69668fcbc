use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// Body of a successful answer from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_active: bool,
    pub volume_percent: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub name: String,
    pub kind: String,
    pub active: String,
    pub volume: String,
    pub id: String,
}

impl From<Device> for DeviceTableRow {
    fn from(device: Device) -> Self {
        DeviceTableRow {
            name: device.name,
            kind: device.kind,
            active: if device.is_active { "yes" } else { "no" }.to_string(),
            volume: device
                .volume_percent
                .map(|v| format!("{v}%"))
                .unwrap_or_else(|| "-".to_string()),
            id: device.id.unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Player state as reported by `GET /me/player`.
#[derive(Debug, Clone, PartialEq)]
pub enum NowPlaying {
    Playing(Value),
    /// Spotify answered 204: no active playback session.
    Nothing,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Uniform success shape of the playback commands.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u8>,
}

impl CommandResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        CommandResponse {
            success: true,
            message: message.into(),
            volume: None,
        }
    }
}

/// Answer of `next` and `previous`: the player state re-queried after the
/// skip, `null` when nothing is playing or the re-query failed.
#[derive(Debug, Clone, Serialize)]
pub struct TrackChangeResponse {
    pub success: bool,
    pub message: String,
    pub now_playing: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}
