//! Configuration management for the Spotify Cloud Server.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. The configuration is read once at startup into a [`Config`] and
//! validated there: every missing required key is reported at once instead of
//! surfacing later as per-request authorization failures.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory
//! 4. Application defaults (where applicable)

use dotenv;
use std::{env, fmt, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Spotify needs a moment after a skip before the player state reflects it.
pub const DEFAULT_TRACK_CHANGE_DELAY: Duration = Duration::from_millis(500);

const CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
const REFRESH_TOKEN: &str = "SPOTIFY_REFRESH_TOKEN";
const DEVICE_ID: &str = "SPOTIFY_DEVICE_ID";
const DEVICE_SELECTION: &str = "SPOTIFY_DEVICE_SELECTION";
const API_URL: &str = "SPOTIFY_API_URL";
const TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
const REQUEST_TIMEOUT_SECS: &str = "SPOTIFY_REQUEST_TIMEOUT_SECS";
const TRACK_CHANGE_DELAY_MS: &str = "SPOTIFY_TRACK_CHANGE_DELAY_MS";
const TOKEN_CACHE: &str = "SPOTIFY_TOKEN_CACHE";
const HOST: &str = "HOST";
const PORT: &str = "PORT";

/// Loads environment variables from `.env` files.
///
/// A `.env` in the working directory is read first, then `spotcloud/.env`
/// in the platform-specific local data directory:
/// - Linux: `~/.local/share/spotcloud/.env`
/// - macOS: `~/Library/Application Support/spotcloud/.env`
/// - Windows: `%LOCALAPPDATA%/spotcloud/.env`
///
/// Neither file is required. Variables that are already set in the process
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or if an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotcloud/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// OAuth client credentials and the long-lived refresh token.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

/// Which playback device commands are sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceTarget {
    /// Let Spotify use whichever device is currently active.
    Active,
    /// Always target this device id.
    Fixed(String),
    /// Look up the device list before each command and use the first entry.
    /// An empty list, or a first entry without an id, falls back to `Active`.
    FirstAvailable,
}

/// Validated process configuration, immutable for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub device: DeviceTarget,
    pub api_url: String,
    pub token_url: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub track_change_delay: Duration,
    pub cache_tokens: bool,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_env()?;
    /// println!("listening on {}", config.server_addr());
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset. All missing required keys are collected
    /// into a single [`ConfigError::Missing`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let client_id = required(CLIENT_ID);
        let client_secret = required(CLIENT_SECRET);
        let refresh_token = required(REFRESH_TOKEN);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let device = match (get(DEVICE_ID), get(DEVICE_SELECTION)) {
            (Some(id), _) => DeviceTarget::Fixed(id),
            (None, None) => DeviceTarget::Active,
            (None, Some(selection)) => match selection.to_lowercase().as_str() {
                "active" => DeviceTarget::Active,
                "first" => DeviceTarget::FirstAvailable,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: DEVICE_SELECTION,
                        value: selection,
                        reason: "expected `active` or `first`".to_string(),
                    });
                }
            },
        };

        let port = match get(PORT) {
            Some(value) => parse_number(PORT, value)?,
            None => DEFAULT_PORT,
        };

        let request_timeout = match get(REQUEST_TIMEOUT_SECS) {
            Some(value) => Duration::from_secs(parse_number(REQUEST_TIMEOUT_SECS, value)?),
            None => DEFAULT_REQUEST_TIMEOUT,
        };
        if request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: REQUEST_TIMEOUT_SECS,
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        let track_change_delay = match get(TRACK_CHANGE_DELAY_MS) {
            Some(value) => Duration::from_millis(parse_number(TRACK_CHANGE_DELAY_MS, value)?),
            None => DEFAULT_TRACK_CHANGE_DELAY,
        };

        let cache_tokens = match get(TOKEN_CACHE) {
            Some(value) => parse_flag(TOKEN_CACHE, value)?,
            None => false,
        };

        Ok(Config {
            credentials: Credentials {
                client_id,
                client_secret,
                refresh_token,
            },
            device,
            api_url: trim_url(get(API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string())),
            token_url: get(TOKEN_URL).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            host: get(HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            request_timeout,
            track_change_delay,
            cache_tokens,
        })
    }

    /// Returns the `host:port` pair the HTTP server binds to.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        })
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
