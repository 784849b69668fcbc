use chrono::Utc;
use tokio::sync::Mutex;

/// Tokens are treated as expired this many seconds before Spotify says so.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Spotify access tokens live for an hour unless the response says otherwise.
pub const DEFAULT_EXPIRES_IN: u64 = 3600;

#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl CachedToken {
    pub fn new(access_token: String, expires_in: Option<u64>) -> Self {
        CachedToken {
            access_token,
            expires_in: expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp() as u64)
    }

    fn is_expired_at(&self, now: u64) -> bool {
        now >= self
            .obtained_at
            .saturating_add(self.expires_in.saturating_sub(EXPIRY_MARGIN_SECS))
    }
}

/// In-memory holder for the last access token. Nothing is written to disk.
#[derive(Debug, Default)]
pub struct TokenManager {
    token: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new() -> Self {
        TokenManager::default()
    }

    /// Returns the cached access token if it is still usable.
    pub async fn get_valid_token(&self) -> Option<String> {
        let lock = self.token.lock().await;
        lock.as_ref()
            .filter(|token| !token.is_expired())
            .map(|token| token.access_token.clone())
    }

    pub async fn store(&self, token: CachedToken) {
        let mut lock = self.token.lock().await;
        *lock = Some(token);
    }
}
