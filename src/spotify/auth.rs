use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, header};

use crate::{
    config::Credentials,
    error::AuthError,
    management::{CachedToken, TokenManager},
    spotify::TokenProvider,
    types::TokenResponse,
};

/// Exchanges the configured refresh token for access tokens.
///
/// Without a cache every call performs one request against the token
/// endpoint. With [`RefreshTokenProvider::with_cache`] the last token is
/// reused until it is about to expire.
pub struct RefreshTokenProvider {
    http: Client,
    token_url: String,
    credentials: Credentials,
    cache: Option<TokenManager>,
}

impl RefreshTokenProvider {
    pub fn new(http: Client, token_url: impl Into<String>, credentials: Credentials) -> Self {
        RefreshTokenProvider {
            http,
            token_url: token_url.into(),
            credentials,
            cache: None,
        }
    }

    pub fn with_cache(mut self) -> Self {
        self.cache = Some(TokenManager::new());
        self
    }

    /// Value of the `Authorization` header: `Basic base64(id:secret)`.
    pub fn basic_authorization(&self) -> String {
        let pair = format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        );
        format!("Basic {}", STANDARD.encode(pair))
    }

    /// Performs the refresh-token grant against the token endpoint.
    ///
    /// Only a 200 answer carrying an `access_token` is a success; any other
    /// status, a network failure or a timeout is an [`AuthError`]. The
    /// request is never retried.
    pub async fn refresh(&self) -> Result<CachedToken, AuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .header(header::AUTHORIZATION, self.basic_authorization())
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.credentials.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let json: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        match json.access_token {
            Some(access_token) if !access_token.is_empty() => {
                Ok(CachedToken::new(access_token, json.expires_in))
            }
            _ => Err(AuthError::InvalidResponse(
                "missing access_token".to_string(),
            )),
        }
    }
}

#[async_trait]
impl TokenProvider for RefreshTokenProvider {
    async fn obtain_access_token(&self) -> Result<String, AuthError> {
        let Some(cache) = &self.cache else {
            return Ok(self.refresh().await?.access_token);
        };

        if let Some(token) = cache.get_valid_token().await {
            return Ok(token);
        }

        let token = self.refresh().await?;
        tracing::debug!(expires_in = token.expires_in, "access token refreshed.");
        let access_token = token.access_token.clone();
        cache.store(token).await;
        Ok(access_token)
    }
}
