use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{Value, json};

use crate::{
    error::SpotifyError,
    spotify::{PlayerApi, SEARCH_LIMIT},
    types::NowPlaying,
};

/// Raw Web API client. Holds no token; every call receives the bearer token
/// obtained for the current request.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>) -> Self {
        SpotifyClient {
            http,
            api_url: api_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Sends the request once and keeps only 200 and 204 answers.
    async fn send(&self, request: RequestBuilder) -> Result<Response, SpotifyError> {
        let res = request.send().await.map_err(SpotifyError::transport)?;
        let status = res.status();

        if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        Err(SpotifyError::Remote {
            status: status.as_u16(),
            body,
        })
    }

    /// Reads a JSON body; an empty body (204) becomes an empty object.
    async fn json(res: Response) -> Result<Value, SpotifyError> {
        let text = res.text().await.map_err(SpotifyError::transport)?;
        if text.trim().is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&text).map_err(|e| SpotifyError::Decode(e.to_string()))
    }
}

fn with_device(request: RequestBuilder, device_id: Option<&str>) -> RequestBuilder {
    match device_id {
        Some(id) => request.query(&[("device_id", id)]),
        None => request,
    }
}

#[async_trait]
impl PlayerApi for SpotifyClient {
    async fn devices(&self, token: &str) -> Result<Value, SpotifyError> {
        let request = self
            .http
            .get(self.url("/me/player/devices"))
            .bearer_auth(token);

        let res = self.send(request).await?;
        Self::json(res).await
    }

    async fn search_tracks(&self, token: &str, query: &str) -> Result<Value, SpotifyError> {
        let limit = SEARCH_LIMIT.to_string();
        let request = self
            .http
            .get(self.url("/search"))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())]);

        let res = self.send(request).await?;
        Self::json(res).await
    }

    async fn play(
        &self,
        token: &str,
        track_uri: &str,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError> {
        let request = self
            .http
            .put(self.url("/me/player/play"))
            .bearer_auth(token)
            .json(&json!({ "uris": [track_uri] }));

        self.send(with_device(request, device_id)).await?;
        Ok(())
    }

    async fn pause(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError> {
        let request = self
            .http
            .put(self.url("/me/player/pause"))
            .bearer_auth(token);

        self.send(with_device(request, device_id)).await?;
        Ok(())
    }

    async fn resume(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError> {
        let request = self
            .http
            .put(self.url("/me/player/play"))
            .bearer_auth(token);

        self.send(with_device(request, device_id)).await?;
        Ok(())
    }

    async fn now_playing(&self, token: &str) -> Result<NowPlaying, SpotifyError> {
        let request = self.http.get(self.url("/me/player")).bearer_auth(token);

        let res = self.send(request).await?;
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(NowPlaying::Nothing);
        }

        let text = res.text().await.map_err(SpotifyError::transport)?;
        if text.trim().is_empty() {
            return Ok(NowPlaying::Nothing);
        }

        serde_json::from_str(&text)
            .map(NowPlaying::Playing)
            .map_err(|e| SpotifyError::Decode(e.to_string()))
    }

    async fn set_volume(
        &self,
        token: &str,
        volume: u8,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError> {
        let request = self
            .http
            .put(self.url("/me/player/volume"))
            .bearer_auth(token)
            .query(&[("volume_percent", volume)]);

        self.send(with_device(request, device_id)).await?;
        Ok(())
    }

    async fn next_track(&self, token: &str, device_id: Option<&str>) -> Result<(), SpotifyError> {
        let request = self
            .http
            .post(self.url("/me/player/next"))
            .bearer_auth(token);

        self.send(with_device(request, device_id)).await?;
        Ok(())
    }

    async fn previous_track(
        &self,
        token: &str,
        device_id: Option<&str>,
    ) -> Result<(), SpotifyError> {
        let request = self
            .http
            .post(self.url("/me/player/previous"))
            .bearer_auth(token);

        self.send(with_device(request, device_id)).await?;
        Ok(())
    }
}
