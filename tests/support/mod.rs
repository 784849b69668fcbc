// Fake Spotify service (token endpoint + Web API) for integration tests.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::Response,
};
use spotcloud::config::{Config, Credentials, DeviceTarget};

pub const CLIENT_ID: &str = "client-abc";
pub const CLIENT_SECRET: &str = "secret-xyz";
pub const REFRESH_TOKEN: &str = "refresh-123";
pub const ACCESS_TOKEN: &str = "fresh-token";
pub const TOKEN_PATH: &str = "/api/token";

// One request as seen by the fake service.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

#[derive(Default)]
struct FakeState {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct FakeSpotify {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeSpotify {
    // Bind an ephemeral port and serve the fake until the test runtime ends.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake spotify failed");
        });

        let fake = FakeSpotify {
            base_url: format!("http://{addr}"),
            state,
        };
        fake.reply(
            Method::POST,
            TOKEN_PATH,
            200,
            &format!(r#"{{"access_token":"{ACCESS_TOKEN}","token_type":"Bearer","expires_in":3600}}"#),
        );
        fake
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url, TOKEN_PATH)
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: &str) {
        self.reply_after(method, path, status, body, Duration::ZERO);
    }

    pub fn reply_after(&self, method: Method, path: &str, status: u16, body: &str, delay: Duration) {
        self.state.replies.lock().unwrap().insert(
            (method, path.to_string()),
            Reply {
                status,
                body: body.to_string(),
                delay,
            },
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn api_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with("/v1/"))
            .collect()
    }

    pub fn credentials() -> Credentials {
        Credentials {
            client_id: CLIENT_ID.to_string(),
            client_secret: CLIENT_SECRET.to_string(),
            refresh_token: REFRESH_TOKEN.to_string(),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            credentials: Self::credentials(),
            device: DeviceTarget::Active,
            api_url: self.api_url(),
            token_url: self.token_url(),
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout: Duration::from_secs(5),
            track_change_delay: Duration::ZERO,
            cache_tokens: false,
        }
    }
}

async fn respond(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });

    // Unconfigured routes behave like a successful player command.
    let reply = state
        .replies
        .lock()
        .unwrap()
        .get(&(method, uri.path().to_string()))
        .cloned()
        .unwrap_or(Reply {
            status: 204,
            body: String::new(),
            delay: Duration::ZERO,
        });

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    let mut builder = Response::builder().status(StatusCode::from_u16(reply.status).unwrap());
    if !reply.body.is_empty() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    builder.body(Body::from(reply.body)).unwrap()
}
