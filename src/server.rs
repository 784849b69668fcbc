use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{Res, api, config::Config, state::AppState};

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::health))
        .route("/health", get(api::health))
        .route("/devices", get(api::devices))
        .route("/search", get(api::search))
        .route("/play", post(api::play))
        .route("/pause", post(api::pause))
        .route("/resume", post(api::resume))
        .route("/now-playing", get(api::now_playing))
        .route("/current", get(api::now_playing))
        .route("/volume", post(api::volume))
        .route("/next", post(api::next))
        .route("/previous", post(api::previous))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Sets up the global tracing subscriber. `RUST_LOG` picks the filter,
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
    };

    result.ok();
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(config.server_addr())
        .await
        .map_err(|e| format!("Failed to bind {}: {}", config.server_addr(), e))?;
    let addr = listener.local_addr()?;

    tracing::info!(
        %addr,
        device = ?config.device,
        token_cache = config.cache_tokens,
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
