use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config::Config, error, spotify, spotify::RefreshTokenProvider, success};

/// Performs a single token exchange to check the configured credentials.
pub async fn token(config: Config) {
    let http = match spotify::http_client(config.request_timeout) {
        Ok(http) => http,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };
    let provider = RefreshTokenProvider::new(http, config.token_url, config.credentials);

    let pb = spinner("Exchanging refresh token...");
    let result = provider.refresh().await;
    pb.finish_and_clear();

    match result {
        Ok(token) => success!(
            "Credentials are valid. Access token expires in {} seconds.",
            token.expires_in
        ),
        Err(e) => error!("Token exchange failed. Err: {}", e),
    }
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
