use tabled::Table;

use crate::{
    cli::auth::spinner,
    config::Config,
    error,
    spotify::{self, PlayerApi, RefreshTokenProvider, SpotifyClient, TokenProvider},
    types::{DeviceTableRow, DevicesResponse},
    warning,
};

/// Prints the devices Spotify currently knows about.
pub async fn devices(config: Config) {
    let http = match spotify::http_client(config.request_timeout) {
        Ok(http) => http,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };
    let provider = RefreshTokenProvider::new(http.clone(), config.token_url, config.credentials);
    let client = SpotifyClient::new(http, config.api_url);

    let pb = spinner("Fetching devices...");
    let token = match provider.obtain_access_token().await {
        Ok(token) => token,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot obtain access token. Err: {}", e);
        }
    };
    let result = client.devices(&token).await;
    pb.finish_and_clear();

    let body = match result {
        Ok(body) => body,
        Err(e) => error!("Cannot list devices. Err: {}", e),
    };

    let devices = match serde_json::from_value::<DevicesResponse>(body) {
        Ok(res) => res.devices,
        Err(e) => error!("Unexpected device list. Err: {}", e),
    };

    if devices.is_empty() {
        warning!("No devices available. Open Spotify on a device and try again.");
        return;
    }

    let rows: Vec<DeviceTableRow> = devices.into_iter().map(DeviceTableRow::from).collect();
    println!("{}", Table::new(rows));
}
