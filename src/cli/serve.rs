use crate::{config::Config, error, info, server};

pub async fn serve(config: Config) {
    server::init_tracing();
    info!("Starting Spotify Cloud Server on {}", config.server_addr());

    if let Err(e) = server::start_api_server(config).await {
        error!("Server stopped. Err: {}", e);
    }
}
