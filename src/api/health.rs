use axum::response::Json;

use crate::types::HealthResponse;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Spotify Cloud Server is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}
