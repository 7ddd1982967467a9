//! Service status endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config;
use crate::screening::AnemiaScreener;

#[derive(Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub service: &'static str,
    pub version: &'static str,
    pub screener: &'static str,
}

/// `GET /status`
pub async fn check(State(ctx): State<ApiContext>) -> Json<StatusResponse> {
    Json(StatusResponse {
        success: true,
        service: config::APP_NAME,
        version: config::APP_VERSION,
        screener: ctx.screener.name(),
    })
}
