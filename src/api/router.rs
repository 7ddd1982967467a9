//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Every response carries the `success` envelope; errors map to 400
//! (validation), 404 (explicit missing target) or 500 (store failure).
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the record API router.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route(
            "/users",
            get(endpoints::users::list).post(endpoints::users::upsert),
        )
        .route("/users/update-login", post(endpoints::users::update_login))
        .route("/users/:wallet", get(endpoints::users::get_by_wallet))
        .route(
            "/health-records",
            get(endpoints::health_records::list).post(endpoints::health_records::create),
        )
        .route(
            "/medical-records",
            get(endpoints::medical_records::list).post(endpoints::medical_records::create),
        )
        .route(
            "/anemia-detection",
            get(endpoints::anemia::list).post(endpoints::anemia::create),
        )
        .route(
            "/patients/:patient_id/dashboard",
            get(endpoints::dashboard::show),
        )
        .route("/status", get(endpoints::status::check))
        .with_state(ctx)
        // The browser frontend is served from a different origin
        .layer(CorsLayer::permissive())
}
