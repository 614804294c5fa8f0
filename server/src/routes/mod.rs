use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{
    fundraising_data, health_check, preflight, reserve_ticket, test_env, unsupported_method,
};
use crate::state::AppState;

pub fn create_routes(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/fundraising-data",
            get(fundraising_data)
                .options(preflight)
                .fallback(unsupported_method),
        )
        .route(
            "/api/reserve-ticket",
            post(reserve_ticket)
                .options(preflight)
                .fallback(unsupported_method),
        )
        .route(
            "/api/test-env",
            get(test_env).options(preflight).fallback(unsupported_method),
        )
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(cors_allowed_origins))
        .with_state(state)
}
