use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::utils::response::{empty_ok, method_not_allowed};

pub mod diagnostics;
pub mod fundraising;
pub mod reservation;

pub use diagnostics::test_env;
pub use fundraising::fundraising_data;
pub use reservation::reserve_ticket;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "premiere-api",
    };

    Json(payload).into_response()
}

pub async fn preflight() -> Response {
    empty_ok()
}

pub async fn unsupported_method() -> Response {
    method_not_allowed()
}
