use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use tracing::{info, warn};

use crate::models::{ReservationPayload, ValidationError};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success_message;

pub async fn reserve_ticket(
    State(state): State<AppState>,
    payload: Result<Json<ReservationPayload>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Unreadable reservation body");
        AppError::Validation(ValidationError::MalformedBody)
    })?;

    let reservation = payload.validate()?;
    info!(tickets = reservation.tickets, "Received ticket reservation");

    state.notifier.notify(&reservation).await?;

    Ok(success_message("Ticket-Reservierung erfolgreich versendet!"))
}
