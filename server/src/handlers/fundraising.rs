use axum::extract::State;
use axum::Json;

use crate::models::FundraisingSnapshot;
use crate::state::AppState;

/// Always 200: upstream trouble is absorbed into the fallback snapshot.
pub async fn fundraising_data(State(state): State<AppState>) -> Json<FundraisingSnapshot> {
    Json(state.fundraising.snapshot().await)
}
