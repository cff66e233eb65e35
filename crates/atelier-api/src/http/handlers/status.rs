//! GET /api/status -- hosted credential availability.

use axum::extract::State;
use axum::Json;

use atelier_types::chat::StatusReply;

use crate::state::AppState;

pub async fn get_status(State(state): State<AppState>) -> Json<StatusReply> {
    let hosted_available = state.completion.is_some();
    let message = if hosted_available {
        "Hosted API ready"
    } else {
        "No hosted API key configured"
    };

    Json(StatusReply {
        hosted_available,
        message: message.to_string(),
    })
}
