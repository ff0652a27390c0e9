//! Handler for cart session issuance.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::cart::SessionResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Issues a new cart session id.
///
/// # Endpoint
///
/// `POST /api/session`
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// { "sessionId": "3q2-7wAAAAAAAAAAAAAAAA" }
/// ```
///
/// Clients send the id back in the `X-Session-Id` header on cart requests.
pub async fn create_session_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session_id = state.cart_service.start_session()?;
    Ok((StatusCode::CREATED, Json(SessionResponse { session_id })))
}
