//! Handler for dispatching a notification to an invitee.

use axum::extract::{Path, State};
use axum::Json;
use festivo_core::error::CoreError;
use festivo_core::types::DbId;
use festivo_db::repositories::InviteeRepo;
use festivo_dispatch::{DispatchResult, NotificationMessage};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /invitees/{id}/notify`.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub subject: String,
    pub body: String,
}

/// POST /api/v1/invitees/{id}/notify
///
/// Fan the message out across the invitee's enabled channels. Channel
/// failures are reported inside the dispatch result, not as HTTP
/// errors: the request itself only fails when the invitee is missing or
/// the message is malformed.
pub async fn notify_invitee(
    State(state): State<AppState>,
    Path(invitee_id): Path<DbId>,
    Json(input): Json<NotifyRequest>,
) -> AppResult<Json<DispatchResult>> {
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message body must not be empty".to_string(),
        )));
    }

    let invitee = InviteeRepo::find_by_id(&state.pool, invitee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invitee",
            id: invitee_id,
        }))?;

    let message = NotificationMessage::new(input.subject, input.body);
    let result = state.router.dispatch(&invitee, &message).await;
    Ok(Json(result))
}
