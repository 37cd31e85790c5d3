//! Handlers for account↔invitee linking.

use axum::extract::{Path, State};
use axum::Json;
use festivo_core::types::DbId;
use festivo_db::models::invitee::Invitee;
use festivo_linking::BatchLinkOutcome;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /users/{id}/resolve-links`.
#[derive(Debug, Deserialize)]
pub struct ResolveLinksRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Restrict matching to a single event; omit to search all events
    /// (the post-signup auto-link path).
    pub event_id: Option<DbId>,
}

/// POST /api/v1/users/{id}/resolve-links
///
/// Match the user's identifiers against unlinked invitees and claim
/// every match. Best-effort: an invitee lost to a concurrent signup is
/// simply absent from the result, it never fails the batch.
pub async fn resolve_links(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<ResolveLinksRequest>,
) -> AppResult<Json<BatchLinkOutcome>> {
    let outcome = state
        .link_service
        .resolve_and_link(
            user_id,
            input.email.as_deref(),
            input.phone.as_deref(),
            input.event_id,
        )
        .await?;
    Ok(Json(outcome))
}

/// Request body for `POST /invitees/{id}/link`.
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub user_id: DbId,
}

/// POST /api/v1/invitees/{id}/link
///
/// Bind one specific invitee to a user account. Responds 404 when the
/// invitee or user is missing, 409 when the invitee already belongs to a
/// different account; re-linking the same pair is an idempotent 200.
pub async fn link_invitee(
    State(state): State<AppState>,
    Path(invitee_id): Path<DbId>,
    Json(input): Json<LinkRequest>,
) -> AppResult<Json<Invitee>> {
    let invitee = state
        .link_service
        .link_user_to_invitee(input.user_id, invitee_id)
        .await?;
    Ok(Json(invitee))
}
