//! Handlers for the in-app notification inbox.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use festivo_core::error::CoreError;
use festivo_core::types::DbId;
use festivo_db::repositories::NotificationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for `GET /users/{id}/notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

/// GET /api/v1/users/{id}/notifications
///
/// List a user's in-app notifications with optional filtering.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, user_id, unread_only, limit, offset).await?;

    Ok(Json(serde_json::json!({ "data": notifications })))
}

/// POST /api/v1/users/{id}/notifications/{notification_id}/read
///
/// Mark a single notification as read. Returns 204 No Content on
/// success, or 404 if the notification does not belong to the user.
pub async fn mark_read(
    State(state): State<AppState>,
    Path((user_id, notification_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{id}/notifications/read-all
///
/// Mark all of a user's notifications as read. Returns the number of
/// notifications that were marked.
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "marked_read": count }
    })))
}

/// GET /api/v1/users/{id}/notifications/unread-count
///
/// Return the number of unread notifications for a user.
pub async fn unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "count": count }
    })))
}
