//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{linking, notification, user};
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create))
        .route("/{id}", get(user::get_by_id))
        .route(
            "/{id}/notification-preferences",
            put(user::update_notification_preferences),
        )
        .route("/{id}/resolve-links", post(linking::resolve_links))
        // In-app notification inbox
        .route("/{id}/notifications", get(notification::list_for_user))
        .route(
            "/{id}/notifications/read-all",
            post(notification::mark_all_read),
        )
        .route(
            "/{id}/notifications/unread-count",
            get(notification::unread_count),
        )
        .route(
            "/{id}/notifications/{notification_id}/read",
            post(notification::mark_read),
        )
}
