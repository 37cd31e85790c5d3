//! Route definitions for the `/invitees` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{invitee, linking, notify};
use crate::state::AppState;

/// Routes mounted at `/invitees`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(invitee::get_by_id)
                .put(invitee::update)
                .delete(invitee::delete),
        )
        .route("/{id}/link", post(linking::link_invitee))
        .route("/{id}/notify", post(notify::notify_invitee))
}
