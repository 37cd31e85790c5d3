//! Route definitions for the `/events` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{event, invitee};
use crate::state::AppState;

/// Routes mounted at `/events`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list).post(event::create))
        .route(
            "/{id}",
            get(event::get_by_id).put(event::update).delete(event::delete),
        )
        // Invitees are created under their owning event.
        .route(
            "/{event_id}/invitees",
            get(invitee::list_by_event).post(invitee::create),
        )
}
