//! Route definitions.

pub mod event;
pub mod health;
pub mod invitee;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                                    list, create
/// /events/{id}                               get, update, delete
/// /events/{event_id}/invitees                list, create
///
/// /invitees/{id}                             get, update, delete
/// /invitees/{id}/link                        bind to a user (POST)
/// /invitees/{id}/notify                      dispatch a message (POST)
///
/// /users                                     create
/// /users/{id}                                get
/// /users/{id}/notification-preferences       update (PUT)
/// /users/{id}/resolve-links                  batch auto-link (POST)
/// /users/{id}/notifications                  list (?unread_only, limit, offset)
/// /users/{id}/notifications/read-all         mark all read (POST)
/// /users/{id}/notifications/unread-count     unread count (GET)
/// /users/{id}/notifications/{nid}/read       mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/events", event::router())
        .nest("/invitees", invitee::router())
        .nest("/users", user::router())
}
