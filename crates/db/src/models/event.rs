//! Event entity model and DTOs.

use festivo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full event row from the `events` table.
///
/// Events own their invitees: deleting an event cascades to its guest
/// list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub organizer_id: DbId,
    pub title: String,
    pub venue: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub organizer_id: DbId,
    pub title: String,
    pub venue: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub description: Option<String>,
}

/// DTO for updating an existing event. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub venue: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub description: Option<String>,
}
