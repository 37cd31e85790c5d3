//! Invitee entity model and DTOs.

use festivo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full invitee row from the `invitees` table.
///
/// An invitee is a guest record created by an event organizer,
/// independent of whether the guest has a user account. Once
/// `linked_user_id` is non-null it is never reassigned to a different
/// user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invitee {
    pub id: DbId,
    pub event_id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// WhatsApp number or id, when it differs from `phone`.
    pub whatsapp_id: Option<String>,
    /// Handle on the social platform, e.g. `"@jane"`.
    pub social_handle: Option<String>,
    /// Single-channel preference used when `notification_channels` is
    /// empty.
    pub preferred_channel: Option<String>,
    /// Ordered JSONB list of channel names.
    pub notification_channels: serde_json::Value,
    pub rsvp_status: String,
    /// Weak reference to the guest's user account, set once by the link
    /// authority.
    pub linked_user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new invitee.
#[derive(Debug, Deserialize)]
pub struct CreateInvitee {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_id: Option<String>,
    pub social_handle: Option<String>,
    pub preferred_channel: Option<String>,
    pub notification_channels: Option<serde_json::Value>,
}

/// DTO for updating an existing invitee. All fields are optional.
///
/// `linked_user_id` is deliberately absent: the link column is only
/// ever written through the conditional claim in the repository.
#[derive(Debug, Deserialize)]
pub struct UpdateInvitee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_id: Option<String>,
    pub social_handle: Option<String>,
    pub preferred_channel: Option<String>,
    pub notification_channels: Option<serde_json::Value>,
    pub rsvp_status: Option<String>,
}
