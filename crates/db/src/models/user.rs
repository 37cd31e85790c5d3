//! User entity model and DTOs.

use festivo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Accounts are created by the external signup flow; this service reads
/// them for identity matching and updates their notification
/// preferences. It never deletes them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Ordered JSONB list of channel names, e.g. `["email", "whatsapp"]`.
    pub notification_channels: serde_json::Value,
    /// The user accepted that WhatsApp messages may incur charges.
    pub whatsapp_charges_accepted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user (called by the signup collaborator).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// DTO for updating a user's notification preferences.
///
/// An omitted field leaves the stored value unchanged; `channels:
/// Some([])` explicitly clears the list. There is no meaningful `null`
/// state for either field, so plain `Option` is unambiguous here.
#[derive(Debug, Deserialize)]
pub struct UpdateNotificationPreferences {
    pub channels: Option<Vec<String>>,
    pub whatsapp_charges_accepted: Option<bool>,
}
