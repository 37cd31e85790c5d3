//! Repository for the `users` table.

use festivo_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, notification_channels, \
                       whatsapp_charges_accepted, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, phone)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's notification preferences. Only non-`None`
    /// arguments are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_notification_preferences(
        pool: &PgPool,
        id: DbId,
        channels: Option<&serde_json::Value>,
        whatsapp_charges_accepted: Option<bool>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                notification_channels = COALESCE($2, notification_channels),
                whatsapp_charges_accepted = COALESCE($3, whatsapp_charges_accepted),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(channels)
            .bind(whatsapp_charges_accepted)
            .fetch_optional(pool)
            .await
    }
}
