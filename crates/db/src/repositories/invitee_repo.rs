//! Repository for the `invitees` table.
//!
//! Besides plain CRUD this repository carries the two store operations
//! the linking subsystem is built on: canonical identifier matching over
//! unlinked invitees, and the atomic link claim.

use festivo_core::types::DbId;
use sqlx::PgPool;

use crate::models::invitee::{CreateInvitee, Invitee, UpdateInvitee};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, name, email, phone, whatsapp_id, social_handle, \
                       preferred_channel, notification_channels, rsvp_status, \
                       linked_user_id, created_at, updated_at";

/// Canonical phone form used in matching queries. Must stay in sync with
/// the expression index `idx_invitees_unlinked_phone`.
const PHONE_CANON: &str = "regexp_replace(phone, '[\\s()-]', '', 'g')";

/// Provides CRUD and link operations for invitees.
pub struct InviteeRepo;

impl InviteeRepo {
    /// Insert a new invitee for an event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateInvitee,
    ) -> Result<Invitee, sqlx::Error> {
        let query = format!(
            "INSERT INTO invitees (event_id, name, email, phone, whatsapp_id, \
                                   social_handle, preferred_channel, notification_channels)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, '[]'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitee>(&query)
            .bind(event_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.whatsapp_id)
            .bind(&input.social_handle)
            .bind(&input.preferred_channel)
            .bind(&input.notification_channels)
            .fetch_one(pool)
            .await
    }

    /// Find an invitee by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invitee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitees WHERE id = $1");
        sqlx::query_as::<_, Invitee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all invitees for an event in creation order.
    pub async fn list_by_event(pool: &PgPool, event_id: DbId) -> Result<Vec<Invitee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitees WHERE event_id = $1 ORDER BY id");
        sqlx::query_as::<_, Invitee>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Update an invitee. Only non-`None` fields in `input` are applied.
    ///
    /// The link column is not touched here; see [`InviteeRepo::claim_link`].
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvitee,
    ) -> Result<Option<Invitee>, sqlx::Error> {
        let query = format!(
            "UPDATE invitees SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                whatsapp_id = COALESCE($5, whatsapp_id),
                social_handle = COALESCE($6, social_handle),
                preferred_channel = COALESCE($7, preferred_channel),
                notification_channels = COALESCE($8, notification_channels),
                rsvp_status = COALESCE($9, rsvp_status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitee>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.whatsapp_id)
            .bind(&input.social_handle)
            .bind(&input.preferred_channel)
            .bind(&input.notification_channels)
            .bind(&input.rsvp_status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an invitee. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invitees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find unlinked invitees whose canonical email or phone equals the
    /// given canonical identifiers, optionally restricted to one event.
    ///
    /// Both identifiers must already be in canonical form (see
    /// `festivo_core::identity`); the query normalizes only the stored
    /// side. Read-only; rows come back in creation order.
    pub async fn find_unlinked_matches(
        pool: &PgPool,
        email: Option<&str>,
        phone: Option<&str>,
        event_id: Option<DbId>,
    ) -> Result<Vec<Invitee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invitees
             WHERE linked_user_id IS NULL
               AND (($1::text IS NOT NULL AND lower(trim(email)) = $1)
                 OR ($2::text IS NOT NULL AND {PHONE_CANON} = $2))
               AND ($3::bigint IS NULL OR event_id = $3)
             ORDER BY id"
        );
        sqlx::query_as::<_, Invitee>(&query)
            .bind(email)
            .bind(phone)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically set `linked_user_id = user_id` if it is currently null.
    ///
    /// This is the single synchronization point for concurrent signups:
    /// the conditional update executes as one statement against the
    /// store, so the first writer wins and every later claim returns
    /// `false`. Returns whether the write applied.
    pub async fn claim_link(
        pool: &PgPool,
        invitee_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invitees SET linked_user_id = $2, updated_at = NOW() \
             WHERE id = $1 AND linked_user_id IS NULL",
        )
        .bind(invitee_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
