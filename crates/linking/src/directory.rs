//! Abstract store operations required by the linking subsystem.

use async_trait::async_trait;
use festivo_core::error::CoreError;
use festivo_core::types::DbId;
use festivo_db::models::invitee::Invitee;
use festivo_db::models::user::User;
use festivo_db::repositories::{InviteeRepo, UserRepo};
use festivo_db::DbPool;

use crate::matcher::MatchQuery;

/// The data store operations the matcher and link authority depend on.
///
/// The production implementation is [`PgInviteeDirectory`]; tests use an
/// in-memory directory. `claim_link` must be atomic against the backing
/// store itself: multiple process instances race on it, so an in-process
/// lock cannot close the window.
#[async_trait]
pub trait InviteeDirectory: Send + Sync {
    /// Fetch a user by id.
    async fn get_user(&self, id: DbId) -> Result<Option<User>, CoreError>;

    /// Fetch an invitee by id.
    async fn get_invitee(&self, id: DbId) -> Result<Option<Invitee>, CoreError>;

    /// Find unlinked invitees matching the query, in creation order.
    /// Read-only.
    async fn find_unlinked_matches(&self, query: &MatchQuery) -> Result<Vec<Invitee>, CoreError>;

    /// Set `linked_user_id = user_id` only if it is currently null.
    /// Returns whether the write applied (first writer wins).
    async fn claim_link(&self, invitee_id: DbId, user_id: DbId) -> Result<bool, CoreError>;
}

/// [`InviteeDirectory`] backed by the PostgreSQL repositories.
pub struct PgInviteeDirectory {
    pool: DbPool,
}

impl PgInviteeDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteeDirectory for PgInviteeDirectory {
    async fn get_user(&self, id: DbId) -> Result<Option<User>, CoreError> {
        UserRepo::find_by_id(&self.pool, id).await.map_err(store_error)
    }

    async fn get_invitee(&self, id: DbId) -> Result<Option<Invitee>, CoreError> {
        InviteeRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)
    }

    async fn find_unlinked_matches(&self, query: &MatchQuery) -> Result<Vec<Invitee>, CoreError> {
        InviteeRepo::find_unlinked_matches(
            &self.pool,
            query.email.as_deref(),
            query.phone.as_deref(),
            query.event_id,
        )
        .await
        .map_err(store_error)
    }

    async fn claim_link(&self, invitee_id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        InviteeRepo::claim_link(&self.pool, invitee_id, user_id)
            .await
            .map_err(store_error)
    }
}

/// Map a sqlx failure into the domain error space.
fn store_error(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("store error: {err}"))
}
