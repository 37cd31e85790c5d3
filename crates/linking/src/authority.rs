//! Link authority: concurrency-safe, idempotent user↔invitee binding.

use std::sync::Arc;

use festivo_core::error::CoreError;
use festivo_core::identity::{normalize_email, normalize_phone};
use festivo_core::types::DbId;
use festivo_db::models::invitee::Invitee;
use festivo_db::models::user::User;
use futures::future::join_all;
use serde::Serialize;

use crate::directory::InviteeDirectory;
use crate::matcher::MatchQuery;

/// Result of a batch auto-link pass.
#[derive(Debug, Serialize)]
pub struct BatchLinkOutcome {
    /// Number of invitees bound to the user by this pass.
    pub linked: usize,
    /// The bound invitee rows, re-read after the claim.
    pub invitees: Vec<Invitee>,
}

/// Binds user accounts to invitee records.
pub struct LinkService {
    directory: Arc<dyn InviteeDirectory>,
}

impl LinkService {
    pub fn new(directory: Arc<dyn InviteeDirectory>) -> Self {
        Self { directory }
    }

    /// Bind `user_id` to one specific invitee.
    ///
    /// Idempotent: re-linking an already-linked pair succeeds and leaves
    /// state unchanged. Fails with `NotFound` (invitee or user absent),
    /// `AlreadyLinked` (bound to a different user), or `Validation` (the
    /// user shares no canonical identifier with the invitee).
    pub async fn link_user_to_invitee(
        &self,
        user_id: DbId,
        invitee_id: DbId,
    ) -> Result<Invitee, CoreError> {
        let invitee = self
            .directory
            .get_invitee(invitee_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Invitee",
                id: invitee_id,
            })?;

        match invitee.linked_user_id {
            Some(linked) if linked == user_id => return Ok(invitee),
            Some(linked) => {
                return Err(CoreError::AlreadyLinked {
                    id: invitee_id,
                    linked_user_id: linked,
                })
            }
            None => {}
        }

        let user = self
            .directory
            .get_user(user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: user_id,
            })?;
        if !identifiers_match(&user, &invitee) {
            return Err(CoreError::Validation(format!(
                "User {user_id} shares no email or phone with invitee {invitee_id}"
            )));
        }

        if self.directory.claim_link(invitee_id, user_id).await? {
            tracing::info!(invitee_id, user_id, "Linked invitee to user");
            return self.reread(invitee_id).await;
        }

        // Lost the race: another claim landed between our read and the
        // conditional write. Re-read to see who won.
        let current = self.reread(invitee_id).await?;
        match current.linked_user_id {
            Some(linked) if linked == user_id => Ok(current),
            Some(linked) => Err(CoreError::AlreadyLinked {
                id: invitee_id,
                linked_user_id: linked,
            }),
            None => Err(CoreError::Conflict(format!(
                "Link claim for invitee {invitee_id} did not apply"
            ))),
        }
    }

    /// Best-effort batch link: match every unlinked invitee for the
    /// given identifiers and claim each one independently.
    ///
    /// Runs as a post-signup side effect, so individual claim failures
    /// (typically a lost race against a concurrent signup) are logged
    /// and excluded from the outcome; the batch itself never fails
    /// because one invitee was contended.
    pub async fn resolve_and_link(
        &self,
        user_id: DbId,
        email: Option<&str>,
        phone: Option<&str>,
        event_id: Option<DbId>,
    ) -> Result<BatchLinkOutcome, CoreError> {
        let query = MatchQuery::new(email, phone, event_id);
        if query.is_empty() {
            return Err(CoreError::Validation(
                "At least one of email or phone is required".to_string(),
            ));
        }

        if self.directory.get_user(user_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "User",
                id: user_id,
            });
        }

        let matches = self.directory.find_unlinked_matches(&query).await?;

        let claims = matches.iter().map(|invitee| {
            let directory = Arc::clone(&self.directory);
            let invitee_id = invitee.id;
            async move {
                match directory.claim_link(invitee_id, user_id).await {
                    Ok(true) => Some(invitee_id),
                    Ok(false) => {
                        tracing::debug!(
                            invitee_id,
                            user_id,
                            "Invitee was claimed by a concurrent signup"
                        );
                        None
                    }
                    Err(e) => {
                        tracing::warn!(invitee_id, user_id, error = %e, "Link claim failed");
                        None
                    }
                }
            }
        });

        let mut invitees = Vec::new();
        for claimed_id in join_all(claims).await.into_iter().flatten() {
            if let Some(invitee) = self.directory.get_invitee(claimed_id).await? {
                invitees.push(invitee);
            }
        }

        tracing::info!(user_id, linked = invitees.len(), "Auto-link pass complete");
        Ok(BatchLinkOutcome {
            linked: invitees.len(),
            invitees,
        })
    }

    async fn reread(&self, invitee_id: DbId) -> Result<Invitee, CoreError> {
        self.directory
            .get_invitee(invitee_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Invitee",
                id: invitee_id,
            })
    }
}

/// True when the user and invitee share at least one canonical
/// identifier. Preserves the link invariant for explicit (non-matcher)
/// link requests.
fn identifiers_match(user: &User, invitee: &Invitee) -> bool {
    let email_match = match (
        user.email.as_deref().and_then(normalize_email),
        invitee.email.as_deref().and_then(normalize_email),
    ) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    let phone_match = match (
        user.phone.as_deref().and_then(normalize_phone),
        invitee.phone.as_deref().and_then(normalize_phone),
    ) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    email_match || phone_match
}
