//! In-app notification sender.
//!
//! Persists a notification row for the invitee's linked user account,
//! where the notification bell UI picks it up. Invitees who have not
//! linked an account have no inbox, so the attempt fails with
//! `InvalidRecipient`.

use async_trait::async_trait;
use festivo_core::channels::ChannelKind;
use festivo_db::models::invitee::Invitee;
use festivo_db::repositories::NotificationRepo;
use festivo_db::DbPool;

use crate::message::{DispatchAttempt, DispatchErrorCode, NotificationMessage};
use crate::sender::ChannelSender;

/// Stores in-app notifications for linked guests.
pub struct InAppSender {
    pool: DbPool,
}

impl InAppSender {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelSender for InAppSender {
    fn channel(&self) -> ChannelKind {
        ChannelKind::InApp
    }

    fn is_configured(&self) -> bool {
        // Backed by the application database; always available.
        true
    }

    async fn send(&self, invitee: &Invitee, message: &NotificationMessage) -> DispatchAttempt {
        let Some(user_id) = invitee.linked_user_id else {
            return DispatchAttempt::failure(
                ChannelKind::InApp,
                DispatchErrorCode::InvalidRecipient,
                "Invitee has no linked user account",
            );
        };

        match NotificationRepo::create(
            &self.pool,
            user_id,
            Some(invitee.id),
            &message.subject,
            &message.body,
        )
        .await
        {
            Ok(notification_id) => {
                tracing::debug!(invitee_id = invitee.id, user_id, notification_id, "Stored in-app notification");
                DispatchAttempt::success(
                    ChannelKind::InApp,
                    Some(format!("notification:{notification_id}")),
                )
            }
            Err(e) => {
                tracing::error!(invitee_id = invitee.id, user_id, error = %e, "Failed to store in-app notification");
                DispatchAttempt::failure(
                    ChannelKind::InApp,
                    DispatchErrorCode::ProviderError,
                    e.to_string(),
                )
            }
        }
    }
}
