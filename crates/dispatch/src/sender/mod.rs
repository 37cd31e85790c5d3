//! Channel sender capability and the concrete senders.

pub mod email;
pub mod in_app;
pub mod social;
pub mod whatsapp;

use async_trait::async_trait;
use festivo_core::channels::ChannelKind;
use festivo_db::models::invitee::Invitee;

use crate::message::{DispatchAttempt, NotificationMessage};

/// One delivery medium.
///
/// Senders never return an error and never panic: every failure mode,
/// including missing configuration, becomes a failed
/// [`DispatchAttempt`] so the router can continue with other channels.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// The channel this sender serves.
    fn channel(&self) -> ChannelKind;

    /// Whether the sender has the configuration it needs to deliver.
    /// Unconfigured senders answer every `send` with
    /// `ConfigurationMissing`.
    fn is_configured(&self) -> bool;

    /// Attempt delivery of `message` to `invitee`.
    async fn send(&self, invitee: &Invitee, message: &NotificationMessage) -> DispatchAttempt;
}
