//! Multi-channel notification router.

use std::time::Duration;

use festivo_core::channels::{channel_list_from_value, ChannelKind, DEFAULT_CHANNEL};
use festivo_db::models::invitee::Invitee;
use futures::future::join_all;
use tokio::time::timeout;

use crate::message::{DispatchAttempt, DispatchErrorCode, DispatchResult, NotificationMessage};
use crate::registry::SenderRegistry;

/// Default bound on a single channel send.
const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// RouterConfig
// ---------------------------------------------------------------------------

/// Router tuning knobs.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Channel used when an invitee has no stored preference at all.
    pub default_channel: ChannelKind,
    /// Upper bound for one sender invocation. An elapsed timeout is
    /// reported as a `ProviderError` attempt, never a crash.
    pub send_timeout: Duration,
}

impl RouterConfig {
    /// Load overrides from environment variables.
    ///
    /// | Variable                   | Default |
    /// |----------------------------|---------|
    /// | `NOTIFY_DEFAULT_CHANNEL`   | `email` |
    /// | `NOTIFY_SEND_TIMEOUT_SECS` | `10`    |
    pub fn from_env() -> Self {
        let default_channel = std::env::var("NOTIFY_DEFAULT_CHANNEL")
            .ok()
            .and_then(|name| ChannelKind::parse(&name))
            .unwrap_or(DEFAULT_CHANNEL);
        let send_timeout = std::env::var("NOTIFY_SEND_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SEND_TIMEOUT);
        Self {
            default_channel,
            send_timeout,
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_channel: DEFAULT_CHANNEL,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationRouter
// ---------------------------------------------------------------------------

/// Fans one message out across an invitee's enabled channels.
///
/// Pure orchestration: holds no persisted state and performs no retries
/// (retry policy belongs to individual senders). Channel failures are
/// data in the result, never errors; one channel's failure never
/// prevents attempting the others.
pub struct NotificationRouter {
    registry: SenderRegistry,
    config: RouterConfig,
}

impl NotificationRouter {
    pub fn new(registry: SenderRegistry, config: RouterConfig) -> Self {
        Self { registry, config }
    }

    /// The channels a dispatch for `invitee` would attempt, in order.
    ///
    /// The stored preference list wins (de-duplicated, unknown names
    /// dropped); an invitee without one falls back to their single
    /// preferred channel, then to the router default.
    pub fn enabled_channels(&self, invitee: &Invitee) -> Vec<ChannelKind> {
        let from_prefs = channel_list_from_value(&invitee.notification_channels);
        if !from_prefs.is_empty() {
            return from_prefs;
        }
        if let Some(preferred) = invitee
            .preferred_channel
            .as_deref()
            .and_then(ChannelKind::parse)
        {
            return vec![preferred];
        }
        vec![self.config.default_channel]
    }

    /// Attempt delivery across every enabled channel independently.
    pub async fn dispatch(
        &self,
        invitee: &Invitee,
        message: &NotificationMessage,
    ) -> DispatchResult {
        let channels = self.enabled_channels(invitee);

        let sends = channels
            .iter()
            .map(|&channel| self.send_one(channel, invitee, message));
        let attempts = join_all(sends).await;

        let result = DispatchResult::from_attempts(attempts);
        tracing::info!(
            invitee_id = invitee.id,
            overall_success = result.overall_success,
            attempts = result.attempts.len(),
            "Dispatched notification"
        );
        result
    }

    /// Run a single sender under the configured timeout bound.
    async fn send_one(
        &self,
        channel: ChannelKind,
        invitee: &Invitee,
        message: &NotificationMessage,
    ) -> DispatchAttempt {
        let Some(sender) = self.registry.get(channel) else {
            return DispatchAttempt::failure(
                channel,
                DispatchErrorCode::ConfigurationMissing,
                format!("No sender registered for channel '{channel}'"),
            );
        };

        match timeout(self.config.send_timeout, sender.send(invitee, message)).await {
            Ok(attempt) => attempt,
            Err(_) => {
                tracing::warn!(
                    invitee_id = invitee.id,
                    %channel,
                    timeout_secs = self.config.send_timeout.as_secs(),
                    "Channel send timed out"
                );
                DispatchAttempt::failure(
                    channel,
                    DispatchErrorCode::ProviderError,
                    format!("Send timed out after {}s", self.config.send_timeout.as_secs()),
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::ChannelSender;
    use async_trait::async_trait;

    enum StubOutcome {
        Succeed,
        Fail(DispatchErrorCode),
        Hang,
    }

    struct StubSender {
        channel: ChannelKind,
        outcome: StubOutcome,
    }

    #[async_trait]
    impl ChannelSender for StubSender {
        fn channel(&self) -> ChannelKind {
            self.channel
        }

        fn is_configured(&self) -> bool {
            !matches!(
                self.outcome,
                StubOutcome::Fail(DispatchErrorCode::ConfigurationMissing)
            )
        }

        async fn send(
            &self,
            _invitee: &Invitee,
            _message: &NotificationMessage,
        ) -> DispatchAttempt {
            match &self.outcome {
                StubOutcome::Succeed => DispatchAttempt::success(self.channel, None),
                StubOutcome::Fail(code) => {
                    DispatchAttempt::failure(self.channel, *code, "stub failure")
                }
                StubOutcome::Hang => {
                    futures::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    fn router_with(stubs: Vec<StubSender>, config: RouterConfig) -> NotificationRouter {
        let mut registry = SenderRegistry::new();
        for stub in stubs {
            registry.register(std::sync::Arc::new(stub));
        }
        NotificationRouter::new(registry, config)
    }

    fn invitee(channels: serde_json::Value, preferred: Option<&str>) -> Invitee {
        Invitee {
            id: 1,
            event_id: 1,
            name: "Jane".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
            whatsapp_id: None,
            social_handle: None,
            preferred_channel: preferred.map(str::to_string),
            notification_channels: channels,
            rsvp_status: "pending".to_string(),
            linked_user_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn message() -> NotificationMessage {
        NotificationMessage::new("You're invited", "Party at eight.")
    }

    #[tokio::test]
    async fn one_failed_channel_does_not_block_the_others() {
        let router = router_with(
            vec![
                StubSender {
                    channel: ChannelKind::Email,
                    outcome: StubOutcome::Succeed,
                },
                StubSender {
                    channel: ChannelKind::SocialDm,
                    outcome: StubOutcome::Fail(DispatchErrorCode::ConfigurationMissing),
                },
            ],
            RouterConfig::default(),
        );

        let result = router
            .dispatch(&invitee(serde_json::json!(["email", "social_dm"]), None), &message())
            .await;

        assert!(result.overall_success);
        assert_eq!(result.attempts.len(), 2);
        assert_eq!(result.attempts[0].channel, ChannelKind::Email);
        assert!(result.attempts[0].success);
        assert_eq!(result.attempts[1].channel, ChannelKind::SocialDm);
        assert_eq!(
            result.attempts[1].error,
            Some(DispatchErrorCode::ConfigurationMissing)
        );
    }

    #[tokio::test]
    async fn total_failure_reports_error_on_every_attempt() {
        let router = router_with(
            vec![
                StubSender {
                    channel: ChannelKind::Email,
                    outcome: StubOutcome::Fail(DispatchErrorCode::ProviderError),
                },
                StubSender {
                    channel: ChannelKind::SocialDm,
                    outcome: StubOutcome::Fail(DispatchErrorCode::InvalidRecipient),
                },
            ],
            RouterConfig::default(),
        );

        let result = router
            .dispatch(&invitee(serde_json::json!(["email", "social_dm"]), None), &message())
            .await;

        assert!(!result.overall_success);
        assert_eq!(result.attempts.len(), 2);
        assert!(result.attempts.iter().all(|a| a.error.is_some()));
    }

    #[tokio::test]
    async fn empty_preferences_fall_back_to_the_default_channel() {
        let router = router_with(
            vec![StubSender {
                channel: ChannelKind::Email,
                outcome: StubOutcome::Succeed,
            }],
            RouterConfig::default(),
        );

        let result = router
            .dispatch(&invitee(serde_json::json!([]), None), &message())
            .await;

        assert!(result.overall_success);
        assert_eq!(result.attempts.len(), 1);
        assert_eq!(result.attempts[0].channel, ChannelKind::Email);
    }

    #[tokio::test]
    async fn preferred_channel_beats_the_default_when_list_is_empty() {
        let router = router_with(
            vec![StubSender {
                channel: ChannelKind::Whatsapp,
                outcome: StubOutcome::Succeed,
            }],
            RouterConfig::default(),
        );

        let result = router
            .dispatch(
                &invitee(serde_json::json!([]), Some("whatsapp")),
                &message(),
            )
            .await;

        assert_eq!(result.attempts.len(), 1);
        assert_eq!(result.attempts[0].channel, ChannelKind::Whatsapp);
    }

    #[tokio::test]
    async fn unregistered_channel_reports_configuration_missing() {
        let router = router_with(vec![], RouterConfig::default());

        let result = router
            .dispatch(&invitee(serde_json::json!(["in_app"]), None), &message())
            .await;

        assert!(!result.overall_success);
        assert_eq!(
            result.attempts[0].error,
            Some(DispatchErrorCode::ConfigurationMissing)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn hung_sender_times_out_as_provider_error() {
        let router = router_with(
            vec![
                StubSender {
                    channel: ChannelKind::Email,
                    outcome: StubOutcome::Hang,
                },
                StubSender {
                    channel: ChannelKind::InApp,
                    outcome: StubOutcome::Succeed,
                },
            ],
            RouterConfig {
                default_channel: DEFAULT_CHANNEL,
                send_timeout: Duration::from_secs(1),
            },
        );

        let result = router
            .dispatch(&invitee(serde_json::json!(["email", "in_app"]), None), &message())
            .await;

        // The hung channel fails; the healthy one still succeeds.
        assert!(result.overall_success);
        assert_eq!(
            result.attempts[0].error,
            Some(DispatchErrorCode::ProviderError)
        );
        assert!(result.attempts[1].success);
    }

    #[tokio::test]
    async fn duplicate_preferences_dispatch_once_per_channel() {
        let router = router_with(
            vec![StubSender {
                channel: ChannelKind::Email,
                outcome: StubOutcome::Succeed,
            }],
            RouterConfig::default(),
        );

        let result = router
            .dispatch(
                &invitee(serde_json::json!(["email", "email", "email"]), None),
                &message(),
            )
            .await;

        assert_eq!(result.attempts.len(), 1);
    }
}
