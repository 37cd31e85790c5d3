//! Dispatch value types: messages, per-channel attempts, aggregated
//! results.

use festivo_core::channels::ChannelKind;
use serde::{Deserialize, Serialize};

/// A rendered notification message, ready for delivery.
///
/// Template rendering happens upstream; senders receive final text.
/// Channels without a subject line (DMs, deep links) use only `body`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Machine-readable failure classification for a single channel attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchErrorCode {
    /// The channel's provider credentials are absent; the sender stays
    /// registered but is disabled until the process restarts with
    /// configuration.
    ConfigurationMissing,
    /// The provider rejected or failed the delivery (including
    /// timeouts).
    ProviderError,
    /// The invitee has no usable identity for this channel.
    InvalidRecipient,
}

/// Outcome of one delivery attempt on one channel.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchAttempt {
    pub channel: ChannelKind,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DispatchErrorCode>,
    /// Human-readable failure detail; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Provider-side reference: SMTP response code, provider message id,
    /// or the synthesized deep-link URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_ref: Option<String>,
    /// False when the channel cannot confirm delivery (deep links hand
    /// the message over without a provider receipt).
    pub delivery_confirmed: bool,
}

impl DispatchAttempt {
    /// A confirmed successful delivery.
    pub fn success(channel: ChannelKind, provider_ref: Option<String>) -> Self {
        Self {
            channel,
            success: true,
            error: None,
            detail: None,
            provider_ref,
            delivery_confirmed: true,
        }
    }

    /// A successful attempt whose actual delivery cannot be confirmed.
    pub fn unconfirmed(channel: ChannelKind, provider_ref: String) -> Self {
        Self {
            channel,
            success: true,
            error: None,
            detail: None,
            provider_ref: Some(provider_ref),
            delivery_confirmed: false,
        }
    }

    /// A failed attempt with a machine-readable code.
    pub fn failure(
        channel: ChannelKind,
        code: DispatchErrorCode,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            success: false,
            error: Some(code),
            detail: Some(detail.into()),
            provider_ref: None,
            delivery_confirmed: false,
        }
    }
}

/// Aggregate of all channel attempts for one invitee notification.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    /// True when at least one channel succeeded: the guest was reachable
    /// by some means. Callers needing all-channels semantics must
    /// inspect `attempts` themselves.
    pub overall_success: bool,
    pub attempts: Vec<DispatchAttempt>,
}

impl DispatchResult {
    /// Aggregate attempts; `overall_success` is any-success.
    pub fn from_attempts(attempts: Vec<DispatchAttempt>) -> Self {
        let overall_success = attempts.iter().any(|a| a.success);
        Self {
            overall_success,
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_serialize_screaming_snake() {
        let json = serde_json::to_string(&DispatchErrorCode::ConfigurationMissing).unwrap();
        assert_eq!(json, "\"CONFIGURATION_MISSING\"");
        let json = serde_json::to_string(&DispatchErrorCode::InvalidRecipient).unwrap();
        assert_eq!(json, "\"INVALID_RECIPIENT\"");
    }

    #[test]
    fn overall_success_requires_one_success() {
        let result = DispatchResult::from_attempts(vec![
            DispatchAttempt::failure(
                ChannelKind::SocialDm,
                DispatchErrorCode::ConfigurationMissing,
                "no token",
            ),
            DispatchAttempt::success(ChannelKind::Email, None),
        ]);
        assert!(result.overall_success);

        let result = DispatchResult::from_attempts(vec![DispatchAttempt::failure(
            ChannelKind::Email,
            DispatchErrorCode::ProviderError,
            "boom",
        )]);
        assert!(!result.overall_success);
    }

    #[test]
    fn empty_attempts_is_not_a_success() {
        let result = DispatchResult::from_attempts(vec![]);
        assert!(!result.overall_success);
        assert!(result.attempts.is_empty());
    }

    #[test]
    fn unconfirmed_attempt_is_successful_but_not_confirmed() {
        let attempt =
            DispatchAttempt::unconfirmed(ChannelKind::Whatsapp, "https://wa.me/1".to_string());
        assert!(attempt.success);
        assert!(!attempt.delivery_confirmed);
        assert!(attempt.error.is_none());
    }
}
