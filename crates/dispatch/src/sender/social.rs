//! Social direct-message sender.
//!
//! Delivers the message through the social platform's DM API via HTTP
//! POST. Credentials come from `SOCIAL_DM_API_URL` / `SOCIAL_DM_API_TOKEN`;
//! without them the sender stays registered and reports
//! `ConfigurationMissing`.

use std::time::Duration;

use async_trait::async_trait;
use festivo_core::channels::ChannelKind;
use festivo_db::models::invitee::Invitee;

use crate::message::{DispatchAttempt, DispatchErrorCode, NotificationMessage};
use crate::sender::ChannelSender;

/// HTTP request timeout for a single DM API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for DM delivery failures.
#[derive(Debug, thiserror::Error)]
enum SocialDmError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The DM API returned a non-2xx status code.
    #[error("DM API returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// SocialDmConfig
// ---------------------------------------------------------------------------

/// Configuration for the social DM sender.
#[derive(Debug, Clone)]
pub struct SocialDmConfig {
    /// Base URL of the DM API.
    pub api_url: String,
    /// Bearer token for the DM API.
    pub api_token: String,
}

impl SocialDmConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `SOCIAL_DM_API_URL` and
    /// `SOCIAL_DM_API_TOKEN` are set.
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("SOCIAL_DM_API_URL").ok()?;
        let api_token = std::env::var("SOCIAL_DM_API_TOKEN").ok()?;
        Some(Self { api_url, api_token })
    }
}

// ---------------------------------------------------------------------------
// SocialDmSender
// ---------------------------------------------------------------------------

/// Sends direct messages through the social provider API.
pub struct SocialDmSender {
    config: Option<SocialDmConfig>,
    client: reqwest::Client,
}

impl SocialDmSender {
    /// Create a sender with explicit configuration (`None` = disabled).
    pub fn new(config: Option<SocialDmConfig>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { config, client }
    }

    /// Create a sender from the `SOCIAL_DM_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(SocialDmConfig::from_env())
    }

    /// Execute one DM API call, returning the provider message id when
    /// the response carries one.
    async fn deliver(
        &self,
        config: &SocialDmConfig,
        handle: &str,
        message: &NotificationMessage,
    ) -> Result<Option<String>, SocialDmError> {
        let payload = serde_json::json!({
            "recipient": handle,
            "text": message.body,
        });

        let response = self
            .client
            .post(format!("{}/messages", config.api_url.trim_end_matches('/')))
            .bearer_auth(&config.api_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SocialDmError::HttpStatus(response.status().as_u16()));
        }

        // The message id is optional in the provider response.
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        Ok(body
            .get("message_id")
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }
}

#[async_trait]
impl ChannelSender for SocialDmSender {
    fn channel(&self) -> ChannelKind {
        ChannelKind::SocialDm
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn send(&self, invitee: &Invitee, message: &NotificationMessage) -> DispatchAttempt {
        let Some(config) = &self.config else {
            return DispatchAttempt::failure(
                ChannelKind::SocialDm,
                DispatchErrorCode::ConfigurationMissing,
                "SOCIAL_DM_API_URL / SOCIAL_DM_API_TOKEN are not set",
            );
        };
        let Some(handle) = invitee.social_handle.as_deref() else {
            return DispatchAttempt::failure(
                ChannelKind::SocialDm,
                DispatchErrorCode::InvalidRecipient,
                "Invitee has no social handle",
            );
        };

        match self.deliver(config, handle, message).await {
            Ok(message_id) => {
                tracing::info!(invitee_id = invitee.id, handle, "Social DM sent");
                DispatchAttempt::success(ChannelKind::SocialDm, message_id)
            }
            Err(e) => {
                tracing::warn!(invitee_id = invitee.id, error = %e, "Social DM delivery failed");
                DispatchAttempt::failure(
                    ChannelKind::SocialDm,
                    DispatchErrorCode::ProviderError,
                    e.to_string(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitee(social_handle: Option<&str>) -> Invitee {
        Invitee {
            id: 1,
            event_id: 1,
            name: "Jane".to_string(),
            email: None,
            phone: None,
            whatsapp_id: None,
            social_handle: social_handle.map(str::to_string),
            preferred_channel: None,
            notification_channels: serde_json::json!([]),
            rsvp_status: "pending".to_string(),
            linked_user_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn from_env_requires_both_variables() {
        std::env::remove_var("SOCIAL_DM_API_URL");
        std::env::remove_var("SOCIAL_DM_API_TOKEN");
        assert!(SocialDmConfig::from_env().is_none());
    }

    #[tokio::test]
    async fn unconfigured_sender_reports_configuration_missing() {
        let sender = SocialDmSender::new(None);
        assert!(!sender.is_configured());

        let attempt = sender
            .send(&invitee(Some("@jane")), &NotificationMessage::new("", "hi"))
            .await;

        assert!(!attempt.success);
        assert_eq!(attempt.error, Some(DispatchErrorCode::ConfigurationMissing));
    }

    #[tokio::test]
    async fn missing_handle_reports_invalid_recipient() {
        let sender = SocialDmSender::new(Some(SocialDmConfig {
            api_url: "https://dm.example.com".to_string(),
            api_token: "token".to_string(),
        }));

        let attempt = sender
            .send(&invitee(None), &NotificationMessage::new("", "hi"))
            .await;

        assert!(!attempt.success);
        assert_eq!(attempt.error, Some(DispatchErrorCode::InvalidRecipient));
    }
}
