//! SMTP email sender.
//!
//! Wraps the `lettre` async SMTP transport. Configuration is loaded from
//! environment variables; if `SMTP_HOST` is not set the sender stays
//! registered but reports `ConfigurationMissing` for every attempt.

use async_trait::async_trait;
use festivo_core::channels::ChannelKind;
use festivo_db::models::invitee::Invitee;

use crate::message::{DispatchAttempt, DispatchErrorCode, NotificationMessage};
use crate::sender::ChannelSender;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SMTP delivery failures.
#[derive(Debug, thiserror::Error)]
enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@festivo.local";

/// Configuration for the SMTP email sender.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that the
    /// email channel is disabled.
    ///
    /// | Variable        | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | yes      | —                        |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_FROM`     | no       | `noreply@festivo.local`  |
    /// | `SMTP_USER`     | no       | —                        |
    /// | `SMTP_PASSWORD` | no       | —                        |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailSender
// ---------------------------------------------------------------------------

/// Sends invitation and reminder emails via SMTP.
pub struct EmailSender {
    config: Option<EmailConfig>,
}

impl EmailSender {
    /// Create a sender with explicit configuration (`None` = disabled).
    pub fn new(config: Option<EmailConfig>) -> Self {
        Self { config }
    }

    /// Create a sender from the `SMTP_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(EmailConfig::from_env())
    }

    /// Build and send one message, returning the SMTP response code.
    async fn deliver(
        &self,
        config: &EmailConfig,
        to_email: &str,
        message: &NotificationMessage,
    ) -> Result<String, EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        let response = mailer.send(email).await?;
        Ok(format!("smtp {}", response.code()))
    }
}

#[async_trait]
impl ChannelSender for EmailSender {
    fn channel(&self) -> ChannelKind {
        ChannelKind::Email
    }

    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn send(&self, invitee: &Invitee, message: &NotificationMessage) -> DispatchAttempt {
        let Some(config) = &self.config else {
            return DispatchAttempt::failure(
                ChannelKind::Email,
                DispatchErrorCode::ConfigurationMissing,
                "SMTP_HOST is not set",
            );
        };
        let Some(to_email) = invitee.email.as_deref() else {
            return DispatchAttempt::failure(
                ChannelKind::Email,
                DispatchErrorCode::InvalidRecipient,
                "Invitee has no email address",
            );
        };

        match self.deliver(config, to_email, message).await {
            Ok(smtp_code) => {
                tracing::info!(invitee_id = invitee.id, to = to_email, "Invitation email sent");
                DispatchAttempt::success(ChannelKind::Email, Some(smtp_code))
            }
            Err(EmailError::Address(e)) => DispatchAttempt::failure(
                ChannelKind::Email,
                DispatchErrorCode::InvalidRecipient,
                e.to_string(),
            ),
            Err(e) => {
                tracing::warn!(invitee_id = invitee.id, error = %e, "Email delivery failed");
                DispatchAttempt::failure(
                    ChannelKind::Email,
                    DispatchErrorCode::ProviderError,
                    e.to_string(),
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

    fn invitee_with_email(email: Option<&str>) -> Invitee {
        Invitee {
            id: 1,
            event_id: 1,
            name: "Jane".to_string(),
            email: email.map(str::to_string),
            phone: None,
            whatsapp_id: None,
            social_handle: None,
            preferred_channel: None,
            notification_channels: serde_json::json!([]),
            rsvp_status: "pending".to_string(),
            linked_user_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        // Ensure SMTP_HOST is not set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[tokio::test]
    async fn unconfigured_sender_reports_configuration_missing() {
        let sender = EmailSender::new(None);
        assert!(!sender.is_configured());

        let attempt = sender
            .send(
                &invitee_with_email(Some("jane@example.com")),
                &NotificationMessage::new("Hi", "Hello"),
            )
            .await;

        assert!(!attempt.success);
        assert_eq!(attempt.error, Some(DispatchErrorCode::ConfigurationMissing));
    }

    #[tokio::test]
    async fn missing_recipient_reports_invalid_recipient() {
        let sender = EmailSender::new(Some(EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            from_address: "noreply@festivo.local".to_string(),
            smtp_user: None,
            smtp_password: None,
        }));

        let attempt = sender
            .send(
                &invitee_with_email(None),
                &NotificationMessage::new("Hi", "Hello"),
            )
            .await;

        assert!(!attempt.success);
        assert_eq!(attempt.error, Some(DispatchErrorCode::InvalidRecipient));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
