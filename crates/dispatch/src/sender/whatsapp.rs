//! WhatsApp deep-link sender.
//!
//! This channel does not call a provider API. It synthesizes a
//! `https://wa.me/<number>?text=<prefilled>` click-to-chat link that the
//! frontend surfaces for the organizer (or guest) to open in WhatsApp.
//! The attempt is reported as successful once the URI is built, with
//! `delivery_confirmed: false` since no provider receipt exists.

use async_trait::async_trait;
use festivo_core::channels::ChannelKind;
use festivo_core::identity::normalize_phone;
use festivo_db::models::invitee::Invitee;

use crate::message::{DispatchAttempt, DispatchErrorCode, NotificationMessage};
use crate::sender::ChannelSender;

/// Base URL for WhatsApp click-to-chat links.
const WA_LINK_BASE: &str = "https://wa.me";

/// Synthesizes WhatsApp click-to-chat links.
pub struct WhatsappLinkSender;

impl WhatsappLinkSender {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the recipient number: explicit WhatsApp id first, then
    /// the invitee's phone. Returned as bare digits (wa.me links carry
    /// no `+` or punctuation).
    fn recipient_number(invitee: &Invitee) -> Option<String> {
        let raw = invitee.whatsapp_id.as_deref().or(invitee.phone.as_deref())?;
        let normalized = normalize_phone(raw)?;
        let digits: String = normalized.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            None
        } else {
            Some(digits)
        }
    }
}

impl Default for WhatsappLinkSender {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the click-to-chat URI for a number and prefilled text.
fn build_link(number: &str, text: &str) -> String {
    format!("{WA_LINK_BASE}/{number}?text={}", percent_encode(text))
}

/// Minimal percent-encoding for the `text` query parameter: RFC 3986
/// unreserved characters pass through, every other byte is `%XX`-escaped.
fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(*byte as char)
            }
            b => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[async_trait]
impl ChannelSender for WhatsappLinkSender {
    fn channel(&self) -> ChannelKind {
        ChannelKind::Whatsapp
    }

    fn is_configured(&self) -> bool {
        // Link synthesis needs no provider credentials.
        true
    }

    async fn send(&self, invitee: &Invitee, message: &NotificationMessage) -> DispatchAttempt {
        let Some(number) = Self::recipient_number(invitee) else {
            return DispatchAttempt::failure(
                ChannelKind::Whatsapp,
                DispatchErrorCode::InvalidRecipient,
                "Invitee has no WhatsApp id or phone number",
            );
        };

        let link = build_link(&number, &message.body);
        tracing::debug!(invitee_id = invitee.id, "Built WhatsApp deep link");
        DispatchAttempt::unconfirmed(ChannelKind::Whatsapp, link)
    }
}
