//! Notification channel kinds.
//!
//! Channel names are stored in JSONB preference lists on both users and
//! invitees, so the wire names must stay stable across releases.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A distinct delivery medium for invitations and reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// SMTP email.
    Email,
    /// WhatsApp click-to-chat deep link (prefilled, not delivered by us).
    Whatsapp,
    /// Direct message through the social provider API.
    SocialDm,
    /// In-app notification stored for the notification bell UI.
    InApp,
}

/// Fallback channel used when an invitee has no stored preference.
pub const DEFAULT_CHANNEL: ChannelKind = ChannelKind::Email;

impl ChannelKind {
    /// All channel kinds, in canonical display order.
    pub const ALL: [ChannelKind; 4] = [
        ChannelKind::Email,
        ChannelKind::Whatsapp,
        ChannelKind::SocialDm,
        ChannelKind::InApp,
    ];

    /// Stable wire name, matching the values stored in preference lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Whatsapp => "whatsapp",
            ChannelKind::SocialDm => "social_dm",
            ChannelKind::InApp => "in_app",
        }
    }

    /// Parse a stored channel name. Unknown names return `None` so a
    /// stale preference entry degrades instead of failing a dispatch.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "email" => Some(ChannelKind::Email),
            "whatsapp" => Some(ChannelKind::Whatsapp),
            "social_dm" => Some(ChannelKind::SocialDm),
            "in_app" => Some(ChannelKind::InApp),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a JSONB preference list into channel kinds.
///
/// Entries that are not strings or do not name a known channel are
/// dropped; duplicates are removed while preserving first-seen order.
pub fn channel_list_from_value(value: &serde_json::Value) -> Vec<ChannelKind> {
    let mut out = Vec::new();
    if let Some(items) = value.as_array() {
        for item in items {
            if let Some(kind) = item.as_str().and_then(ChannelKind::parse) {
                if !out.contains(&kind) {
                    out.push(kind);
                }
            }
        }
    }
    out
}

/// Validate that every entry names a known channel.
pub fn validate_channel_names(names: &[String]) -> Result<(), CoreError> {
    for name in names {
        if ChannelKind::parse(name).is_none() {
            return Err(CoreError::Validation(format!(
                "Unknown notification channel '{name}', expected one of: email, whatsapp, social_dm, in_app"
            )));
        }
    }
    Ok(())
}

/// Validate a JSONB preference list: must be an array of known channel
/// names.
pub fn validate_channel_value(value: &serde_json::Value) -> Result<(), CoreError> {
    let Some(items) = value.as_array() else {
        return Err(CoreError::Validation(
            "notification_channels must be a JSON array of channel names".to_string(),
        ));
    };
    for item in items {
        let valid = item.as_str().is_some_and(|s| ChannelKind::parse(s).is_some());
        if !valid {
            return Err(CoreError::Validation(format!(
                "Unknown notification channel entry {item}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for kind in ChannelKind::ALL {
            assert_eq!(ChannelKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(ChannelKind::parse("pigeon"), None);
        assert_eq!(ChannelKind::parse(""), None);
        assert_eq!(ChannelKind::parse("EMAIL"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&ChannelKind::SocialDm).unwrap();
        assert_eq!(json, "\"social_dm\"");
        let parsed: ChannelKind = serde_json::from_str("\"in_app\"").unwrap();
        assert_eq!(parsed, ChannelKind::InApp);
    }

    #[test]
    fn list_preserves_order_and_dedups() {
        let value = serde_json::json!(["whatsapp", "email", "whatsapp", "in_app"]);
        assert_eq!(
            channel_list_from_value(&value),
            vec![ChannelKind::Whatsapp, ChannelKind::Email, ChannelKind::InApp]
        );
    }

    #[test]
    fn list_drops_unknown_and_non_string_entries() {
        let value = serde_json::json!(["email", "carrier_pigeon", 42, null]);
        assert_eq!(channel_list_from_value(&value), vec![ChannelKind::Email]);
    }

    #[test]
    fn list_from_non_array_is_empty() {
        assert!(channel_list_from_value(&serde_json::json!(null)).is_empty());
        assert!(channel_list_from_value(&serde_json::json!("email")).is_empty());
    }

    #[test]
    fn validate_names_accepts_known() {
        let names = vec!["email".to_string(), "social_dm".to_string()];
        assert!(validate_channel_names(&names).is_ok());
    }

    #[test]
    fn validate_names_rejects_unknown() {
        let names = vec!["email".to_string(), "fax".to_string()];
        assert!(validate_channel_names(&names).is_err());
    }

    #[test]
    fn validate_value_rejects_non_array() {
        assert!(validate_channel_value(&serde_json::json!("email")).is_err());
        assert!(validate_channel_value(&serde_json::json!(["email", 1])).is_err());
        assert!(validate_channel_value(&serde_json::json!(["email"])).is_ok());
    }
}
