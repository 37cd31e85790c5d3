//! Invitee matching by canonical identifier.

use festivo_core::identity::{normalize_email, normalize_phone};
use festivo_core::types::DbId;
use festivo_db::models::invitee::Invitee;

/// A normalized match query against unlinked invitees.
///
/// Construction normalizes both identifiers up front. An empty query
/// (neither identifier survives normalization) matches nothing, so a
/// user without contact details can never wildcard-match a guest list.
#[derive(Debug, Clone)]
pub struct MatchQuery {
    /// Canonical email (trimmed, lower-cased), if any.
    pub email: Option<String>,
    /// Canonical phone (stripped, leading `+` kept), if any.
    pub phone: Option<String>,
    /// Restrict matching to a single event; `None` searches all events
    /// (the post-signup auto-link path).
    pub event_id: Option<DbId>,
}

impl MatchQuery {
    /// Build a query from raw identifier strings.
    pub fn new(email: Option<&str>, phone: Option<&str>, event_id: Option<DbId>) -> Self {
        Self {
            email: email.and_then(normalize_email),
            phone: phone.and_then(normalize_phone),
            event_id,
        }
    }

    /// True when neither identifier survived normalization.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }

    /// The matching rule: unlinked, in the filtered event (when one is
    /// set), and equal on canonical email or canonical phone.
    ///
    /// Email comparison is case-insensitive via normalization; phone
    /// comparison is exact on the canonical form. No partial or fuzzy
    /// matching. The SQL path in `InviteeRepo::find_unlinked_matches`
    /// must stay equivalent to this rule.
    pub fn matches(&self, invitee: &Invitee) -> bool {
        if invitee.linked_user_id.is_some() {
            return false;
        }
        if self.event_id.is_some_and(|id| id != invitee.event_id) {
            return false;
        }

        let email_match = match (&self.email, invitee.email.as_deref()) {
            (Some(query), Some(stored)) => normalize_email(stored).as_deref() == Some(query),
            _ => false,
        };
        let phone_match = match (&self.phone, invitee.phone.as_deref()) {
            (Some(query), Some(stored)) => normalize_phone(stored).as_deref() == Some(query),
            _ => false,
        };

        email_match || phone_match
    }
}
