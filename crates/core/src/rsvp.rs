//! RSVP status constants and validation.
//!
//! Statuses are stored as plain text in the `invitees.rsvp_status`
//! column and referenced by handlers and the frontend.

use crate::error::CoreError;

/// No response yet (the default for a freshly created invitee).
pub const RSVP_PENDING: &str = "pending";

/// The guest accepted the invitation.
pub const RSVP_ACCEPTED: &str = "accepted";

/// The guest declined the invitation.
pub const RSVP_DECLINED: &str = "declined";

/// The guest is undecided.
pub const RSVP_MAYBE: &str = "maybe";

/// All accepted RSVP status values.
pub const RSVP_STATUSES: [&str; 4] = [RSVP_PENDING, RSVP_ACCEPTED, RSVP_DECLINED, RSVP_MAYBE];

/// Validate that `status` is one of the accepted RSVP values.
pub fn validate_rsvp_status(status: &str) -> Result<(), CoreError> {
    if RSVP_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown RSVP status '{status}', expected one of: pending, accepted, declined, maybe"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_known_statuses() {
        for status in RSVP_STATUSES {
            assert!(validate_rsvp_status(status).is_ok());
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(validate_rsvp_status("yes").is_err());
        assert!(validate_rsvp_status("PENDING").is_err());
        assert!(validate_rsvp_status("").is_err());
    }
}
