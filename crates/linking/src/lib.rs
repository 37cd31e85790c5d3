//! Invitee identity resolution and account linking.
//!
//! Organizers add guests to an event before those guests have accounts.
//! When a guest signs up, [`LinkService`] matches their identifiers
//! against unlinked invitee rows and claims each match with a
//! store-level compare-and-set, so concurrent signups can never bind the
//! same invitee to two different accounts.

pub mod authority;
pub mod directory;
pub mod matcher;

pub use authority::{BatchLinkOutcome, LinkService};
pub use directory::{InviteeDirectory, PgInviteeDirectory};
pub use matcher::MatchQuery;
