use crate::types::DbId;

/// Domain-level error taxonomy shared across crates.
///
/// Channel delivery failures are deliberately NOT part of this enum:
/// they are recoverable data carried inside a dispatch result, never
/// errors propagated up the stack.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The invitee is already bound to a different user account. Links
    /// are permanent; re-linking the same pair is a no-op success and
    /// does not produce this error.
    #[error("Invitee {id} is already linked to user {linked_user_id}")]
    AlreadyLinked { id: DbId, linked_user_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
