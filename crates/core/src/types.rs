//! Shared primitive type aliases.

/// Database primary key. Every table uses PostgreSQL BIGSERIAL keys.
pub type DbId = i64;

/// Timestamp in UTC, as stored in TIMESTAMPTZ columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
