//! PostgreSQL repository implementations
//!
//! Concrete implementations of the repository traits defined in
//! slotbook-core, using sqlx. Rows are returned in insertion order
//! (`seq` column).

pub mod booking_repo;
pub mod client_repo;
pub mod provider_repo;

pub use booking_repo::PgBookingRepository;
pub use client_repo::PgClientRepository;
pub use provider_repo::PgProviderRepository;

use slotbook_core::models::Timestamp;

/// Convert a domain timestamp to a BIGINT column value
///
/// The bits are stored unchanged, so slots above `i64::MAX` land as negative
/// BIGINTs and come back intact through [`from_db_timestamp`].
pub(crate) fn to_db_timestamp(value: Timestamp) -> i64 {
    value as i64
}

/// Convert a BIGINT column value back to a domain timestamp
pub(crate) fn from_db_timestamp(value: i64) -> Timestamp {
    value as Timestamp
}
