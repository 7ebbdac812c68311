//! Domain models for SlotBook
//!
//! This module contains the records stored in the three keyed collections
//! (providers, clients, bookings) plus the helpers that stamp them.

pub mod booking;
pub mod client;
pub mod provider;

pub use booking::{Booking, BookingStatus};
pub use client::Client;
pub use provider::{compute_average_rating, Review, ServiceProvider};

use chrono::Utc;
use uuid::Uuid;

/// Timestamp type used throughout the domain: nanoseconds since the Unix epoch
pub type Timestamp = u64;

/// Generate a fresh record identifier
///
/// UUID v7 strings sort by creation time, so key order follows insertion order.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current time in nanoseconds since the Unix epoch
pub fn now_nanos() -> Timestamp {
    Utc::now()
        .timestamp_nanos_opt()
        .map_or(0, |ns| ns.max(0) as Timestamp)
}
