//! Booking model
//!
//! A booking links a client to a provider for one slot of the provider's
//! availability. Lifecycle:
//! 1. Created as Pending
//! 2. Confirmed or Canceled
//! 3. A confirmed booking ends Completed or Canceled

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{new_id, now_nanos, Timestamp};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, awaiting confirmation
    #[default]
    Pending,
    /// Accepted by the provider
    Confirmed,
    /// Called off before completion
    Canceled,
    /// Service delivered
    Completed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Canceled => write!(f, "canceled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

impl BookingStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "canceled" | "cancelled" => Some(BookingStatus::Canceled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    /// Check if the service date may still change
    pub fn is_reschedulable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Check if the booking reached an end state
    pub fn is_final(&self) -> bool {
        !self.is_reschedulable()
    }

    /// Check if moving to `next` follows the lifecycle
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Canceled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
                | (BookingStatus::Confirmed, BookingStatus::Canceled)
        )
    }
}

/// Booking entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: String,

    /// Referenced provider
    pub service_provider_id: String,

    /// Referenced client
    pub client_id: String,

    /// Booked slot, a member of the provider's availability when set
    pub service_date: Timestamp,

    /// Requested service
    pub service_type: String,

    /// Current status
    pub status: BookingStatus,

    /// Creation timestamp, never changes
    pub created_at: Timestamp,

    /// Last write timestamp
    pub updated_at: Timestamp,
}

impl Booking {
    /// Create a new pending booking
    pub fn new(
        service_provider_id: String,
        client_id: String,
        service_date: Timestamp,
        service_type: String,
    ) -> Self {
        let now = now_nanos();
        Self {
            id: new_id(),
            service_provider_id,
            client_id,
            service_date,
            service_type,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = now_nanos().max(self.created_at);
    }
}
