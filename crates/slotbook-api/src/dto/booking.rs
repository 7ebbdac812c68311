//! Booking DTOs
//!
//! Request and response types for booking and review endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slotbook_core::models::{Booking, BookingStatus};
use slotbook_core::validation::parse_timestamp;
use slotbook_core::{AppError, AppResult};
use validator::Validate;

/// Booking creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingCreateRequest {
    /// Provider to book
    #[validate(length(min = 1, message = "Provider id is required"))]
    pub service_provider_id: String,

    /// Client making the booking
    #[validate(length(min = 1, message = "Client id is required"))]
    pub client_id: String,

    /// Requested slot, integer or string of digits
    pub service_date: Value,

    /// Requested service
    pub service_type: String,
}

impl BookingCreateRequest {
    /// Parse the requested slot
    pub fn service_date(&self) -> AppResult<u64> {
        parse_timestamp(&self.service_date)
    }
}

/// Reschedule request
#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleRequest {
    /// New slot, integer or string of digits
    pub new_date: Value,
}

impl RescheduleRequest {
    /// Parse the new slot
    pub fn new_date(&self) -> AppResult<u64> {
        parse_timestamp(&self.new_date)
    }
}

/// Review submission
///
/// The rating range is checked by the review engine, after the duplicate
/// check.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub rating: i64,

    #[serde(default)]
    pub comment: String,
}

/// Status change request
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    /// Target status (pending, confirmed, canceled, completed)
    pub status: String,
}

impl StatusUpdateRequest {
    /// Parse the target status
    pub fn status(&self) -> AppResult<BookingStatus> {
        BookingStatus::from_str(&self.status)
            .ok_or_else(|| AppError::Validation(format!("Invalid status: {}", self.status)))
    }
}

/// Booking response
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    /// Booking ID
    pub id: String,

    /// Provider ID
    pub service_provider_id: String,

    /// Client ID
    pub client_id: String,

    /// Booked slot
    pub service_date: u64,

    /// Requested service
    pub service_type: String,

    /// Status
    pub status: String,

    /// Creation time in nanoseconds since the epoch
    pub created_at: u64,

    /// Last update time in nanoseconds since the epoch
    pub updated_at: u64,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            service_provider_id: booking.service_provider_id,
            client_id: booking.client_id,
            service_date: booking.service_date,
            service_type: booking.service_type,
            status: booking.status.to_string(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
