//! Provider DTOs
//!
//! Request and response types for provider endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slotbook_core::models::{Review, ServiceProvider};
use validator::Validate;

/// Provider creation request
///
/// Availability entries are kept raw and parsed by the registry, which
/// accepts integers and strings of digits.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProviderCreateRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Kind of service offered
    #[validate(length(min = 1, message = "Service type is required"))]
    pub service_type: String,

    /// Contact information
    #[validate(length(min = 1, message = "Contact info is required"))]
    pub contact_info: String,

    /// Bookable slots
    #[serde(default)]
    pub availability: Vec<Value>,
}

/// Availability replacement request
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    /// The new complete set of slots
    pub availability: Vec<Value>,
}

/// Review as exposed by the API
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub client_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: u64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            client_id: review.client_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

/// Provider response
#[derive(Debug, Clone, Serialize)]
pub struct ProviderResponse {
    /// Provider ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Service type
    pub service_type: String,

    /// Contact information
    pub contact_info: String,

    /// Creation time in nanoseconds since the epoch
    pub created_at: u64,

    /// Integer mean rating, 0 without reviews
    pub average_rating: u8,

    /// Reviews in the order they were added
    pub reviews: Vec<ReviewResponse>,

    /// Slots in ascending order
    pub availability: Vec<u64>,
}

impl From<ServiceProvider> for ProviderResponse {
    fn from(provider: ServiceProvider) -> Self {
        Self {
            id: provider.id,
            name: provider.name,
            service_type: provider.service_type,
            contact_info: provider.contact_info,
            created_at: provider.created_at,
            average_rating: provider.average_rating,
            reviews: provider.reviews.into_iter().map(Into::into).collect(),
            availability: provider.availability.into_iter().collect(),
        }
    }
}
