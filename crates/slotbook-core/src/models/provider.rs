//! Service provider model
//!
//! A provider owns its availability set and the reviews left by clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{new_id, now_nanos, Timestamp};

/// Client review embedded in a provider record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Client that left the review
    pub client_id: String,

    /// Rating between 1 and 5
    pub rating: u8,

    /// Free-form comment
    pub comment: String,

    /// When the review was recorded
    pub created_at: Timestamp,
}

impl Review {
    pub fn new(client_id: String, rating: u8, comment: String) -> Self {
        Self {
            client_id,
            rating,
            comment,
            created_at: now_nanos(),
        }
    }
}

/// Service provider entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceProvider {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Kind of service offered
    pub service_type: String,

    /// How to reach the provider
    pub contact_info: String,

    /// Creation timestamp, never changes
    pub created_at: Timestamp,

    /// Integer mean of all review ratings, 0 without reviews
    pub average_rating: u8,

    /// Reviews in the order they were added
    pub reviews: Vec<Review>,

    /// Bookable slots
    pub availability: BTreeSet<Timestamp>,
}

impl ServiceProvider {
    /// Create a new provider with no reviews
    pub fn new(
        name: String,
        service_type: String,
        contact_info: String,
        availability: BTreeSet<Timestamp>,
    ) -> Self {
        Self {
            id: new_id(),
            name,
            service_type,
            contact_info,
            created_at: now_nanos(),
            average_rating: 0,
            reviews: Vec::new(),
            availability,
        }
    }

    /// Check whether a slot is offered
    pub fn is_available(&self, date: Timestamp) -> bool {
        self.availability.contains(&date)
    }

    /// Check if the given client already reviewed this provider
    pub fn has_review_from(&self, client_id: &str) -> bool {
        self.reviews.iter().any(|r| r.client_id == client_id)
    }

    /// Append a review and refresh the average rating
    pub fn push_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.average_rating = compute_average_rating(&self.reviews);
    }

    /// Replace the whole availability set
    pub fn replace_availability(&mut self, availability: BTreeSet<Timestamp>) {
        self.availability = availability;
    }
}

/// Integer-truncated mean of the ratings, 0 for an empty list
pub fn compute_average_rating(reviews: &[Review]) -> u8 {
    if reviews.is_empty() {
        return 0;
    }

    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    // mean of values in 1..=5 always fits
    (sum / reviews.len() as u64) as u8
}
