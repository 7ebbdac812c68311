//! Review engine
//!
//! Attaches client reviews to providers once a booking is completed and keeps
//! the provider's average rating current. A client may review a given
//! provider only once, no matter how many bookings they completed with it.

use slotbook_core::{
    models::{BookingStatus, Review},
    traits::{BookingRepository, ProviderRepository},
    validation::validate_rating,
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::WriteLock;

/// Review engine service
pub struct ReviewEngine {
    provider_repo: Arc<dyn ProviderRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    write_lock: WriteLock,
}

impl ReviewEngine {
    /// Create a new review engine
    pub fn new(
        provider_repo: Arc<dyn ProviderRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        write_lock: WriteLock,
    ) -> Self {
        Self {
            provider_repo,
            booking_repo,
            write_lock,
        }
    }

    /// Review the provider of a completed booking
    ///
    /// # Errors
    ///
    /// - `NotFound` if the booking or its provider does not exist
    /// - `InvalidState` if the booking is not Completed
    /// - `Duplicate` if the booking's client already reviewed the provider
    /// - `Validation` if `rating` is outside 1..=5
    #[instrument(skip(self, comment))]
    pub async fn add_review(&self, booking_id: &str, rating: i64, comment: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("booking {}", booking_id)))?;

        if booking.status != BookingStatus::Completed {
            warn!(booking_id, status = %booking.status, "Review rejected: booking not completed");
            return Err(AppError::InvalidState(format!(
                "booking {} is {}, only completed bookings can be reviewed",
                booking.id, booking.status
            )));
        }

        let mut provider = self
            .provider_repo
            .find_by_id(&booking.service_provider_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("provider {}", booking.service_provider_id))
            })?;

        if provider.has_review_from(&booking.client_id) {
            warn!(
                provider_id = %provider.id,
                client_id = %booking.client_id,
                "Review rejected: client already reviewed provider"
            );
            return Err(AppError::Duplicate(format!(
                "client {} already reviewed provider {}",
                booking.client_id, provider.id
            )));
        }

        let rating = validate_rating(rating)?;

        provider.push_review(Review::new(
            booking.client_id.clone(),
            rating,
            comment.to_string(),
        ));
        let updated = self.provider_repo.update(&provider).await?;

        info!(
            provider_id = %updated.id,
            rating,
            average_rating = updated.average_rating,
            reviews = updated.reviews.len(),
            "Review added"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookingServices;
    use serde_json::json;
    use slotbook_core::models::Booking;

    async fn completed_booking(services: &BookingServices, provider_id: &str, contact: &str) -> Booking {
        let client = services
            .clients
            .create_client("Client", contact)
            .await
            .unwrap();
        let booking = services
            .bookings
            .create_booking(provider_id, &client.id, 100, "haircut")
            .await
            .unwrap();
        services
            .bookings
            .update_status(&booking.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        services
            .bookings
            .update_status(&booking.id, BookingStatus::Completed)
            .await
            .unwrap()
    }

    async fn provider(services: &BookingServices) -> String {
        services
            .providers
            .create_provider("Ana", "haircut", "ana@example.com", &[json!(100), json!(200)])
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_worked_example() {
        let services = BookingServices::in_memory();
        let provider_id = provider(&services).await;
        let client = services
            .clients
            .create_client("A", "a@example.com")
            .await
            .unwrap();

        let b1 = services
            .bookings
            .create_booking(&provider_id, &client.id, 100, "haircut")
            .await
            .unwrap();
        assert_eq!(b1.status, BookingStatus::Pending);

        services.bookings.reschedule_booking(&b1.id, 200).await.unwrap();
        assert!(matches!(
            services.bookings.reschedule_booking(&b1.id, 300).await,
            Err(AppError::Unavailable(_))
        ));

        services
            .bookings
            .update_status(&b1.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        services
            .bookings
            .update_status(&b1.id, BookingStatus::Completed)
            .await
            .unwrap();

        services.reviews.add_review(&b1.id, 5, "great").await.unwrap();
        let p = services.providers.get_provider(&provider_id).await.unwrap();
        assert_eq!(p.average_rating, 5);
        assert_eq!(p.reviews.len(), 1);

        assert!(matches!(
            services.reviews.add_review(&b1.id, 1, "again").await,
            Err(AppError::Duplicate(_))
        ));
        let p = services.providers.get_provider(&provider_id).await.unwrap();
        assert_eq!(p.average_rating, 5);
        assert_eq!(p.reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_average_is_floor_of_mean() {
        let services = BookingServices::in_memory();
        let provider_id = provider(&services).await;

        let mut sum = 0u32;
        for (i, rating) in [5i64, 4, 4, 2].into_iter().enumerate() {
            let booking =
                completed_booking(&services, &provider_id, &format!("c{}@example.com", i)).await;
            services
                .reviews
                .add_review(&booking.id, rating, "")
                .await
                .unwrap();

            sum += rating as u32;
            let p = services.providers.get_provider(&provider_id).await.unwrap();
            assert_eq!(u32::from(p.average_rating), sum / (i as u32 + 1));
        }
    }

    #[tokio::test]
    async fn test_review_requires_completed_booking() {
        let services = BookingServices::in_memory();
        let provider_id = provider(&services).await;
        let client = services
            .clients
            .create_client("A", "a@example.com")
            .await
            .unwrap();
        let booking = services
            .bookings
            .create_booking(&provider_id, &client.id, 100, "haircut")
            .await
            .unwrap();

        assert!(matches!(
            services.reviews.add_review(&booking.id, 4, "").await,
            Err(AppError::InvalidState(_))
        ));
        assert!(matches!(
            services.reviews.add_review("missing", 4, "").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let services = BookingServices::in_memory();
        let provider_id = provider(&services).await;
        let booking = completed_booking(&services, &provider_id, "a@example.com").await;

        for rating in [0, 6, -1] {
            assert!(matches!(
                services.reviews.add_review(&booking.id, rating, "").await,
                Err(AppError::Validation(_))
            ));
        }

        let p = services.providers.get_provider(&provider_id).await.unwrap();
        assert!(p.reviews.is_empty());
        assert_eq!(p.average_rating, 0);
    }

    #[tokio::test]
    async fn test_duplicate_checked_before_rating() {
        let services = BookingServices::in_memory();
        let provider_id = provider(&services).await;
        let booking = completed_booking(&services, &provider_id, "a@example.com").await;

        services.reviews.add_review(&booking.id, 3, "ok").await.unwrap();

        assert!(matches!(
            services.reviews.add_review(&booking.id, 9, "").await,
            Err(AppError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_one_review_per_client_across_bookings() {
        let services = BookingServices::in_memory();
        let provider_id = provider(&services).await;
        let first = completed_booking(&services, &provider_id, "a@example.com").await;

        let second = services
            .bookings
            .create_booking(&provider_id, &first.client_id, 200, "haircut")
            .await
            .unwrap();
        for status in [BookingStatus::Confirmed, BookingStatus::Completed] {
            services
                .bookings
                .update_status(&second.id, status)
                .await
                .unwrap();
        }
        assert_ne!(first.id, second.id);

        services.reviews.add_review(&first.id, 4, "good").await.unwrap();
        assert!(matches!(
            services.reviews.add_review(&second.id, 2, "meh").await,
            Err(AppError::Duplicate(_))
        ));

        let p = services.providers.get_provider(&provider_id).await.unwrap();
        assert_eq!(p.reviews.len(), 1);
        assert_eq!(p.average_rating, 4);
    }
}
