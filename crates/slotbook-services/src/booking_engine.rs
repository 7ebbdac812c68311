//! Booking engine
//!
//! Orchestrates the booking lifecycle:
//! - Create bookings against a provider's availability
//! - Reschedule open bookings to another offered slot
//! - Drive status transitions (Pending -> Confirmed -> Completed, or Canceled)
//! - Answer per-provider history queries
//!
//! Booking a slot does not remove it from the provider's availability, so the
//! same slot can be booked more than once.

use slotbook_core::{
    models::{Booking, BookingStatus, ServiceProvider, Timestamp},
    traits::{BookingRepository, ClientRepository, ProviderRepository},
    validation::require_text,
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::WriteLock;

/// Booking engine service
pub struct BookingEngine {
    provider_repo: Arc<dyn ProviderRepository>,
    client_repo: Arc<dyn ClientRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    write_lock: WriteLock,
}

impl BookingEngine {
    /// Create a new booking engine
    pub fn new(
        provider_repo: Arc<dyn ProviderRepository>,
        client_repo: Arc<dyn ClientRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        write_lock: WriteLock,
    ) -> Self {
        Self {
            provider_repo,
            client_repo,
            booking_repo,
            write_lock,
        }
    }

    async fn load_provider(&self, id: &str) -> AppResult<ServiceProvider> {
        self.provider_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("provider {}", id)))
    }

    async fn load_booking(&self, id: &str) -> AppResult<Booking> {
        self.booking_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("booking {}", id)))
    }

    /// Fail unless `date` is one of the provider's slots
    fn ensure_offered(provider: &ServiceProvider, date: Timestamp) -> AppResult<()> {
        if provider.availability.is_empty() {
            warn!(provider_id = %provider.id, "Provider has no availability");
            return Err(AppError::InvalidState(format!(
                "provider {} has no availability",
                provider.id
            )));
        }

        if !provider.is_available(date) {
            warn!(provider_id = %provider.id, date, "Requested date not offered");
            return Err(AppError::Unavailable(format!(
                "provider {} is not available at {}",
                provider.id, date
            )));
        }

        Ok(())
    }

    /// Create a booking in Pending status
    ///
    /// # Errors
    ///
    /// - `NotFound` if the provider or the client does not exist
    /// - `InvalidState` if the provider offers no slots at all
    /// - `Unavailable` if `service_date` is not one of the provider's slots
    /// - `Validation` if `service_type` is blank
    #[instrument(skip(self))]
    pub async fn create_booking(
        &self,
        provider_id: &str,
        client_id: &str,
        service_date: Timestamp,
        service_type: &str,
    ) -> AppResult<Booking> {
        let _guard = self.write_lock.lock().await;

        let provider = self.load_provider(provider_id).await?;

        if self.client_repo.find_by_id(client_id).await?.is_none() {
            warn!(client_id, "Booking failed: unknown client");
            return Err(AppError::NotFound(format!("client {}", client_id)));
        }

        Self::ensure_offered(&provider, service_date)?;
        let service_type = require_text("service_type", service_type)?;

        let booking = Booking::new(
            provider.id.clone(),
            client_id.to_string(),
            service_date,
            service_type,
        );
        let created = self.booking_repo.create(&booking).await?;

        info!(
            id = %created.id,
            provider_id = %created.service_provider_id,
            service_date = created.service_date,
            "Booking created"
        );
        Ok(created)
    }

    /// Move an open booking to another offered slot
    ///
    /// Only `service_date` changes; the status is left as it was.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the booking or its provider does not exist
    /// - `InvalidState` if the booking is Completed or Canceled, or the
    ///   provider offers no slots
    /// - `Unavailable` if `new_date` is not one of the provider's slots
    #[instrument(skip(self))]
    pub async fn reschedule_booking(&self, booking_id: &str, new_date: Timestamp) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut booking = self.load_booking(booking_id).await?;

        if !booking.status.is_reschedulable() {
            warn!(booking_id, status = %booking.status, "Reschedule rejected");
            return Err(AppError::InvalidState(format!(
                "booking {} is {} and cannot be rescheduled",
                booking.id, booking.status
            )));
        }

        let provider = self.load_provider(&booking.service_provider_id).await?;
        Self::ensure_offered(&provider, new_date)?;

        let previous = booking.service_date;
        booking.service_date = new_date;
        booking.touch();
        self.booking_repo.update(&booking).await?;

        info!(
            id = %booking.id,
            from = previous,
            to = new_date,
            "Booking rescheduled"
        );
        Ok(())
    }

    /// Apply a status transition driven by the provider or an operator
    ///
    /// # Errors
    ///
    /// - `NotFound` if the booking does not exist
    /// - `InvalidState` if the move is not part of the booking lifecycle
    #[instrument(skip(self))]
    pub async fn update_status(&self, booking_id: &str, status: BookingStatus) -> AppResult<Booking> {
        let _guard = self.write_lock.lock().await;

        let mut booking = self.load_booking(booking_id).await?;

        if !booking.status.can_transition_to(status) {
            warn!(
                booking_id,
                from = %booking.status,
                to = %status,
                "Status transition rejected"
            );
            return Err(AppError::InvalidState(format!(
                "booking {} cannot move from {} to {}",
                booking.id, booking.status, status
            )));
        }

        let previous = booking.status;
        booking.status = status;
        booking.touch();
        let updated = self.booking_repo.update(&booking).await?;

        info!(id = %updated.id, from = %previous, to = %status, "Booking status changed");
        Ok(updated)
    }

    /// Get a booking by id
    #[instrument(skip(self))]
    pub async fn get_booking(&self, id: &str) -> AppResult<Booking> {
        debug!("Looking up booking {}", id);
        self.load_booking(id).await
    }

    /// All bookings of a provider in storage order
    ///
    /// An empty history is reported as `NotFound`, the same as an unknown
    /// provider.
    #[instrument(skip(self))]
    pub async fn get_provider_history(&self, provider_id: &str) -> AppResult<Vec<Booking>> {
        let bookings = self.booking_repo.find_by_provider(provider_id).await?;

        if bookings.is_empty() {
            debug!("No bookings for provider {}", provider_id);
            return Err(AppError::NotFound(format!(
                "no bookings for provider {}",
                provider_id
            )));
        }

        debug!("Found {} bookings for provider {}", bookings.len(), provider_id);
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookingServices;
    use serde_json::json;

    struct Fixture {
        services: BookingServices,
        provider_id: String,
        client_id: String,
    }

    async fn fixture(slots: &[u64]) -> Fixture {
        let services = BookingServices::in_memory();
        let slots: Vec<_> = slots.iter().map(|s| json!(s)).collect();

        let provider = services
            .providers
            .create_provider("Ana", "haircut", "ana@example.com", &slots)
            .await
            .unwrap();
        let client = services
            .clients
            .create_client("Bob", "bob@example.com")
            .await
            .unwrap();

        Fixture {
            services,
            provider_id: provider.id,
            client_id: client.id,
        }
    }

    #[tokio::test]
    async fn test_create_booking_in_availability() {
        let f = fixture(&[100, 200]).await;

        let booking = f
            .services
            .bookings
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.service_date, 100);
        assert_eq!(booking.service_provider_id, f.provider_id);
        assert_eq!(booking.client_id, f.client_id);
    }

    #[tokio::test]
    async fn test_create_booking_outside_availability() {
        let f = fixture(&[100, 200]).await;

        let err = f
            .services
            .bookings
            .create_booking(&f.provider_id, &f.client_id, 150, "haircut")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_create_booking_empty_availability() {
        let f = fixture(&[]).await;

        let err = f
            .services
            .bookings
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_create_booking_unknown_references() {
        let f = fixture(&[100]).await;
        let engine = &f.services.bookings;

        assert!(matches!(
            engine
                .create_booking("nope", &f.client_id, 100, "haircut")
                .await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            engine
                .create_booking(&f.provider_id, "nope", 100, "haircut")
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_booking_blank_service_type() {
        let f = fixture(&[100]).await;

        assert!(matches!(
            f.services
                .bookings
                .create_booking(&f.provider_id, &f.client_id, 100, "  ")
                .await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_same_slot_can_be_booked_twice() {
        let f = fixture(&[100]).await;
        let engine = &f.services.bookings;

        let first = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();
        let second = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        let provider = f.services.providers.get_provider(&f.provider_id).await.unwrap();
        assert!(provider.is_available(100));
    }

    #[tokio::test]
    async fn test_reschedule_keeps_status() {
        let f = fixture(&[100, 200]).await;
        let engine = &f.services.bookings;

        let booking = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();
        engine
            .update_status(&booking.id, BookingStatus::Confirmed)
            .await
            .unwrap();

        engine.reschedule_booking(&booking.id, 200).await.unwrap();

        let stored = engine.get_booking(&booking.id).await.unwrap();
        assert_eq!(stored.service_date, 200);
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert_eq!(stored.created_at, booking.created_at);
    }

    #[tokio::test]
    async fn test_reschedule_to_unavailable_date() {
        let f = fixture(&[100, 200]).await;
        let engine = &f.services.bookings;

        let booking = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();

        let err = engine.reschedule_booking(&booking.id, 300).await.unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));

        let stored = engine.get_booking(&booking.id).await.unwrap();
        assert_eq!(stored.service_date, 100);
    }

    #[tokio::test]
    async fn test_reschedule_closed_booking() {
        let f = fixture(&[100, 200]).await;
        let engine = &f.services.bookings;

        let booking = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();
        engine
            .update_status(&booking.id, BookingStatus::Canceled)
            .await
            .unwrap();

        assert!(matches!(
            engine.reschedule_booking(&booking.id, 200).await,
            Err(AppError::InvalidState(_))
        ));
        assert!(matches!(
            engine.reschedule_booking("missing", 200).await,
            Err(AppError::NotFound(_))
        ));

        let done = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();
        engine
            .update_status(&done.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        engine
            .update_status(&done.id, BookingStatus::Completed)
            .await
            .unwrap();

        assert!(matches!(
            engine.reschedule_booking(&done.id, 200).await,
            Err(AppError::InvalidState(_))
        ));
        let stored = engine.get_booking(&done.id).await.unwrap();
        assert_eq!(stored.service_date, 100);
        assert_eq!(stored.status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn test_reschedule_after_availability_cleared() {
        let f = fixture(&[100]).await;
        let engine = &f.services.bookings;

        let booking = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();
        f.services
            .providers
            .replace_availability(&f.provider_id, &[])
            .await
            .unwrap();

        assert!(matches!(
            engine.reschedule_booking(&booking.id, 100).await,
            Err(AppError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let f = fixture(&[100]).await;
        let engine = &f.services.bookings;

        let booking = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "haircut")
            .await
            .unwrap();

        assert!(matches!(
            engine
                .update_status(&booking.id, BookingStatus::Completed)
                .await,
            Err(AppError::InvalidState(_))
        ));

        engine
            .update_status(&booking.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        let done = engine
            .update_status(&booking.id, BookingStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, BookingStatus::Completed);

        assert!(matches!(
            engine
                .update_status(&booking.id, BookingStatus::Canceled)
                .await,
            Err(AppError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn test_provider_history() {
        let f = fixture(&[100, 200]).await;
        let engine = &f.services.bookings;

        assert!(matches!(
            engine.get_provider_history(&f.provider_id).await,
            Err(AppError::NotFound(_))
        ));

        let first = engine
            .create_booking(&f.provider_id, &f.client_id, 200, "haircut")
            .await
            .unwrap();
        let second = engine
            .create_booking(&f.provider_id, &f.client_id, 100, "shave")
            .await
            .unwrap();

        let history = engine.get_provider_history(&f.provider_id).await.unwrap();
        assert_eq!(history, vec![first, second]);

        assert!(matches!(
            engine.get_provider_history("unknown").await,
            Err(AppError::NotFound(_))
        ));
    }
}
