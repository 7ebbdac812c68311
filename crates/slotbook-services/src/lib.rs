//! Business logic services for SlotBook
//!
//! This crate contains the services that implement the booking lifecycle and
//! rating aggregation on top of the repository traits.
//!
//! # Architecture
//!
//! - Each service owns `Arc` handles to the repositories it reads
//! - Every mutating operation holds the shared [`WriteLock`] for its whole
//!   read-validate-write sequence, so operations never interleave
//! - All operations are instrumented with tracing
//!
//! # Services
//!
//! - `ClientRegistry` - client creation with contact uniqueness
//! - `ProviderRegistry` - provider creation, availability, lookups
//! - `BookingEngine` - booking creation, rescheduling, status, history
//! - `ReviewEngine` - reviews and rating aggregation

pub mod booking_engine;
pub mod client_registry;
pub mod provider_registry;
pub mod review_engine;

pub use booking_engine::BookingEngine;
pub use client_registry::ClientRegistry;
pub use provider_registry::ProviderRegistry;
pub use review_engine::ReviewEngine;

use slotbook_core::traits::{BookingRepository, ClientRepository, ProviderRepository};
use slotbook_db::{MemoryBookingRepository, MemoryClientRepository, MemoryProviderRepository};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serializes mutating operations across all services
pub type WriteLock = Arc<Mutex<()>>;

/// All services wired to one set of collections and one write lock
#[derive(Clone)]
pub struct BookingServices {
    pub providers: Arc<ProviderRegistry>,
    pub clients: Arc<ClientRegistry>,
    pub bookings: Arc<BookingEngine>,
    pub reviews: Arc<ReviewEngine>,
}

impl BookingServices {
    /// Build the services over the given collections
    pub fn new(
        provider_repo: Arc<dyn ProviderRepository>,
        client_repo: Arc<dyn ClientRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        let write_lock: WriteLock = Arc::new(Mutex::new(()));

        Self {
            providers: Arc::new(ProviderRegistry::new(
                provider_repo.clone(),
                write_lock.clone(),
            )),
            clients: Arc::new(ClientRegistry::new(client_repo.clone(), write_lock.clone())),
            bookings: Arc::new(BookingEngine::new(
                provider_repo.clone(),
                client_repo,
                booking_repo.clone(),
                write_lock.clone(),
            )),
            reviews: Arc::new(ReviewEngine::new(provider_repo, booking_repo, write_lock)),
        }
    }

    /// Build the services over fresh in-memory collections
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryProviderRepository::new()),
            Arc::new(MemoryClientRepository::new()),
            Arc::new(MemoryBookingRepository::new()),
        )
    }
}
