//! SlotBook Storage Layer
//!
//! This crate provides the storage engines behind the repository traits
//! defined in slotbook-core:
//!
//! - PostgreSQL connection pool management and embedded migrations
//! - PostgreSQL repositories for providers, clients and bookings
//! - In-memory arena repositories for tests and local development

pub mod memory;
pub mod pool;
pub mod repositories;

pub use memory::{MemoryBookingRepository, MemoryClientRepository, MemoryProviderRepository};
pub use pool::{create_pool, run_migrations};
pub use repositories::*;

// Re-export commonly used types
pub use slotbook_core::{AppError, AppResult};
pub use sqlx::PgPool;
