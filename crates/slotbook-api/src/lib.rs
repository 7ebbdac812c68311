//! API layer for SlotBook
//!
//! HTTP handlers and DTOs for providers, clients, bookings and reviews.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, PaginationParams};

pub use handlers::{
    configure_api, configure_bookings, configure_clients, configure_providers, health_check,
};
