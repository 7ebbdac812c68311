//! SlotBook Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the SlotBook booking system. It includes:
//!
//! - Domain models (ServiceProvider, Client, Booking, Review)
//! - Repository traits for the three keyed collections
//! - Input validation shared by the registries
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;
pub mod validation;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
