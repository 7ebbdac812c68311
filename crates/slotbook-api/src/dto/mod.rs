//! Data Transfer Objects (DTOs) for API requests and responses

pub mod booking;
pub mod client;
pub mod common;
pub mod provider;

pub use booking::*;
pub use client::*;
pub use common::*;
pub use provider::*;
