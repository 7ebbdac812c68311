//! Common traits for repositories
//!
//! Defines the storage abstraction for the three keyed collections. Each
//! collection maps a generated string id to a full record; writes always
//! replace the whole record.

use crate::error::AppError;
use crate::models::{Booking, Client, ServiceProvider};
use async_trait::async_trait;
use serde::Serialize;

/// Generic repository trait for keyed records
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError>;

    /// Find all entities in storage order with pagination
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<T>, AppError>;

    /// Count total entities
    async fn count(&self) -> Result<i64, AppError>;

    /// Insert a new entity
    async fn create(&self, entity: &T) -> Result<T, AppError>;

    /// Replace an existing entity
    async fn update(&self, entity: &T) -> Result<T, AppError>;
}

/// Provider collection
#[async_trait]
pub trait ProviderRepository: Repository<ServiceProvider> {}

/// Client collection with contact lookups
#[async_trait]
pub trait ClientRepository: Repository<Client> {
    /// Find the client registered with this exact contact info
    async fn find_by_contact_info(&self, contact_info: &str) -> Result<Option<Client>, AppError>;
}

/// Booking collection with provider filtering
#[async_trait]
pub trait BookingRepository: Repository<Booking> {
    /// All bookings for a provider in storage order
    async fn find_by_provider(&self, provider_id: &str) -> Result<Vec<Booking>, AppError>;
}

/// Pagination parameters
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 1000),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
