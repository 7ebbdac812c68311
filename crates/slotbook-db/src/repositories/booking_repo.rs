//! Booking repository implementation
//!
//! Provides PostgreSQL-backed storage for bookings with an indexed
//! per-provider history query.

use super::{from_db_timestamp, to_db_timestamp};
use async_trait::async_trait;
use slotbook_core::{
    models::{Booking, BookingStatus},
    traits::{BookingRepository, Repository},
    AppError, AppResult,
};
use sqlx::PgPool;
use tracing::{debug, error, instrument, warn};

/// PostgreSQL implementation of BookingRepository
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parse booking status from string
    fn parse_status(s: &str) -> BookingStatus {
        BookingStatus::from_str(s).unwrap_or_else(|| {
            warn!("Unknown booking status in storage: {}", s);
            BookingStatus::Pending
        })
    }
}

#[async_trait]
impl Repository<Booking> for PgBookingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Booking>> {
        debug!("Finding booking by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT id, service_provider_id, client_id, service_date,
                   service_type, status, created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding booking {}: {}", id, e);
            AppError::Database(format!("Failed to find booking: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        debug!("Finding all bookings with limit {} offset {}", limit, offset);

        let rows = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT id, service_provider_id, client_id, service_date,
                   service_type, status, created_at, updated_at
            FROM bookings
            ORDER BY seq
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding bookings: {}", e);
            AppError::Database(format!("Failed to fetch bookings: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting bookings: {}", e);
                AppError::Database(format!("Failed to count bookings: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &Booking) -> AppResult<Booking> {
        debug!(
            "Creating booking {} for provider {}",
            entity.id, entity.service_provider_id
        );

        let row = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            INSERT INTO bookings (
                id, service_provider_id, client_id, service_date,
                service_type, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, service_provider_id, client_id, service_date,
                      service_type, status, created_at, updated_at
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.service_provider_id)
        .bind(&entity.client_id)
        .bind(to_db_timestamp(entity.service_date))
        .bind(&entity.service_type)
        .bind(entity.status.to_string())
        .bind(to_db_timestamp(entity.created_at))
        .bind(to_db_timestamp(entity.updated_at))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating booking: {}", e);
            AppError::Database(format!("Failed to create booking: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Booking) -> AppResult<Booking> {
        debug!("Updating booking: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            UPDATE bookings
            SET service_provider_id = $2,
                client_id = $3,
                service_date = $4,
                service_type = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING id, service_provider_id, client_id, service_date,
                      service_type, status, created_at, updated_at
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.service_provider_id)
        .bind(&entity.client_id)
        .bind(to_db_timestamp(entity.service_date))
        .bind(&entity.service_type)
        .bind(entity.status.to_string())
        .bind(to_db_timestamp(entity.updated_at))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating booking {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update booking: {}", e))
        })?
        .ok_or_else(|| AppError::NotFound(format!("booking {}", entity.id)))?;

        Ok(row.into())
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self))]
    async fn find_by_provider(&self, provider_id: &str) -> AppResult<Vec<Booking>> {
        debug!("Finding bookings for provider: {}", provider_id);

        let rows = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT id, service_provider_id, client_id, service_date,
                   service_type, status, created_at, updated_at
            FROM bookings
            WHERE service_provider_id = $1
            ORDER BY seq
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding provider bookings: {}", e);
            AppError::Database(format!("Failed to find provider bookings: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: String,
    service_provider_id: String,
    client_id: String,
    service_date: i64,
    service_type: String,
    status: String,
    created_at: i64,
    updated_at: i64,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            service_provider_id: row.service_provider_id,
            client_id: row.client_id,
            service_date: from_db_timestamp(row.service_date),
            service_type: row.service_type,
            status: PgBookingRepository::parse_status(&row.status),
            created_at: from_db_timestamp(row.created_at),
            updated_at: from_db_timestamp(row.updated_at),
        }
    }
}
