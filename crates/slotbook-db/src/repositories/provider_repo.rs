//! Service provider repository implementation
//!
//! Reviews are stored embedded in the provider row as JSONB so that a
//! review append and the recomputed average land in a single UPDATE.

use super::{from_db_timestamp, to_db_timestamp};
use async_trait::async_trait;
use slotbook_core::{
    models::{Review, ServiceProvider},
    traits::{ProviderRepository, Repository},
    AppError, AppResult,
};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of ProviderRepository
pub struct PgProviderRepository {
    pool: PgPool,
}

impl PgProviderRepository {
    /// Create a new provider repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn availability_to_db(entity: &ServiceProvider) -> Vec<i64> {
        entity
            .availability
            .iter()
            .map(|slot| to_db_timestamp(*slot))
            .collect()
    }
}

#[async_trait]
impl Repository<ServiceProvider> for PgProviderRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ServiceProvider>> {
        debug!("Finding provider by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, ProviderRow>(
            r#"
            SELECT id, name, service_type, contact_info,
                   created_at, average_rating, reviews, availability
            FROM service_providers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding provider {}: {}", id, e);
            AppError::Database(format!("Failed to find provider: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<ServiceProvider>> {
        debug!("Finding all providers with limit {} offset {}", limit, offset);

        let rows = sqlx::query_as::<sqlx::Postgres, ProviderRow>(
            r#"
            SELECT id, name, service_type, contact_info,
                   created_at, average_rating, reviews, availability
            FROM service_providers
            ORDER BY seq
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding providers: {}", e);
            AppError::Database(format!("Failed to fetch providers: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM service_providers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting providers: {}", e);
                AppError::Database(format!("Failed to count providers: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &ServiceProvider) -> AppResult<ServiceProvider> {
        debug!("Creating provider: {}", entity.id);

        let availability = Self::availability_to_db(entity);
        let created_at = to_db_timestamp(entity.created_at);

        let row = sqlx::query_as::<sqlx::Postgres, ProviderRow>(
            r#"
            INSERT INTO service_providers (
                id, name, service_type, contact_info,
                created_at, average_rating, reviews, availability
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, service_type, contact_info,
                      created_at, average_rating, reviews, availability
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.name)
        .bind(&entity.service_type)
        .bind(&entity.contact_info)
        .bind(created_at)
        .bind(i16::from(entity.average_rating))
        .bind(Json(&entity.reviews))
        .bind(availability)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating provider: {}", e);
            AppError::Database(format!("Failed to create provider: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &ServiceProvider) -> AppResult<ServiceProvider> {
        debug!("Updating provider: {}", entity.id);

        let availability = Self::availability_to_db(entity);

        let row = sqlx::query_as::<sqlx::Postgres, ProviderRow>(
            r#"
            UPDATE service_providers
            SET name = $2,
                service_type = $3,
                contact_info = $4,
                average_rating = $5,
                reviews = $6,
                availability = $7
            WHERE id = $1
            RETURNING id, name, service_type, contact_info,
                      created_at, average_rating, reviews, availability
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.name)
        .bind(&entity.service_type)
        .bind(&entity.contact_info)
        .bind(i16::from(entity.average_rating))
        .bind(Json(&entity.reviews))
        .bind(availability)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating provider {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update provider: {}", e))
        })?
        .ok_or_else(|| AppError::NotFound(format!("provider {}", entity.id)))?;

        Ok(row.into())
    }
}

impl ProviderRepository for PgProviderRepository {}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct ProviderRow {
    id: String,
    name: String,
    service_type: String,
    contact_info: String,
    created_at: i64,
    average_rating: i16,
    reviews: Json<Vec<Review>>,
    availability: Vec<i64>,
}

impl From<ProviderRow> for ServiceProvider {
    fn from(row: ProviderRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            service_type: row.service_type,
            contact_info: row.contact_info,
            created_at: from_db_timestamp(row.created_at),
            average_rating: row.average_rating.clamp(0, 5) as u8,
            reviews: row.reviews.0,
            availability: row.availability.into_iter().map(from_db_timestamp).collect(),
        }
    }
}
