//! Client repository implementation

use async_trait::async_trait;
use slotbook_core::{
    models::Client,
    traits::{ClientRepository, Repository},
    AppError, AppResult,
};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of ClientRepository
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    /// Create a new client repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Client> for PgClientRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Client>> {
        debug!("Finding client by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, ClientRow>(
            "SELECT id, name, contact_info FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding client {}: {}", id, e);
            AppError::Database(format!("Failed to find client: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Client>> {
        debug!("Finding all clients with limit {} offset {}", limit, offset);

        let rows = sqlx::query_as::<sqlx::Postgres, ClientRow>(
            r#"
            SELECT id, name, contact_info
            FROM clients
            ORDER BY seq
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding clients: {}", e);
            AppError::Database(format!("Failed to fetch clients: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting clients: {}", e);
                AppError::Database(format!("Failed to count clients: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &Client) -> AppResult<Client> {
        debug!("Creating client: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, ClientRow>(
            r#"
            INSERT INTO clients (id, name, contact_info)
            VALUES ($1, $2, $3)
            RETURNING id, name, contact_info
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.name)
        .bind(&entity.contact_info)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // unique index on contact_info backs up the registry check
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Duplicate(format!(
                        "contact info {} is already registered",
                        entity.contact_info
                    ));
                }
            }
            error!("Database error creating client: {}", e);
            AppError::Database(format!("Failed to create client: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Client) -> AppResult<Client> {
        debug!("Updating client: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, ClientRow>(
            r#"
            UPDATE clients
            SET name = $2,
                contact_info = $3
            WHERE id = $1
            RETURNING id, name, contact_info
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.name)
        .bind(&entity.contact_info)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating client {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update client: {}", e))
        })?
        .ok_or_else(|| AppError::NotFound(format!("client {}", entity.id)))?;

        Ok(row.into())
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    #[instrument(skip(self))]
    async fn find_by_contact_info(&self, contact_info: &str) -> AppResult<Option<Client>> {
        debug!("Finding client by contact info");

        let result = sqlx::query_as::<sqlx::Postgres, ClientRow>(
            "SELECT id, name, contact_info FROM clients WHERE contact_info = $1",
        )
        .bind(contact_info)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding client by contact info: {}", e);
            AppError::Database(format!("Failed to find client: {}", e))
        })?;

        Ok(result.map(Into::into))
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, FromRow)]
struct ClientRow {
    id: String,
    name: String,
    contact_info: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            contact_info: row.contact_info,
        }
    }
}
