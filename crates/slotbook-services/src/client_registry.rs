//! Client registry
//!
//! Creates clients and keeps contact info unique across all of them.

use slotbook_core::{
    models::Client, traits::ClientRepository, validation::require_text, AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::WriteLock;

/// Client registry service
pub struct ClientRegistry {
    client_repo: Arc<dyn ClientRepository>,
    write_lock: WriteLock,
}

impl ClientRegistry {
    /// Create a new client registry
    pub fn new(client_repo: Arc<dyn ClientRepository>, write_lock: WriteLock) -> Self {
        Self {
            client_repo,
            write_lock,
        }
    }

    /// Register a new client
    ///
    /// # Errors
    ///
    /// - `Validation` if name or contact info is blank
    /// - `Duplicate` if another client already uses the same trimmed contact info
    #[instrument(skip(self))]
    pub async fn create_client(&self, name: &str, contact_info: &str) -> AppResult<Client> {
        let name = require_text("name", name)?;
        let contact_info = require_text("contact_info", contact_info)?;

        let _guard = self.write_lock.lock().await;

        if let Some(existing) = self.client_repo.find_by_contact_info(&contact_info).await? {
            warn!(
                existing_id = %existing.id,
                "Client creation failed: contact info already registered"
            );
            return Err(AppError::Duplicate(format!(
                "contact info {} is already registered",
                contact_info
            )));
        }

        let client = self.client_repo.create(&Client::new(name, contact_info)).await?;

        info!(id = %client.id, "Client created");
        Ok(client)
    }

    /// Get a client by id
    #[instrument(skip(self))]
    pub async fn get_client(&self, id: &str) -> AppResult<Client> {
        debug!("Looking up client {}", id);

        self.client_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("client {}", id)))
    }
}
