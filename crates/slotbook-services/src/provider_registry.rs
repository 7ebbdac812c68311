//! Provider registry
//!
//! Creates providers and owns their availability set. The average rating is
//! maintained by the model on every review append, see `ReviewEngine`.

use serde_json::Value;
use slotbook_core::{
    models::ServiceProvider,
    traits::{Pagination, ProviderRepository},
    validation::{parse_availability, require_text},
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::WriteLock;

/// Provider registry service
pub struct ProviderRegistry {
    provider_repo: Arc<dyn ProviderRepository>,
    write_lock: WriteLock,
}

impl ProviderRegistry {
    /// Create a new provider registry
    pub fn new(provider_repo: Arc<dyn ProviderRepository>, write_lock: WriteLock) -> Self {
        Self {
            provider_repo,
            write_lock,
        }
    }

    /// Register a new provider
    ///
    /// # Arguments
    ///
    /// * `availability` - raw slot values; each must be an unsigned 64-bit
    ///   timestamp, as a JSON integer or a string of digits
    ///
    /// # Errors
    ///
    /// `Validation` if a text field is blank or any slot is malformed.
    #[instrument(skip(self, availability), fields(slots = availability.len()))]
    pub async fn create_provider(
        &self,
        name: &str,
        service_type: &str,
        contact_info: &str,
        availability: &[Value],
    ) -> AppResult<ServiceProvider> {
        let name = require_text("name", name)?;
        let service_type = require_text("service_type", service_type)?;
        let contact_info = require_text("contact_info", contact_info)?;
        let availability = parse_availability(availability)?;

        let provider = ServiceProvider::new(name, service_type, contact_info, availability);

        let _guard = self.write_lock.lock().await;
        let created = self.provider_repo.create(&provider).await?;

        info!(
            id = %created.id,
            slots = created.availability.len(),
            "Provider created"
        );
        Ok(created)
    }

    /// Get a provider by id
    #[instrument(skip(self))]
    pub async fn get_provider(&self, id: &str) -> AppResult<ServiceProvider> {
        debug!("Looking up provider {}", id);

        self.provider_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("provider {}", id)))
    }

    /// List providers in storage order, with the total count
    #[instrument(skip(self))]
    pub async fn list_providers(
        &self,
        pagination: &Pagination,
    ) -> AppResult<(Vec<ServiceProvider>, i64)> {
        let providers = self
            .provider_repo
            .find_all(pagination.limit(), pagination.offset())
            .await?;
        let total = self.provider_repo.count().await?;

        Ok((providers, total))
    }

    /// Replace a provider's whole availability set
    ///
    /// Existing bookings keep their dates even if those slots disappear.
    #[instrument(skip(self, availability), fields(slots = availability.len()))]
    pub async fn replace_availability(
        &self,
        id: &str,
        availability: &[Value],
    ) -> AppResult<ServiceProvider> {
        let availability = parse_availability(availability)?;

        let _guard = self.write_lock.lock().await;

        let mut provider = self
            .provider_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("provider {}", id)))?;

        provider.replace_availability(availability);
        let updated = self.provider_repo.update(&provider).await?;

        info!(
            id = %updated.id,
            slots = updated.availability.len(),
            "Provider availability replaced"
        );
        Ok(updated)
    }
}
