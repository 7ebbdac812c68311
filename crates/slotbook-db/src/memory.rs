//! In-memory repository implementations
//!
//! Each collection is an arena: records live in a `Vec` in insertion order
//! and an id index points into it. Arenas are independent of each other and
//! each sits behind its own `parking_lot::RwLock`.

use async_trait::async_trait;
use parking_lot::RwLock;
use slotbook_core::{
    models::{Booking, Client, ServiceProvider},
    traits::{BookingRepository, ClientRepository, ProviderRepository, Repository},
    AppError, AppResult,
};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Records that can live in an arena
pub trait Keyed: Clone + Send + Sync {
    /// Collection name used in error messages
    const KIND: &'static str;

    fn key(&self) -> &str;
}

impl Keyed for ServiceProvider {
    const KIND: &'static str = "provider";

    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Client {
    const KIND: &'static str = "client";

    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Booking {
    const KIND: &'static str = "booking";

    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
struct ArenaInner<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

/// Insertion-ordered keyed store
#[derive(Debug)]
pub struct Arena<T> {
    inner: RwLock<ArenaInner<T>>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(ArenaInner {
                records: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }
}

impl<T: Keyed> Arena<T> {
    pub fn get(&self, id: &str) -> Option<T> {
        let inner = self.inner.read();
        inner.index.get(id).map(|&slot| inner.records[slot].clone())
    }

    pub fn page(&self, limit: i64, offset: i64) -> Vec<T> {
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        self.inner
            .read()
            .records
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&self, record: &T) -> AppResult<T> {
        let mut inner = self.inner.write();
        if inner.index.contains_key(record.key()) {
            return Err(AppError::Database(format!(
                "{} {} already stored",
                T::KIND,
                record.key()
            )));
        }

        let slot = inner.records.len();
        inner.index.insert(record.key().to_string(), slot);
        inner.records.push(record.clone());
        Ok(record.clone())
    }

    pub fn replace(&self, record: &T) -> AppResult<T> {
        let mut inner = self.inner.write();
        let slot = *inner
            .index
            .get(record.key())
            .ok_or_else(|| AppError::NotFound(format!("{} {}", T::KIND, record.key())))?;

        inner.records[slot] = record.clone();
        Ok(record.clone())
    }

    /// Records matching a predicate, in insertion order
    pub fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

macro_rules! arena_repository {
    ($name:ident, $entity:ty) => {
        /// In-memory implementation backed by an [`Arena`]
        #[derive(Debug, Default)]
        pub struct $name {
            arena: Arena<$entity>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        #[async_trait]
        impl Repository<$entity> for $name {
            #[instrument(skip(self))]
            async fn find_by_id(&self, id: &str) -> AppResult<Option<$entity>> {
                debug!("Finding {} by id: {}", <$entity as Keyed>::KIND, id);
                Ok(self.arena.get(id))
            }

            async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<$entity>> {
                Ok(self.arena.page(limit, offset))
            }

            async fn count(&self) -> AppResult<i64> {
                Ok(self.arena.len() as i64)
            }

            #[instrument(skip(self, entity))]
            async fn create(&self, entity: &$entity) -> AppResult<$entity> {
                debug!("Storing {} {}", <$entity as Keyed>::KIND, entity.key());
                self.arena.insert(entity)
            }

            #[instrument(skip(self, entity))]
            async fn update(&self, entity: &$entity) -> AppResult<$entity> {
                debug!("Replacing {} {}", <$entity as Keyed>::KIND, entity.key());
                self.arena.replace(entity)
            }
        }
    };
}

arena_repository!(MemoryProviderRepository, ServiceProvider);
arena_repository!(MemoryClientRepository, Client);
arena_repository!(MemoryBookingRepository, Booking);

impl ProviderRepository for MemoryProviderRepository {}

#[async_trait]
impl ClientRepository for MemoryClientRepository {
    async fn find_by_contact_info(&self, contact_info: &str) -> AppResult<Option<Client>> {
        // full scan, matching how the registry defines uniqueness
        Ok(self
            .arena
            .filter(|c| c.contact_info == contact_info)
            .into_iter()
            .next())
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    #[instrument(skip(self))]
    async fn find_by_provider(&self, provider_id: &str) -> AppResult<Vec<Booking>> {
        debug!("Scanning bookings for provider: {}", provider_id);
        Ok(self
            .arena
            .filter(|b| b.service_provider_id == provider_id))
    }
}
