//! Tenant storage.
//!
//! A cached map of slug → restaurant record with an owner → slug index
//! maintained in lock-step, persisted through an injected blob backend.
//! The whole tenant map is serialized as one unit on every mutation —
//! acceptable at small tenant counts; a port to a real keyed store needs
//! per-slug transactions instead (see `rename`).
//!
//! Write protocol: serialize the updated map, hand it to the backend, and
//! only advance the in-memory cache after the write is confirmed. A failed
//! write leaves the cache serving the pre-write state, so callers never
//! observe unsaved data as saved.

mod file;
mod memory;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::restaurant::{OwnerId, RestaurantRecord};

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Persistence seam for the serialized tenant map.
///
/// The map is one opaque blob; `store` must replace it atomically (the file
/// backend writes a temp file and renames). Rename correctness depends on
/// the old and new slug entries changing together: a keyed backend that
/// writes entries separately reopens a crash window between delete and
/// insert and must document it.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Load the serialized tenant map, or `None` if nothing was stored yet.
    async fn load(&self) -> anyhow::Result<Option<Vec<u8>>>;

    /// Durably replace the serialized tenant map.
    async fn store(&self, data: &[u8]) -> anyhow::Result<()>;
}

/// Serialized shape of the tenant map.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TenantMap {
    restaurants: BTreeMap<String, RestaurantRecord>,
}

/// In-memory view: primary map plus the owner index.
///
/// The index is rebuilt from the primary map on open and updated in the
/// same critical section as the map on every mutation.
#[derive(Debug, Default)]
struct StoreState {
    by_slug: BTreeMap<String, RestaurantRecord>,
    owner_index: HashMap<OwnerId, String>,
}

/// Durable map of slug → restaurant record with an owner index.
pub struct TenantStore {
    backend: Arc<dyn StorageBackend>,
    state: RwLock<StoreState>,
}

impl TenantStore {
    /// Open the store, loading and indexing whatever the backend holds.
    pub async fn open(backend: Arc<dyn StorageBackend>) -> anyhow::Result<Self> {
        let map = match backend.load().await.context("failed to load tenant map")? {
            Some(bytes) => serde_json::from_slice::<TenantMap>(&bytes)
                .context("failed to parse tenant map")?,
            None => TenantMap::default(),
        };

        let owner_index = map
            .restaurants
            .values()
            .map(|record| (record.owner_id.clone(), record.slug.clone()))
            .collect();

        info!(tenants = map.restaurants.len(), "tenant store opened");

        Ok(Self {
            backend,
            state: RwLock::new(StoreState {
                by_slug: map.restaurants,
                owner_index,
            }),
        })
    }

    /// Look up a record by its public slug.
    pub async fn get_by_slug(&self, slug: &str) -> Option<RestaurantRecord> {
        self.state.read().await.by_slug.get(slug).cloned()
    }

    /// Look up a record through the owner index.
    pub async fn get_by_owner(&self, owner: &OwnerId) -> Option<RestaurantRecord> {
        let state = self.state.read().await;
        let slug = state.owner_index.get(owner)?;
        state.by_slug.get(slug).cloned()
    }

    /// Snapshot of all records, for uniqueness scans.
    pub async fn list_all(&self) -> Vec<RestaurantRecord> {
        self.state.read().await.by_slug.values().cloned().collect()
    }

    /// Upsert a record under its slug.
    ///
    /// Fails with `NameConflict` when the slug belongs to a different
    /// owner — the write is the final authority after any advisory
    /// uniqueness check. Slug changes must go through `rename`.
    pub async fn put(&self, record: RestaurantRecord) -> AppResult<()> {
        let mut state = self.state.write().await;

        if let Some(existing) = state.by_slug.get(&record.slug)
            && existing.owner_id != record.owner_id
        {
            return Err(AppError::NameConflict);
        }

        if let Some(current_slug) = state.owner_index.get(&record.owner_id)
            && *current_slug != record.slug
        {
            return Err(AppError::Internal(anyhow::anyhow!(
                "owner '{}' already holds slug '{}'; slug changes go through rename",
                record.owner_id,
                current_slug
            )));
        }

        let mut next = state.by_slug.clone();
        next.insert(record.slug.clone(), record.clone());
        self.persist(&next).await?;

        debug!(slug = %record.slug, owner = %record.owner_id, "tenant record written");
        state.owner_index.insert(record.owner_id.clone(), record.slug.clone());
        state.by_slug = next;
        Ok(())
    }

    /// Move a record to a new slug as one atomic operation.
    ///
    /// The new entry is written, the owner index updated, and the old entry
    /// removed in a single blob write — there is no window where both or
    /// neither slug exists.
    pub async fn rename(
        &self,
        old_slug: &str,
        new_slug: &str,
        mut record: RestaurantRecord,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;

        if let Some(existing) = state.by_slug.get(new_slug)
            && existing.owner_id != record.owner_id
        {
            return Err(AppError::NameConflict);
        }

        record.slug = new_slug.to_string();

        let mut next = state.by_slug.clone();
        next.remove(old_slug);
        next.insert(new_slug.to_string(), record.clone());
        self.persist(&next).await?;

        info!(old = %old_slug, new = %new_slug, owner = %record.owner_id, "tenant renamed");
        state.owner_index.insert(record.owner_id.clone(), new_slug.to_string());
        state.by_slug = next;
        Ok(())
    }

    async fn persist(&self, next: &BTreeMap<String, RestaurantRecord>) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(&SerializeMap { restaurants: next })
            .context("failed to serialize tenant map")
            .map_err(AppError::Persistence)?;

        self.backend
            .store(&bytes)
            .await
            .map_err(AppError::Persistence)
    }
}

/// Borrowed twin of [`TenantMap`] so persisting doesn't clone the map again.
#[derive(Serialize)]
struct SerializeMap<'a> {
    restaurants: &'a BTreeMap<String, RestaurantRecord>,
}

impl std::fmt::Debug for TenantStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantStore").finish()
    }
}
