//! Read-through TTL cache for the owner directory
//!
//! Only the admin list and the owner profile are cached. Orders and the
//! service catalog are always fetched fresh.

use crate::core::catalog::{Admin, OwnerProfile};
use crate::core::error::Result;
use cached::{Cached, TimedCache};
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;

/// Default lifetime of a cached directory entry
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Per-owner cache of admins and owner profiles
pub struct DirectoryCache {
    ttl: Duration,
    admins: Mutex<TimedCache<i64, Vec<Admin>>>,
    owners: Mutex<TimedCache<i64, OwnerProfile>>,
}

impl DirectoryCache {
    /// Entries live for whole seconds; a fractional `ttl` is rounded up, so
    /// only `Duration::ZERO` disables caching
    pub fn new(ttl: Duration) -> Self {
        let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
        let ttl = Duration::from_secs(secs);
        Self {
            ttl,
            admins: Mutex::new(TimedCache::with_lifespan(secs)),
            owners: Mutex::new(TimedCache::with_lifespan(secs)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached admins of `owner_id`, or the result of `fetch`
    pub async fn admins<F, Fut>(&self, owner_id: i64, fetch: F) -> Result<Vec<Admin>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Admin>>>,
    {
        read_through(&self.admins, owner_id, fetch).await
    }

    /// Cached profile of `owner_id`, or the result of `fetch`
    pub async fn owner<F, Fut>(&self, owner_id: i64, fetch: F) -> Result<OwnerProfile>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<OwnerProfile>>,
    {
        read_through(&self.owners, owner_id, fetch).await
    }

    /// Drop every cached entry
    pub async fn invalidate(&self) {
        self.admins.lock().await.cache_clear();
        self.owners.lock().await.cache_clear();
        tracing::debug!("directory cache cleared");
    }
}

impl Default for DirectoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

/// Serve within the TTL, otherwise fetch and replace. Failed fetches are not cached.
async fn read_through<V, F, Fut>(
    slot: &Mutex<TimedCache<i64, V>>,
    owner_id: i64,
    fetch: F,
) -> Result<V>
where
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V>>,
{
    let mut cache = slot.lock().await;
    if let Some(hit) = cache.cache_get(&owner_id) {
        tracing::debug!(owner_id, "directory cache hit");
        return Ok(hit.clone());
    }

    let fresh = fetch().await?;
    cache.cache_set(owner_id, fresh.clone());
    Ok(fresh)
}
