//! # Entity Cache
//!
//! One in-memory cache of the last full fetch per entity kind.
//!
//! ## The Stale-Cache Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The cache holds AT MOST the last full list response per kind.         │
//! │                                                                         │
//! │  read  ──► cached? return it : fetch, cache, return                     │
//! │  write ──► (any mutating call for that kind) ──► invalidate            │
//! │                                                                         │
//! │  Approving a document twice off a pre-refresh status is the primary    │
//! │  failure mode this guards against: after EVERY mutation the next       │
//! │  read refetches.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::ApiResult;

/// Cache slot for one entity kind's last full fetch.
#[derive(Debug)]
pub struct EntityCache<T> {
    slot: RwLock<Option<Arc<Vec<T>>>>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        EntityCache {
            slot: RwLock::new(None),
        }
    }
}

impl<T> EntityCache<T> {
    pub fn new() -> Self {
        EntityCache::default()
    }

    /// Returns the cached list, fetching (and caching) on a miss.
    ///
    /// A failed fetch caches nothing; the next read tries again.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> ApiResult<Arc<Vec<T>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<Vec<T>>>,
    {
        if let Some(cached) = self.slot.read().await.clone() {
            return Ok(cached);
        }

        let fresh = Arc::new(fetch().await?);
        *self.slot.write().await = Some(Arc::clone(&fresh));
        Ok(fresh)
    }

    /// Drops the cached list. Called after every mutating call for the kind.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    /// The cached list without fetching, if present.
    pub async fn peek(&self) -> Option<Arc<Vec<T>>> {
        self.slot.read().await.clone()
    }
}
