//! Per-entity async locks with namespacing.
//!
//! Callers serialize mutations on a single entity by holding the guard for
//! `"{ns}:{key}"`. Multi-entity operations must take the venue guard first
//! and then user guards via [`EntityLocks::lock_many`], which acquires in
//! sorted key order; that fixed hierarchy rules out deadlock.
//!
//! Guards release on drop. Lock cells stay in the map once created; the
//! entity id space is the working set, so the map stays small.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
pub struct EntityLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

/// Held lock on one entity. The entity may be mutated only while a guard
/// for its key is alive.
pub struct EntityGuard {
    key: String,
    _permit: OwnedMutexGuard<()>,
}

impl EntityGuard {
    /// Namespaced lock key ("ns:key").
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard for `{ns}:{key}`, waiting if it is already held.
    pub async fn lock(&self, ns: &str, key: &str) -> EntityGuard {
        let namespaced = format!("{ns}:{key}");
        // Clone the cell out before awaiting so the shard lock is not held
        // across the await point.
        let cell = self
            .inner
            .entry(namespaced.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let permit = cell.lock_owned().await;
        EntityGuard {
            key: namespaced,
            _permit: permit,
        }
    }

    /// Acquire guards for several keys in one namespace. Keys are deduped
    /// and locked in sorted order; every caller uses the same order, so
    /// overlapping sets cannot deadlock against each other.
    pub async fn lock_many(&self, ns: &str, keys: &[&str]) -> Vec<EntityGuard> {
        let mut sorted: Vec<&str> = keys.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut guards = Vec::with_capacity(sorted.len());
        for key in sorted {
            guards.push(self.lock(ns, key).await);
        }
        guards
    }
}
