//! Two-tier product-list cache: a fast process-local tier backed by a slower
//! shared tier, both addressed by the same key and TTL.
//!
//! Consistency rule: the fast tier is only ever refreshed *from* the slow
//! tier (backfill on slow-tier hit), never the reverse, and writes land on
//! the slow tier first so it stays authoritative across process restarts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::product::Product;

/// One key-value store with TTL support. Store failures must surface as
/// misses, never as errors; the caller always has re-fetch as a fallback.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Vec<Product>>;
    async fn set(&self, key: &str, payload: Vec<Product>, ttl: Duration);
    /// Idempotent; removing an absent key is not an error.
    async fn remove(&self, key: &str);
}

struct Entry {
    payload: Vec<Product>,
    expires_at: Instant,
}

/// In-process self-expiring store. Serves as the fast tier and as a stand-in
/// slow tier when no shared backend is wired up.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<Vec<Product>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.payload.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Expired: drop the entry so the map doesn't accumulate dead weight.
        self.entries.write().await.remove(key);
        None
    }

    async fn set(&self, key: &str, payload: Vec<Product>, ttl: Duration) {
        let entry = Entry {
            payload,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}

/// The layered cache. `get` reads through fast → slow with backfill; `set`
/// writes through slow → fast; `invalidate` clears both.
///
/// Writes replace the full list under one key, so concurrent readers see
/// either the previous generation or the new one, never a mix.
pub struct TieredCache {
    fast: Arc<dyn CacheStore>,
    slow: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl TieredCache {
    pub fn new(fast: Arc<dyn CacheStore>, slow: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { fast, slow, ttl }
    }

    /// Both tiers in-process; the usual wiring for a single-node deployment.
    pub fn in_memory(ttl: Duration) -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()), ttl)
    }

    pub async fn get(&self, key: &str) -> Option<Vec<Product>> {
        if let Some(payload) = self.fast.get(key).await {
            debug!(key, tier = "fast", "cache hit");
            return Some(payload);
        }
        match self.slow.get(key).await {
            Some(payload) => {
                debug!(key, tier = "slow", "cache hit; backfilling fast tier");
                self.fast.set(key, payload.clone(), self.ttl).await;
                Some(payload)
            }
            None => {
                debug!(key, "cache miss on both tiers");
                None
            }
        }
    }

    pub async fn set(&self, key: &str, payload: Vec<Product>) {
        // Slow tier first: if the process dies between the two writes, the
        // surviving tier is the authoritative one.
        self.slow.set(key, payload.clone(), self.ttl).await;
        self.fast.set(key, payload, self.ttl).await;
    }

    pub async fn invalidate(&self, key: &str) {
        self.slow.remove(key).await;
        self.fast.remove(key).await;
    }
}
