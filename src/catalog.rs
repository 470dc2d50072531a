//! Catalog orchestration: cache-first product access and explicit
//! process-wide fetch state.
//!
//! The catalog is the sole cache writer. Extraction and filtering are pure,
//! so concurrent readers are safe; a refresh racing a reader may serve the
//! previous generation (bounded by the TTL) but never a mix of two
//! generations, because the cached list is replaced wholesale.

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::TieredCache;
use crate::config::ShopConfig;
use crate::error::FetchIssue;
use crate::extract::AttributeExtractor;
use crate::fetch::{fetch_all, ItemSource};
use crate::product::Product;

/// Fixed cache key for the enriched product list.
pub const PRODUCTS_CACHE_KEY: &str = "base_products";

/// Cache-backed view over one shop's products.
pub struct ProductCatalog<S: ItemSource> {
    source: S,
    cache: TieredCache,
    config: ShopConfig,
    /// Last issue recorded by a fetch cycle. Explicit state with an accessor,
    /// not an ambient global: set by the fetch path, cleared on clean runs.
    last_issue: RwLock<Option<FetchIssue>>,
}

impl<S: ItemSource> ProductCatalog<S> {
    pub fn new(source: S, cache: TieredCache, config: ShopConfig) -> Self {
        Self {
            source,
            cache,
            config,
            last_issue: RwLock::new(None),
        }
    }

    /// The enriched product list. `force` bypasses both cache tiers and
    /// re-fetches; otherwise a cache hit on either tier is served as-is.
    /// Never fails: on any issue the accumulated (possibly empty) list is
    /// returned and the issue is readable via [`Self::last_issue`].
    pub async fn products(&self, force: bool) -> Vec<Product> {
        if !force {
            if let Some(cached) = self.cache.get(PRODUCTS_CACHE_KEY).await {
                return cached;
            }
        }

        // Token *validity* is collaborator-owned; an expired token surfaces
        // as an UpstreamStatus issue from the first page request instead.
        if let Err(issue) = self.config.readiness() {
            warn!(error = %issue, "fetch not attempted");
            *self.last_issue.write().await = Some(issue);
            return Vec::new();
        }

        let outcome = fetch_all(&self.source, &self.config, AttributeExtractor::curated()).await;
        *self.last_issue.write().await = outcome.issue.clone();

        match &outcome.issue {
            None => info!(count = outcome.products.len(), "product fetch complete"),
            Some(issue) if issue.is_failure() => {
                warn!(count = outcome.products.len(), error = %issue, "product fetch degraded")
            }
            Some(_) => info!("product fetch returned no items"),
        }

        // An empty list is never written: the next call should retry instead
        // of serving a cached empty state for a full TTL.
        if !outcome.products.is_empty() {
            self.cache
                .set(PRODUCTS_CACHE_KEY, outcome.products.clone())
                .await;
        }
        outcome.products
    }

    /// Drop both cache tiers and re-fetch immediately (the admin "refresh
    /// cache" action).
    pub async fn refresh(&self) -> Vec<Product> {
        self.cache.invalidate(PRODUCTS_CACHE_KEY).await;
        self.products(true).await
    }

    /// The last recorded fetch issue, if any.
    pub async fn last_issue(&self) -> Option<FetchIssue> {
        self.last_issue.read().await.clone()
    }
}
