//! BASE shop product catalog core.
//!
//! Pipeline: the paginated fetcher pulls raw items from the upstream `items`
//! endpoint, deduplicates them, maps each into a [`product::Product`], and
//! the attribute extractor classifies it into the four facets (brand, color,
//! size, length) against the curated dictionary. The enriched list sits in a
//! two-tier cache and is served through the catalog; the filter engine
//! narrows it per request.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod product;
pub mod tracing;

pub mod util {
    pub mod env;
}

pub use catalog::{ProductCatalog, PRODUCTS_CACHE_KEY};
pub use dictionary::{Facet, FilterDictionary, FALLBACK_BRAND};
pub use error::FetchIssue;
pub use filter::FilterSelection;
pub use product::Product;
