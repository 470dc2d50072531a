//! Shop configuration, sourced from the environment.

use std::time::Duration;

use crate::error::FetchIssue;
use crate::util::env::{env_opt, env_parse};

/// Default upstream API root.
pub const DEFAULT_API_BASE: &str = "https://api.thebase.in/1";
/// Cached product lists live for 12 hours on both tiers.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 43_200;
/// Upstream page size ceiling.
pub const DEFAULT_PAGE_SIZE: u32 = 100;
/// Pause between successive page requests, upstream rate-limit courtesy.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 200;

/// Everything the catalog needs to talk to one shop's upstream API.
///
/// Token acquisition (OAuth dance, refresh) is collaborator-owned; this core
/// only consumes an already-valid bearer token.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub api_base: String,
    pub shop_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
    pub cache_ttl: Duration,
    pub page_size: u32,
    pub page_delay: Duration,
}

impl ShopConfig {
    /// Read the configuration from `BASE_*` environment variables.
    pub fn from_env() -> ShopConfig {
        ShopConfig {
            api_base: env_opt("BASE_API_URL").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            shop_id: env_opt("BASE_SHOP_ID"),
            client_id: env_opt("BASE_CLIENT_ID"),
            client_secret: env_opt("BASE_CLIENT_SECRET"),
            access_token: env_opt("BASE_ACCESS_TOKEN"),
            cache_ttl: Duration::from_secs(env_parse(
                "BASE_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )),
            page_size: env_parse("BASE_PAGE_SIZE", DEFAULT_PAGE_SIZE),
            page_delay: Duration::from_millis(env_parse(
                "BASE_PAGE_DELAY_MS",
                DEFAULT_PAGE_DELAY_MS,
            )),
        }
    }

    /// Minimal config for tests and embedded use: a shop id plus defaults.
    pub fn for_shop(shop_id: &str) -> ShopConfig {
        ShopConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            shop_id: Some(shop_id.to_string()),
            client_id: Some("embedded".to_string()),
            client_secret: Some("embedded".to_string()),
            access_token: Some("embedded".to_string()),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
        }
    }

    /// The shop id, or an empty string when unset (URLs still render).
    pub fn shop_id(&self) -> &str {
        self.shop_id.as_deref().unwrap_or("")
    }

    /// Gate for the fetch path: distinguishes "not configured at all" from
    /// "configured but not authenticated". Neither aborts the caller; the
    /// catalog records the issue and serves an empty list.
    pub fn readiness(&self) -> Result<&str, FetchIssue> {
        let configured = self.client_id.is_some()
            && self.client_secret.is_some()
            && self.shop_id.is_some();
        if !configured {
            return Err(FetchIssue::ConfigurationIncomplete(
                "BASE_CLIENT_ID / BASE_CLIENT_SECRET / BASE_SHOP_ID must be set".to_string(),
            ));
        }
        match self.access_token.as_deref() {
            Some(token) => Ok(token),
            None => Err(FetchIssue::AuthFailure(
                "no access token available; re-authentication required".to_string(),
            )),
        }
    }
}
