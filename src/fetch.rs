//! Paginated upstream fetch: drive the `items` endpoint page by page, merge,
//! deduplicate, and enrich.
//!
//! Pagination is strictly sequential. The next page request never starts
//! before the previous one finished, and successful pages are spaced by a
//! fixed delay to respect the upstream rate limit.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::ShopConfig;
use crate::error::FetchIssue;
use crate::extract::AttributeExtractor;
use crate::product::{Product, RawItem};

fn truncate_for_log(mut s: String, max_len: usize) -> String {
    if s.len() > max_len {
        let mut cut = max_len;
        while cut > 0 && !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push('…');
    }
    s
}

/// One page worth of upstream items. Implementations own the wire format;
/// the pipeline only sees decoded raw items.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn list_items(&self, offset: u32, limit: u32) -> Result<Vec<RawItem>, FetchIssue>;
}

/// Production [`ItemSource`] over the BASE shop API.
#[derive(Debug, Clone)]
pub struct BaseApiClient {
    base_url: String,
    http: Client,
    token: String,
}

impl BaseApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent("basefilter/0.2")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl ItemSource for BaseApiClient {
    async fn list_items(&self, offset: u32, limit: u32) -> Result<Vec<RawItem>, FetchIssue> {
        let url = format!("{}/items", self.base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .query(&[("limit", limit.to_string()), ("offset", offset.to_string())])
            .send()
            .await
            .map_err(|e| FetchIssue::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = truncate_for_log(resp.text().await.unwrap_or_default(), 2000);
            return Err(FetchIssue::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| FetchIssue::Transport(e.to_string()))?;

        let items = body
            .get("items")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().map(RawItem::from_value).collect())
            .unwrap_or_default();
        Ok(items)
    }
}

/// Result of a full fetch cycle: whatever was accumulated, plus at most one
/// recorded issue. Never a hard error.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub products: Vec<Product>,
    pub issue: Option<FetchIssue>,
}

/// Fetch every page of the shop's items, deduplicate by item id (first
/// occurrence wins), map to products and enrich them.
///
/// Stops on: empty page (end of data), short page (last page), non-success
/// status or transport failure (partial results kept, issue recorded). A
/// fully clean pagination that still yields nothing reports
/// [`FetchIssue::EmptyResult`].
pub async fn fetch_all(
    source: &dyn ItemSource,
    config: &ShopConfig,
    extractor: &AttributeExtractor,
) -> FetchOutcome {
    let limit = config.page_size.max(1);
    let mut raw_items: Vec<RawItem> = Vec::new();
    let mut issue: Option<FetchIssue> = None;
    let mut offset = 0u32;

    loop {
        match source.list_items(offset, limit).await {
            Ok(page) => {
                debug!(offset, page_len = page.len(), "fetched items page");
                if page.is_empty() {
                    break;
                }
                let short_page = (page.len() as u32) < limit;
                raw_items.extend(page);
                if short_page {
                    break;
                }
                offset += limit;
                sleep(config.page_delay).await;
            }
            Err(e) => {
                warn!(offset, accumulated = raw_items.len(), error = %e,
                    "pagination aborted; keeping partial results");
                issue = Some(e);
                break;
            }
        }
    }

    // Upstream occasionally repeats an item across pages under concurrent
    // writes on their side; keep the first-seen copy.
    let mut seen: HashSet<String> = HashSet::new();
    let mut products = Vec::with_capacity(raw_items.len());
    for raw in raw_items {
        if !seen.insert(raw.item_id.clone()) {
            continue;
        }
        let product = Product::from_raw(raw, config.shop_id());
        products.push(extractor.enrich(product));
    }

    if products.is_empty() && issue.is_none() {
        issue = Some(FetchIssue::EmptyResult);
    }

    FetchOutcome { products, issue }
}
