//! Product record and the raw upstream item it is built from.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One item as returned by the upstream `items` endpoint, before enrichment.
///
/// Every field is defaulted when absent so a sparse upstream payload still
/// maps to a usable record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawItem {
    pub item_id: String,
    pub title: String,
    pub detail: String,
    pub price: u64,
    pub stock: u32,
    pub visible: bool,
    pub img_origin: String,
    pub img_thumb: String,
}

fn value_as_string(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn value_as_u64(v: Option<&Value>) -> Option<u64> {
    match v {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_i64().map(|i| i.max(0) as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

impl RawItem {
    /// Build a raw item from one element of the upstream `items` array.
    /// Missing fields take documented defaults: price 0, stock 0, visible
    /// true, empty strings for text and URLs.
    pub fn from_value(item: &Value) -> RawItem {
        RawItem {
            item_id: value_as_string(item.get("item_id")),
            title: value_as_string(item.get("title")),
            detail: value_as_string(item.get("detail")),
            price: value_as_u64(item.get("price")).unwrap_or(0),
            stock: value_as_u64(item.get("stock")).unwrap_or(0).min(u32::MAX as u64) as u32,
            visible: value_as_u64(item.get("visible")).map(|v| v != 0).unwrap_or(true),
            img_origin: value_as_string(item.get("img1_origin")),
            img_thumb: value_as_string(item.get("img1_250")),
        }
    }
}

/// A fully mapped shop product. Constructed from one [`RawItem`], enriched
/// exactly once with the four facet fields, then held immutably in the cached
/// list until the next successful fetch replaces the list wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Price in the shop's minor currency unit.
    pub price: u64,
    pub image: String,
    pub thumbnail: String,
    pub url: String,
    pub stock: u32,
    pub visible: bool,
    /// Exactly one canonical brand after enrichment (fallback when unmatched).
    pub brand: Option<String>,
    /// Canonical colors, no duplicates.
    pub colors: IndexSet<String>,
    /// At most one canonical size.
    pub size: Option<String>,
    /// Canonical lengths, no duplicates.
    pub length: IndexSet<String>,
}

impl Product {
    /// Map a raw upstream item into an un-enriched product. The public URL is
    /// derived from the shop id the way the storefront does.
    pub fn from_raw(raw: RawItem, shop_id: &str) -> Product {
        let url = format!("https://{shop_id}.base.shop/items/{}", raw.item_id);
        Product {
            id: raw.item_id,
            title: raw.title,
            description: raw.detail,
            price: raw.price,
            image: raw.img_origin,
            thumbnail: raw.img_thumb,
            url,
            stock: raw.stock,
            visible: raw.visible,
            brand: None,
            colors: IndexSet::new(),
            size: None,
            length: IndexSet::new(),
        }
    }

    /// Title and description joined for keyword scans that look at both.
    pub fn combined_text(&self) -> String {
        format!("{}\n{}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_item_defaults_missing_fields() {
        let raw = RawItem::from_value(&json!({ "item_id": 4211 }));
        assert_eq!(raw.item_id, "4211");
        assert_eq!(raw.price, 0);
        assert_eq!(raw.stock, 0);
        assert!(raw.visible);
        assert!(raw.title.is_empty());
        assert!(raw.img_origin.is_empty());
    }

    #[test]
    fn raw_item_reads_populated_fields() {
        let raw = RawItem::from_value(&json!({
            "item_id": "A-100",
            "title": "ロングドレス",
            "detail": "説明",
            "price": "5400",
            "stock": 3,
            "visible": 0,
            "img1_origin": "https://img.example/o.jpg",
            "img1_250": "https://img.example/t.jpg",
        }));
        assert_eq!(raw.item_id, "A-100");
        assert_eq!(raw.price, 5400);
        assert_eq!(raw.stock, 3);
        assert!(!raw.visible);
        assert_eq!(raw.img_thumb, "https://img.example/t.jpg");
    }

    #[test]
    fn product_url_is_derived_from_shop_id() {
        let raw = RawItem {
            item_id: "77".into(),
            ..RawItem::default()
        };
        let p = Product::from_raw(raw, "myshop");
        assert_eq!(p.url, "https://myshop.base.shop/items/77");
    }
}
