//! Pure filtering of enriched products against facet selections.

use indexmap::IndexSet;

use crate::product::Product;

/// Accepted values per facet plus an optional inclusive price range.
/// An empty set means "no constraint on that facet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub brand: IndexSet<String>,
    pub color: IndexSet<String>,
    pub size: IndexSet<String>,
    pub length: IndexSet<String>,
    /// `"min-max"` in minor currency units, or `"all"`/`None` for no bound.
    pub price_range: Option<String>,
}

fn csv_set(raw: Option<&str>) -> IndexSet<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl FilterSelection {
    /// Build a selection from comma-separated facet values, the shape query
    /// parameters arrive in.
    pub fn from_csv(
        brand: Option<&str>,
        color: Option<&str>,
        size: Option<&str>,
        length: Option<&str>,
        price_range: Option<&str>,
    ) -> FilterSelection {
        FilterSelection {
            brand: csv_set(brand),
            color: csv_set(color),
            size: csv_set(size),
            length: csv_set(length),
            price_range: price_range
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_empty()
            && self.color.is_empty()
            && self.size.is_empty()
            && self.length.is_empty()
            && self.effective_price_range().is_none()
    }

    /// Parsed inclusive bounds, `None` when absent, `"all"`, or not of the
    /// `min-max` shape. A non-numeric min falls back to 0, a non-numeric max
    /// to unbounded.
    fn effective_price_range(&self) -> Option<(u64, u64)> {
        let raw = self.price_range.as_deref()?.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return None;
        }
        let (min_s, max_s) = raw.split_once('-')?;
        let min = min_s.trim().parse::<u64>().unwrap_or(0);
        let max = max_s.trim().parse::<u64>().unwrap_or(u64::MAX);
        Some((min, max))
    }
}

fn matches(product: &Product, selection: &FilterSelection) -> bool {
    // Single-valued facets: the product's value must be in the accepted set.
    // An unresolved value never matches a named constraint.
    if !selection.brand.is_empty() {
        let ok = product
            .brand
            .as_deref()
            .is_some_and(|b| selection.brand.contains(b));
        if !ok {
            return false;
        }
    }
    if !selection.size.is_empty() {
        let ok = product
            .size
            .as_deref()
            .is_some_and(|s| selection.size.contains(s));
        if !ok {
            return false;
        }
    }
    // Set-valued facets: non-empty intersection with the accepted set.
    if !selection.color.is_empty()
        && !product.colors.iter().any(|c| selection.color.contains(c.as_str()))
    {
        return false;
    }
    if !selection.length.is_empty()
        && !product.length.iter().any(|l| selection.length.contains(l.as_str()))
    {
        return false;
    }
    if let Some((min, max)) = selection.effective_price_range() {
        if product.price < min || product.price > max {
            return false;
        }
    }
    true
}

/// Apply a selection to a product list. Pure; survivors keep their relative
/// order. Within a facet membership is OR, across facets constraints are AND.
pub fn apply(products: &[Product], selection: &FilterSelection) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches(p, selection))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::RawItem;

    fn product(id: &str, brand: &str, colors: &[&str], size: Option<&str>, price: u64) -> Product {
        let mut p = Product::from_raw(
            RawItem {
                item_id: id.to_string(),
                price,
                ..RawItem::default()
            },
            "testshop",
        );
        p.brand = Some(brand.to_string());
        p.colors = colors.iter().map(|c| c.to_string()).collect();
        p.size = size.map(str::to_string);
        p
    }

    fn fixture() -> Vec<Product> {
        vec![
            product("1", "Andy", &["ブラック"], Some("M"), 5000),
            product("2", "GRL", &["ホワイト", "ピンク"], Some("S"), 3000),
            product("3", "その他", &[], None, 12000),
        ]
    }

    #[test]
    fn empty_selection_keeps_everything_in_order() {
        let products = fixture();
        let out = apply(&products, &FilterSelection::default());
        assert_eq!(out, products);
    }

    #[test]
    fn brand_is_or_within_facet() {
        let products = fixture();
        let sel = FilterSelection::from_csv(Some("Andy,GRL"), None, None, None, None);
        let ids: Vec<_> = apply(&products, &sel).iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn facets_are_and_combined() {
        let products = fixture();
        let sel = FilterSelection::from_csv(Some("Andy,GRL"), Some("ピンク"), None, None, None);
        let ids: Vec<_> = apply(&products, &sel).iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn unresolved_facets_never_wildcard_match() {
        let products = fixture();
        let sel = FilterSelection::from_csv(None, None, Some("M"), None, None);
        let ids: Vec<_> = apply(&products, &sel).iter().map(|p| p.id.clone()).collect();
        // Product 3 has no size at all and must be excluded.
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn price_range_is_inclusive() {
        let products = fixture();
        let sel = FilterSelection::from_csv(None, None, None, None, Some("3000-5000"));
        let ids: Vec<_> = apply(&products, &sel).iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn price_range_all_is_no_constraint() {
        let products = fixture();
        let sel = FilterSelection::from_csv(None, None, None, None, Some("all"));
        assert_eq!(apply(&products, &sel).len(), 3);
    }

    #[test]
    fn apply_is_idempotent() {
        let products = fixture();
        let sel = FilterSelection::from_csv(Some("Andy,GRL"), Some("ブラック,ピンク"), None, None, Some("0-10000"));
        let once = apply(&products, &sel);
        let twice = apply(&once, &sel);
        assert_eq!(once, twice);
    }

    #[test]
    fn csv_parsing_trims_and_skips_empties() {
        let sel = FilterSelection::from_csv(Some(" Andy , ,GRL"), None, None, None, Some("  "));
        assert_eq!(sel.brand.len(), 2);
        assert!(sel.brand.contains("Andy"));
        assert!(sel.price_range.is_none());
    }
}
