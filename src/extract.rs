//! Attribute extraction: classify a product's text into the four facets.
//!
//! Two deliberately distinct matching strategies live here. Brand (and the
//! description fallback) scans every keyword and keeps the longest match;
//! size walks the dictionary in order and stops at the first hit. Do not
//! unify them, the precedence behavior differs on purpose.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dictionary::{Facet, FilterDictionary, FALLBACK_BRAND};
use crate::product::Product;

struct BrandPattern {
    canonical: &'static str,
    keyword: &'static str,
    /// Character count (not bytes) used for the longest-match rule.
    char_len: usize,
    /// Present for keywords with ASCII letters/digits: case-insensitive
    /// whole-word match. Absent for non-Latin keywords, which match as plain
    /// substrings.
    word_re: Option<Regex>,
}

struct SizePattern {
    canonical: &'static str,
    /// Keyword bounded by whitespace or brackets, tested on padded text.
    bounded: Regex,
    /// `サイズ`/`size` label followed by the keyword.
    labeled: Regex,
}

/// Compiled facet matchers for one dictionary. Construction compiles every
/// keyword pattern once; enrichment itself allocates nothing but the result.
pub struct AttributeExtractor {
    brand_patterns: Vec<BrandPattern>,
    size_patterns: Vec<SizePattern>,
    colors: Vec<(&'static str, Vec<&'static str>)>,
    lengths: Vec<(&'static str, Vec<&'static str>)>,
    model_prefix: Regex,
    capitalized_word: Regex,
}

fn has_ascii_alnum(keyword: &str) -> bool {
    keyword.chars().any(|c| c.is_ascii_alphanumeric())
}

impl AttributeExtractor {
    /// Extractor over the curated dictionary, compiled once per process.
    pub fn curated() -> &'static AttributeExtractor {
        static EXTRACTOR: Lazy<AttributeExtractor> = Lazy::new(|| {
            AttributeExtractor::new(FilterDictionary::curated())
                .expect("curated dictionary patterns compile")
        });
        &EXTRACTOR
    }

    pub fn new(dict: &FilterDictionary) -> Result<AttributeExtractor> {
        let mut brand_patterns = Vec::new();
        for (canonical, keywords) in dict.entries(Facet::Brand) {
            // The fallback canonical never matches by keyword; it is assigned
            // by the heuristics below.
            if canonical == FALLBACK_BRAND || keywords.is_empty() {
                continue;
            }
            for &keyword in keywords {
                // ASCII word boundaries: katakana next to a Latin keyword must
                // still count as an edge, same as the storefront's matching.
                let word_re = if has_ascii_alnum(keyword) {
                    Some(Regex::new(&format!(
                        r"(?i)(?-u:\b){}(?-u:\b)",
                        regex::escape(keyword)
                    ))?)
                } else {
                    None
                };
                brand_patterns.push(BrandPattern {
                    canonical,
                    keyword,
                    char_len: keyword.chars().count(),
                    word_re,
                });
            }
        }

        let mut size_patterns = Vec::new();
        for (canonical, keywords) in dict.entries(Facet::Size) {
            for &keyword in keywords {
                let escaped = regex::escape(keyword);
                size_patterns.push(SizePattern {
                    canonical,
                    bounded: Regex::new(&format!(r"(?i)[\s(\[{{]{escaped}[\s)\]}}]"))?,
                    labeled: Regex::new(&format!(r"(?i)(?:サイズ|size)[:：\s]*{escaped}"))?,
                });
            }
        }

        let collect = |facet| {
            dict.entries(facet)
                .map(|(c, ks)| (c, ks.to_vec()))
                .collect::<Vec<_>>()
        };

        Ok(AttributeExtractor {
            brand_patterns,
            size_patterns,
            colors: collect(Facet::Color),
            lengths: collect(Facet::Length),
            model_prefix: Regex::new(r"^\s*[0-9]+\s")?,
            capitalized_word: Regex::new(r"(?-u:\b)[A-Z][a-zA-Z]{2,}(?-u:\b)")?,
        })
    }

    /// Longest-match brand scan over one text. Strictly longer keywords
    /// overwrite earlier wins; equal-length matches keep the earlier entry.
    fn scan_brand(&self, text: &str) -> Option<&'static str> {
        let mut best = None;
        let mut best_len = 0usize;
        for pat in &self.brand_patterns {
            let matched = match &pat.word_re {
                Some(re) => re.is_match(text),
                None => text.contains(pat.keyword),
            };
            if matched && pat.char_len > best_len {
                best = Some(pat.canonical);
                best_len = pat.char_len;
            }
        }
        best
    }

    fn resolve_brand(&self, title: &str, description: &str) -> &'static str {
        if let Some(brand) = self.scan_brand(title) {
            return brand;
        }
        // Model-number-prefixed title: the brand, if any, would follow the
        // code in the title itself, so the description is never consulted.
        if self.model_prefix.is_match(title) {
            return FALLBACK_BRAND;
        }
        // A capitalized Latin word in the title is treated as an unregistered
        // brand. This intentionally also fires on unrelated English words
        // ("Stylish", ...) and skips description matching in that case;
        // documented storefront behavior, kept as-is.
        if self.capitalized_word.is_match(title) {
            return FALLBACK_BRAND;
        }
        self.scan_brand(description).unwrap_or(FALLBACK_BRAND)
    }

    fn resolve_size(&self, combined: &str) -> Option<&'static str> {
        let padded = format!(" {combined} ");
        self.size_patterns
            .iter()
            .find(|p| p.bounded.is_match(&padded) || p.labeled.is_match(combined))
            .map(|p| p.canonical)
    }

    /// Enrich a product with all four facets. Total: always returns a record
    /// with exactly one brand (possibly fallback) and deduplicated sets.
    pub fn enrich(&self, mut product: Product) -> Product {
        let combined = product.combined_text();

        product.brand = Some(
            self.resolve_brand(&product.title, &product.description)
                .to_string(),
        );

        product.colors = self
            .colors
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| combined.contains(k)))
            .map(|(canonical, _)| canonical.to_string())
            .collect();

        product.size = self.resolve_size(&combined).map(str::to_string);

        product.length = self
            .lengths
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| combined.contains(k)))
            .map(|(canonical, _)| canonical.to_string())
            .collect();

        product
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::RawItem;

    fn enrich(title: &str, description: &str) -> Product {
        let raw = RawItem {
            item_id: "1".into(),
            title: title.into(),
            detail: description.into(),
            ..RawItem::default()
        };
        AttributeExtractor::curated().enrich(Product::from_raw(raw, "testshop"))
    }

    #[test]
    fn brand_is_always_resolved() {
        for (title, desc) in [("", ""), ("ドレス", ""), ("123 Cute Dress", "Andy")] {
            let p = enrich(title, desc);
            assert!(p.brand.is_some(), "brand unresolved for {title:?}");
        }
    }

    #[test]
    fn brand_longest_keyword_wins() {
        // Both "an" (2 chars, canonical "an Andy") and "Andy" (4 chars) match;
        // the longer keyword decides.
        let p = enrich("an Andy original", "");
        assert_eq!(p.brand.as_deref(), Some("Andy"));
    }

    #[test]
    fn brand_equal_length_keeps_earlier_entry() {
        // "an" (an Andy) and "AR" (AR Angel R) both match as 2-char whole
        // words; equal length does not overwrite, the earlier entry stays.
        let p = enrich("an AR dress", "");
        assert_eq!(p.brand.as_deref(), Some("an Andy"));
    }

    #[test]
    fn brand_katakana_matches_as_substring() {
        let p = enrich("アンディのキャバドレス", "");
        assert_eq!(p.brand.as_deref(), Some("Andy"));
    }

    #[test]
    fn brand_word_boundary_blocks_partial_latin_match() {
        // "Randy" contains "an" but not as a whole word, and "Randy" itself
        // is registered; the whole-word scan must pick Randy, not "an Andy".
        let p = enrich("Randy dress", "");
        assert_eq!(p.brand.as_deref(), Some("Randy"));
    }

    #[test]
    fn model_number_title_skips_description() {
        // Title leads with a product code: fallback, even though the
        // description names a registered brand.
        let p = enrich("123 Cute Dress", "Andy のワンピースです");
        assert_eq!(p.brand.as_deref(), Some(FALLBACK_BRAND));
    }

    #[test]
    fn capitalized_word_blocks_description_fallback() {
        // Known quirk kept from the storefront: an unrelated capitalized
        // English word in the title prevents the description scan entirely,
        // even when the description holds the real brand.
        let p = enrich("Stylish One-Piece Dress", "ブランド: アンディ");
        assert_eq!(p.brand.as_deref(), Some(FALLBACK_BRAND));
    }

    #[test]
    fn plain_title_falls_through_to_description() {
        let p = enrich("かわいいドレスです", "アンディ製のドレス");
        assert_eq!(p.brand.as_deref(), Some("Andy"));
    }

    #[test]
    fn unmatched_everywhere_resolves_to_fallback() {
        let p = enrich("かわいいドレス", "とても素敵です");
        assert_eq!(p.brand.as_deref(), Some(FALLBACK_BRAND));
    }

    #[test]
    fn colors_collect_all_matches_without_duplicates() {
        let p = enrich("黒と白のドレス", "ブラックを基調に白をあしらいました");
        let colors: Vec<_> = p.colors.iter().map(String::as_str).collect();
        assert_eq!(colors, vec!["ブラック", "ホワイト"]);
    }

    #[test]
    fn size_label_match() {
        let p = enrich("Size: M sweater", "");
        assert_eq!(p.size.as_deref(), Some("M"));
    }

    #[test]
    fn size_label_japanese() {
        let p = enrich("ドレス", "サイズ：L 着丈90cm");
        assert_eq!(p.size.as_deref(), Some("L"));
    }

    #[test]
    fn size_does_not_match_inside_words() {
        // "M" inside "Mandarin" and "L" inside "XXL" are not bounded tokens.
        let p = enrich("XXL Mandarin", "");
        assert_eq!(p.size, None);
    }

    #[test]
    fn size_first_dictionary_hit_wins() {
        // Both S and M are present as bounded tokens; S is declared first and
        // the scan stops at the first hit, no longest-match rule here.
        let p = enrich("ドレス (S) (M)", "");
        assert_eq!(p.size.as_deref(), Some("S"));
    }

    #[test]
    fn size_bracket_boundaries_count() {
        let p = enrich("ワンピース [L] 美品", "");
        assert_eq!(p.size.as_deref(), Some("L"));
    }

    #[test]
    fn length_matches_combined_text() {
        let p = enrich("ロングドレス", "ミニ丈にも見える2way");
        let lengths: Vec<_> = p.length.iter().map(String::as_str).collect();
        assert_eq!(lengths, vec!["ロング", "ミニ"]);
    }

    #[test]
    fn enrich_is_total_on_empty_text() {
        let p = enrich("", "");
        assert_eq!(p.brand.as_deref(), Some(FALLBACK_BRAND));
        assert!(p.colors.is_empty());
        assert_eq!(p.size, None);
        assert!(p.length.is_empty());
    }
}
