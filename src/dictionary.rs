//! Curated facet dictionary: canonical value -> synonym keywords.
//!
//! The table is declaration-ordered on purpose. Brand tie-breaking and size
//! early-exit both depend on iteration order, so every facet is stored in an
//! `IndexMap` and the entries below must not be reordered casually.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// The four classification dimensions a product is enriched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Brand,
    Color,
    Size,
    Length,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::Brand, Facet::Color, Facet::Size, Facet::Length];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Brand => "brand",
            Facet::Color => "color",
            Facet::Size => "size",
            Facet::Length => "length",
        }
    }
}

/// Canonical brand assigned when no dictionary entry matches or an
/// exclusionary heuristic fires ("other" in the shop's locale).
pub const FALLBACK_BRAND: &str = "その他";

type FacetTable = IndexMap<&'static str, Vec<&'static str>>;

/// Immutable synonym dictionary for all four facets, built once per process.
#[derive(Debug)]
pub struct FilterDictionary {
    brand: FacetTable,
    color: FacetTable,
    size: FacetTable,
    length: FacetTable,
}

impl FilterDictionary {
    /// The curated shop dictionary. Loaded lazily, never mutated.
    pub fn curated() -> &'static FilterDictionary {
        static DICT: Lazy<FilterDictionary> = Lazy::new(FilterDictionary::build_curated);
        &DICT
    }

    pub fn facet(&self, facet: Facet) -> &FacetTable {
        match facet {
            Facet::Brand => &self.brand,
            Facet::Color => &self.color,
            Facet::Size => &self.size,
            Facet::Length => &self.length,
        }
    }

    /// Canonical values of a facet in declaration order.
    pub fn canonicals(&self, facet: Facet) -> impl Iterator<Item = &'static str> + '_ {
        self.facet(facet).keys().copied()
    }

    /// `(canonical, keywords)` pairs of a facet in declaration order.
    pub fn entries(
        &self,
        facet: Facet,
    ) -> impl Iterator<Item = (&'static str, &[&'static str])> + '_ {
        self.facet(facet).iter().map(|(c, ks)| (*c, ks.as_slice()))
    }

    fn build_curated() -> FilterDictionary {
        let brand: FacetTable = [
            ("Ambient", vec!["Ambient", "アンビエント"]),
            ("an Andy", vec!["an", "アン"]),
            ("Andy", vec!["Andy", "アンディ"]),
            ("AR Angel R", vec!["AR Angel R", "Angel R", "AR", "エンジェルアール"]),
            ("BayBClub", vec!["BayBClub", "ベイビークラブ"]),
            ("cherrykeke", vec!["cherrykeke", "チェリーケケ"]),
            ("Ck Calvinklein", vec!["Ck Calvinklein", "Calvin Klein", "カルバンクライン"]),
            ("COCO&YUKA", vec!["COCO&YUKA"]),
            ("dazzy lounge", vec!["dazzy lounge", "デイジーラウンジ"]),
            ("dazzy queen", vec!["dazzy queen", "デイジークイーン"]),
            ("dazzy store", vec!["dazzy store", "デイジーストア"]),
            ("DAZZY", vec!["DAZZY", "デイジー"]),
            ("DEA by ROBE de FLEURS", vec!["DEA by ROBE de FLEURS", "ディアバイローブドフルール"]),
            ("EmiriaWiz", vec!["EmiriaWiz", "エミリアウィズ"]),
            ("ERUKEI", vec!["ERUKEI", "エルケイ"]),
            ("EauSouage", vec!["EauSouage"]),
            ("FEIMAN", vec!["FEIMAN", "フェイマン"]),
            ("GINZA COUTURE ERUKEI", vec!["GINZA COUTURE ERUKEI", "GINZA COUTURE", "エルケイ"]),
            ("GLAMOROUS by Andy", vec!["GLAMOROUS by Andy", "グラマラスバイアンディ"]),
            ("GRACE", vec!["GRACE", "グレース", "グレイス"]),
            ("GRAXIA", vec!["GRAXIA"]),
            ("GRL", vec!["GRL", "グレイル"]),
            ("H&M", vec!["H&M", "エイチアンドエム"]),
            ("han queen", vec!["han queen"]),
            ("IRMA", vec!["IRMA", "イルマ"]),
            ("JEAN MACLEAN", vec!["JEAN MACLEAN", "ジャンマクレーン"]),
            ("JEWELS", vec!["JEWELS", "ジュエルズ"]),
            ("LIPSY LONDON", vec!["LIPSY LONDON", "リプシーロンドン"]),
            ("Love Rich", vec!["Love Rich", "ラブリッチ"]),
            ("PEARL", vec!["PEARL", "パール"]),
            ("Randy", vec!["Randy", "ランディ"]),
            ("RESEXXY", vec!["RESEXXY", "リゼクシー"]),
            ("Rinfarre", vec!["Rinfarre", "リンファーレ"]),
            ("RINASCIMENTO", vec!["RINASCIMENTO", "リナシメント"]),
            ("ROBE de FLEURS", vec!["ROBE de FLEURS", "ローブドフルール"]),
            ("ROBE de FLEURS Glossy", vec!["ROBE de FLEURS Glossy", "ローブドフルールグロッシー"]),
            ("Ryuyu", vec!["Ryuyu", "リューユ"]),
            ("Ryuyu Chick", vec!["Ryuyu Chick", "リューユチック"]),
            ("SATURDAY CLUB", vec!["SATURDAY CLUB", "サタデークラブ"]),
            ("Settan ERUKEI", vec!["Settan ERUKEI", "Settan", "セッタン"]),
            ("Tiara", vec!["Tiara", "ティアラ"]),
            ("Tika", vec!["Tika", "ティカ"]),
            ("Tika holic", vec!["Tika holic", "ティカホリック"]),
            ("Trinity", vec!["Trinity", "トリニティ"]),
            ("Vanessa Heart", vec!["Vanessa Heart", "ヴァネッサハート"]),
            ("Veautt", vec!["Veautt", "ヴュート"]),
            ("ZARA", vec!["ZARA", "ザラ"]),
            (FALLBACK_BRAND, vec![FALLBACK_BRAND]),
        ]
        .into_iter()
        .collect();

        let color: FacetTable = [
            ("ブラック", vec!["ブラック", "黒"]),
            ("ホワイト", vec!["ホワイト", "白"]),
            ("グレー", vec!["グレー", "灰色", "グレイ"]),
            ("ベージュ", vec!["ベージュ"]),
            ("ブラウン", vec!["ブラウン", "茶色"]),
            ("レッド", vec!["レッド", "赤"]),
            ("ピンク", vec!["ピンク", "桃色"]),
            ("パープル", vec!["パープル", "紫"]),
            ("ネイビー", vec!["ネイビー", "紺"]),
            ("ブルー", vec!["ブルー", "青"]),
            ("グリーン", vec!["グリーン", "緑"]),
            ("カーキ", vec!["カーキ"]),
            ("イエロー", vec!["イエロー", "黄色"]),
            ("オレンジ", vec!["オレンジ", "橙色"]),
            ("ゴールド", vec!["ゴールド", "金色"]),
            ("シルバー", vec!["シルバー", "銀色"]),
        ]
        .into_iter()
        .collect();

        let size: FacetTable = [
            ("XS", vec!["XS"]),
            ("S", vec!["S"]),
            ("M", vec!["M"]),
            ("L", vec!["L"]),
            ("XL", vec!["XL"]),
            ("FREE", vec!["FREE", "フリー", "F"]),
        ]
        .into_iter()
        .collect();

        let length: FacetTable = [
            ("ロング", vec!["ロング"]),
            ("ミディ", vec!["ミディ"]),
            ("ミニ", vec!["ミニ"]),
        ]
        .into_iter()
        .collect();

        FilterDictionary {
            brand,
            color,
            size,
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facets_are_declaration_ordered() {
        let dict = FilterDictionary::curated();
        let colors: Vec<_> = dict.canonicals(Facet::Color).collect();
        assert_eq!(colors.first(), Some(&"ブラック"));
        assert_eq!(colors.last(), Some(&"シルバー"));

        let sizes: Vec<_> = dict.canonicals(Facet::Size).collect();
        assert_eq!(sizes, vec!["XS", "S", "M", "L", "XL", "FREE"]);
    }

    #[test]
    fn canonicals_are_unique_within_each_facet() {
        let dict = FilterDictionary::curated();
        for facet in Facet::ALL {
            let table = dict.facet(facet);
            // IndexMap already rejects duplicates silently; assert none collapsed.
            let mut seen = std::collections::HashSet::new();
            for canonical in table.keys() {
                assert!(seen.insert(*canonical), "duplicate canonical {canonical}");
            }
        }
    }

    #[test]
    fn fallback_brand_is_declared_last() {
        let dict = FilterDictionary::curated();
        assert_eq!(dict.canonicals(Facet::Brand).last(), Some(FALLBACK_BRAND));
    }

    #[test]
    fn keywords_map_many_to_one() {
        let dict = FilterDictionary::curated();
        let grace = dict.facet(Facet::Brand).get("GRACE").unwrap();
        assert!(grace.len() > 1, "latin and katakana spellings expected");
    }
}
