//! Formatting layer between ranked indices and the web view.
//!
//! The ranker returns every candidate, including zero-score documents; this
//! module applies the relevance filter (token intersection with the query),
//! highlights matched stems in the original text, and groups results by
//! province. The ranker itself knows nothing about display.

use crate::dataset::{Category, DocRecord};
use crate::normalize::Normalizer;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize)]
pub struct DisplayItem {
    #[serde(rename = "nama")]
    pub name: String,
    /// HTML fragment: the original description with matched words wrapped in
    /// `<mark>` tags.
    #[serde(rename = "konten")]
    pub content: String,
    #[serde(rename = "gambar")]
    pub image: String,
    #[serde(rename = "type")]
    pub category: Category,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvinceGroup {
    #[serde(rename = "nama")]
    pub province: String,
    #[serde(rename = "objek_pariwisata")]
    pub attractions: Vec<DisplayItem>,
    #[serde(rename = "makanan_khas")]
    pub dishes: Vec<DisplayItem>,
}

/// Wraps each whitespace word of `original` whose stem appears in
/// `query_stems` in a `<mark>` tag. The check runs on the cleaned, stemmed
/// word but the untouched original word is what gets wrapped.
pub fn highlight(original: &str, query_stems: &HashSet<String>, normalizer: &dyn Normalizer) -> String {
    if query_stems.is_empty() {
        return original.to_string();
    }
    original
        .split_whitespace()
        .map(|word| {
            let clean: String = word
                .chars()
                .filter(|c| c.is_alphabetic())
                .collect::<String>()
                .to_lowercase();
            if !clean.is_empty() && query_stems.contains(&normalizer.stem_word(&clean)) {
                format!("<mark>{word}</mark>")
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns ranked corpus indices into province groups for display.
///
/// Documents sharing no token with the query are dropped here (the ranker
/// deliberately keeps them). Provinces appear in the order their first
/// relevant document ranks; within a province's attraction/dish lists,
/// duplicate names are kept once.
pub fn group_results(
    records: &[DocRecord],
    ranked: &[usize],
    query_stems: &[String],
    normalizer: &dyn Normalizer,
) -> Vec<ProvinceGroup> {
    let query_set: HashSet<String> = query_stems.iter().cloned().collect();
    let mut groups: Vec<ProvinceGroup> = Vec::new();

    for &idx in ranked {
        let record = match records.get(idx) {
            Some(r) => r,
            None => continue,
        };
        if !record.tokens.iter().any(|t| query_set.contains(t)) {
            continue;
        }

        let item = DisplayItem {
            name: record.name.clone(),
            content: highlight(&record.content, &query_set, normalizer),
            image: record.image.clone(),
            category: record.category,
        };

        let pos = match groups.iter().position(|g| g.province == record.province) {
            Some(p) => p,
            None => {
                groups.push(ProvinceGroup {
                    province: record.province.clone(),
                    ..Default::default()
                });
                groups.len() - 1
            }
        };
        let list = match record.category {
            Category::Wisata => &mut groups[pos].attractions,
            Category::Kuliner => &mut groups[pos].dishes,
        };
        if !list.iter().any(|d| d.name == item.name) {
            list.push(item);
        }
    }

    groups
}
