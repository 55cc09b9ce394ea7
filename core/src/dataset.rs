use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Record category, matching the `type` field of the prepared dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Wisata,
    Kuliner,
}

/// One prepared document: display fields plus the normalized token stream
/// the ranker indexes. Field names on disk follow the original
/// `data_siap_pakai.json` format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRecord {
    #[serde(rename = "provinsi")]
    pub province: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(rename = "nama")]
    pub name: String,
    /// Original, non-tokenized description; this is what gets highlighted
    /// and shown in results.
    #[serde(rename = "original_konten")]
    pub content: String,
    pub tokens: Vec<String>,
    #[serde(rename = "gambar", default)]
    pub image: String,
}

/// Raw source item as found in `pariwisata.json`.
#[derive(Debug, Deserialize)]
pub struct RawItem {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "deskripsi", default)]
    pub description: String,
    #[serde(rename = "gambar", default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct RawProvince {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "objek_pariwisata", default)]
    pub attractions: Vec<RawItem>,
    #[serde(rename = "makanan_khas", default)]
    pub dishes: Vec<RawItem>,
}

/// Raw dataset root. Provinces are keyed by id; a BTreeMap keeps iteration
/// order deterministic so prepared document indices are reproducible.
#[derive(Debug, Deserialize)]
pub struct RawDataset {
    #[serde(rename = "provinsi")]
    pub provinces: BTreeMap<String, RawProvince>,
}

pub fn load_raw<P: AsRef<Path>>(path: P) -> Result<RawDataset> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open raw dataset {}", path.display()))?;
    let raw = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse raw dataset {}", path.display()))?;
    Ok(raw)
}

pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<DocRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open prepared dataset {}", path.display()))?;
    let records = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse prepared dataset {}", path.display()))?;
    Ok(records)
}

pub fn save_records<P: AsRef<Path>>(path: P, records: &[DocRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create prepared dataset {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    Ok(())
}
