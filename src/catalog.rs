use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// A single show in the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Podcast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub genres: Vec<u64>,
    pub seasons: u32,
    pub updated: String,
}

/// A genre record as it appears in the catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub title: String,
}

/// One season of one show.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonEntry {
    #[serde(rename = "podcast")]
    pub podcast_id: u64,
    pub title: String,
    pub episodes: u32,
}

/// The three collections the UI renders from. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub podcasts: Vec<Podcast>,
    pub genres: Vec<Genre>,
    pub seasons: Vec<SeasonEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

const BUILTIN: &str = include_str!("../data/catalog.json");

impl Catalog {
    /// Parse the catalog shipped inside the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(BUILTIN)?)
    }

    /// Load a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Fallback labels for genre ids the index does not know. The grid and the
/// details overlay use different wording.
pub const UNKNOWN_GENRE: &str = "Unknown Genre";
pub const UNKNOWN: &str = "Unknown";

/// Genre id → title lookup, built once from the genre records.
/// Duplicate ids overwrite (last wins).
#[derive(Debug, Clone, Default)]
pub struct GenreIndex {
    titles: HashMap<u64, String>,
}

impl GenreIndex {
    pub fn build(genres: &[Genre]) -> Self {
        let mut titles = HashMap::new();
        for genre in genres {
            titles.insert(genre.id, genre.title.clone());
        }
        GenreIndex { titles }
    }

    /// Resolve a genre id, substituting `fallback` for unknown ids.
    pub fn resolve<'a>(&'a self, id: u64, fallback: &'a str) -> &'a str {
        self.titles.get(&id).map(String::as_str).unwrap_or(fallback)
    }
}

/// Podcast id → ordered season list. Lookup is total: a podcast with no
/// entries yields an empty slice, never an error.
#[derive(Debug, Clone, Default)]
pub struct SeasonsMap {
    by_podcast: HashMap<u64, Vec<SeasonEntry>>,
}

impl SeasonsMap {
    /// Group the flat entry list by podcast, preserving input order.
    pub fn build(entries: &[SeasonEntry]) -> Self {
        let mut by_podcast: HashMap<u64, Vec<SeasonEntry>> = HashMap::new();
        for entry in entries {
            by_podcast
                .entry(entry.podcast_id)
                .or_default()
                .push(entry.clone());
        }
        SeasonsMap { by_podcast }
    }

    pub fn for_podcast(&self, id: u64) -> &[SeasonEntry] {
        self.by_podcast.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ── Date formatting ──

pub const INVALID_DATE: &str = "Invalid Date";

fn parse_updated(raw: &str) -> Option<NaiveDate> {
    // Catalog documents carry either a full timestamp or a plain date.
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Short card-style date, e.g. "May 1, 2023". A string that does not parse
/// renders as "Invalid Date" instead of failing; catalog data is trusted.
pub fn short_date(raw: &str) -> String {
    match parse_updated(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Long detail-style date, e.g. "January 5, 2025".
pub fn long_date(raw: &str) -> String {
    match parse_updated(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}
