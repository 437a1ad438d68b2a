//! Catalog seams. Each catalog the cascade consults is a trait so the
//! cascade can run against live HTTP clients or in-memory stubs.

use std::future::Future;

use serde::{Deserialize, Serialize};
use shirabe_core::MediaKind;

use crate::error::Result;

/// One candidate from the primary multi-type search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiCandidate {
    pub title: Option<String>,
    pub kind: MediaKind,
    /// Release or first-air date, `YYYY-MM-DD` or a prefix of it.
    pub date: Option<String>,
    /// Display names for the known genre ids, in catalog order.
    pub genres: Vec<String>,
    pub animation: bool,
    /// First ISO 3166-1 origin country.
    pub origin_country: Option<String>,
    pub original_language: Option<String>,
    pub vote_average: Option<f64>,
}

impl MultiCandidate {
    /// Minimal candidate of the given kind; mostly for building fixtures.
    #[must_use]
    pub fn new(kind: MediaKind) -> Self {
        Self {
            title: None,
            kind,
            date: None,
            genres: Vec::new(),
            animation: false,
            origin_country: None,
            original_language: None,
            vote_average: None,
        }
    }

    /// Four-digit year prefix of the date, if any.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        self.date
            .as_deref()
            .filter(|d| d.len() >= 4 && d.is_char_boundary(4))
            .map(|d| &d[..4])
    }
}

/// Best show match from the episodic catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowHit {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub premiered: Option<String>,
    pub genres: Vec<String>,
    /// Network country code, else web-channel country code.
    pub country_code: Option<String>,
}

/// Best match from the anime catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeHit {
    /// English title when the catalog has one, else the default title.
    pub title: Option<String>,
    pub score: Option<f64>,
    pub year: Option<u32>,
    pub genres: Vec<String>,
}

/// Title lookup result from the general catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralHit {
    pub title: Option<String>,
    /// Rating as the catalog prints it; may be the literal `"N/A"`.
    pub rating: Option<String>,
    /// Comma-separated genre list.
    pub genres: Option<String>,
    pub year: Option<String>,
    pub kind: MediaKind,
    /// Comma-separated country names.
    pub country: String,
}

/// Multi-type search (movies and series) carrying regional signals.
pub trait PrimaryCatalog: Send + Sync {
    fn search_multi(
        &self,
        query: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<Vec<MultiCandidate>>> + Send;
}

/// Series-only lookup returning the single best match.
pub trait EpisodicCatalog: Send + Sync {
    fn find_show(&self, query: &str) -> impl Future<Output = Result<Option<ShowHit>>> + Send;
}

/// Anime-only lookup returning the single best match.
pub trait AnimeCatalog: Send + Sync {
    fn find_anime(&self, query: &str) -> impl Future<Output = Result<Option<AnimeHit>>> + Send;
}

/// Title lookup with an optional year hint.
pub trait GeneralCatalog: Send + Sync {
    fn find_title(
        &self,
        title: &str,
        year: Option<u16>,
        api_key: &str,
    ) -> impl Future<Output = Result<Option<GeneralHit>>> + Send;
}
