//! TMDB multi-search client, the primary catalog.

use reqwest::Client;
use serde::Deserialize;
use shirabe_core::MediaKind;
use tracing::debug;

use crate::catalog::{MultiCandidate, PrimaryCatalog};
use crate::error::Result;
use crate::http::{check_response, parse_json, trim_base};

/// Genre id TMDB uses for animation.
pub const ANIMATION_GENRE_ID: u32 = 16;

/// Movie and TV genre ids with their display names.
pub const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
    (10759, "Action & Adv"),
    (10762, "Kids"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
];

#[must_use]
pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|(gid, _)| *gid == id).map(|(_, name)| *name)
}

// ── Response types ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MultiSearchResponse {
    #[serde(default)]
    results: Vec<MultiResult>,
}

#[derive(Debug, Deserialize)]
struct MultiResult {
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    #[serde(default)]
    genre_ids: Vec<u32>,
    #[serde(default)]
    origin_country: Vec<String>,
    original_language: Option<String>,
    vote_average: Option<f64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<MultiResult> for MultiCandidate {
    fn from(r: MultiResult) -> Self {
        let kind = match r.media_type.as_deref() {
            Some("tv") => MediaKind::Series,
            _ => MediaKind::Movie,
        };
        Self {
            title: non_empty(r.title).or_else(|| non_empty(r.name)),
            kind,
            date: non_empty(r.release_date).or_else(|| non_empty(r.first_air_date)),
            genres: r
                .genre_ids
                .iter()
                .filter_map(|id| genre_name(*id))
                .map(str::to_string)
                .collect(),
            animation: r.genre_ids.contains(&ANIMATION_GENRE_ID),
            origin_country: r.origin_country.into_iter().next(),
            original_language: non_empty(r.original_language),
            vote_average: r.vote_average,
        }
    }
}

// ── Client ─────────────────────────────────────────────────────

pub struct TmdbClient {
    http: Client,
    base_url: String,
}

impl TmdbClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: trim_base(base_url),
        }
    }
}

impl PrimaryCatalog for TmdbClient {
    async fn search_multi(&self, query: &str, api_key: &str) -> Result<Vec<MultiCandidate>> {
        debug!(query, "tmdb multi search");
        let resp = self
            .http
            .get(format!("{}/search/multi", self.base_url))
            .query(&[("api_key", api_key), ("query", query)])
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body: MultiSearchResponse = parse_json(resp).await?;
        Ok(body.results.into_iter().map(MultiCandidate::from).collect())
    }
}
