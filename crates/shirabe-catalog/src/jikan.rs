//! Jikan (MyAnimeList) client, the anime catalog.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{AnimeCatalog, AnimeHit};
use crate::error::Result;
use crate::http::{check_response, parse_json, trim_base};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Anime>,
}

#[derive(Debug, Deserialize)]
struct Anime {
    title: Option<String>,
    title_english: Option<String>,
    score: Option<f64>,
    year: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    name: String,
}

impl From<Anime> for AnimeHit {
    fn from(a: Anime) -> Self {
        Self {
            title: a.title_english.filter(|t| !t.is_empty()).or(a.title),
            score: a.score,
            year: a.year,
            genres: a.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

pub struct JikanClient {
    http: Client,
    base_url: String,
}

impl JikanClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: trim_base(base_url),
        }
    }
}

impl AnimeCatalog for JikanClient {
    async fn find_anime(&self, query: &str) -> Result<Option<AnimeHit>> {
        debug!(query, "jikan anime search");
        let resp = self
            .http
            .get(format!("{}/anime", self.base_url))
            .query(&[("q", query), ("limit", "1")])
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body: SearchResponse = parse_json(resp).await?;
        Ok(body.data.into_iter().next().map(AnimeHit::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(json: &str) -> Option<AnimeHit> {
        let body: SearchResponse = serde_json::from_str(json).unwrap();
        body.data.into_iter().next().map(AnimeHit::from)
    }

    #[test]
    fn english_title_preferred() {
        let hit = first(r#"{"data": [{
            "title": "Shingeki no Kyojin",
            "title_english": "Attack on Titan",
            "score": 8.54,
            "year": 2013,
            "genres": [{"mal_id": 1, "name": "Action"}, {"mal_id": 8, "name": "Drama"}]
        }]}"#)
        .unwrap();
        assert_eq!(hit.title.as_deref(), Some("Attack on Titan"));
        assert_eq!(hit.score, Some(8.54));
        assert_eq!(hit.year, Some(2013));
        assert_eq!(hit.genres, vec!["Action", "Drama"]);
    }

    #[test]
    fn default_title_and_missing_fields() {
        let hit = first(r#"{"data": [{
            "title": "Judas",
            "title_english": null,
            "score": null,
            "year": null
        }]}"#)
        .unwrap();
        assert_eq!(hit.title.as_deref(), Some("Judas"));
        assert!(hit.score.is_none());
        assert!(hit.year.is_none());
        assert!(hit.genres.is_empty());
    }

    #[test]
    fn empty_data_is_no_match() {
        assert!(first(r#"{"data": []}"#).is_none());
        assert!(first(r#"{"pagination": {}}"#).is_none());
    }
}
