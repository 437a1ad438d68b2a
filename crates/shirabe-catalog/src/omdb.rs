//! OMDb title lookup client, the general catalog.

use reqwest::Client;
use serde::Deserialize;
use shirabe_core::MediaKind;
use tracing::debug;

use crate::catalog::{GeneralCatalog, GeneralHit};
use crate::error::Result;
use crate::http::{check_response, parse_json, trim_base};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TitleResponse {
    response: String,
    title: Option<String>,
    year: Option<String>,
    genre: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    country: Option<String>,
}

impl TitleResponse {
    /// `None` unless the body reports a successful lookup.
    fn into_hit(self) -> Option<GeneralHit> {
        if self.response != "True" {
            return None;
        }
        let kind = match self.kind.as_deref() {
            Some("series") => MediaKind::Series,
            _ => MediaKind::Movie,
        };
        Some(GeneralHit {
            title: self.title,
            rating: self.imdb_rating,
            genres: self.genre,
            year: self.year,
            kind,
            country: self.country.unwrap_or_default(),
        })
    }
}

pub struct OmdbClient {
    http: Client,
    base_url: String,
}

impl OmdbClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: trim_base(base_url),
        }
    }
}

impl GeneralCatalog for OmdbClient {
    async fn find_title(
        &self,
        title: &str,
        year: Option<u16>,
        api_key: &str,
    ) -> Result<Option<GeneralHit>> {
        debug!(title, ?year, "omdb title lookup");
        let mut params = vec![("apikey", api_key.to_string()), ("t", title.to_string())];
        if let Some(year) = year {
            params.push(("y", year.to_string()));
        }
        let resp = self
            .http
            .get(format!("{}/", self.base_url))
            .query(&params)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body: TitleResponse = parse_json(resp).await?;
        Ok(body.into_hit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{reply, serve_once};

    fn hit(json: &str) -> Option<GeneralHit> {
        serde_json::from_str::<TitleResponse>(json)
            .unwrap()
            .into_hit()
    }

    #[test]
    fn successful_series_lookup() {
        let h = hit(r#"{
            "Title": "Sacred Games",
            "Year": "2018–2019",
            "Genre": "Action, Crime, Drama",
            "Country": "India",
            "imdbRating": "8.5",
            "Type": "series",
            "Response": "True"
        }"#)
        .unwrap();
        assert_eq!(h.title.as_deref(), Some("Sacred Games"));
        assert_eq!(h.kind, MediaKind::Series);
        assert_eq!(h.rating.as_deref(), Some("8.5"));
        assert_eq!(h.genres.as_deref(), Some("Action, Crime, Drama"));
        assert_eq!(h.country, "India");
    }

    #[test]
    fn movie_type_and_missing_country() {
        let h = hit(r#"{"Title": "Jawan", "Type": "movie", "imdbRating": "N/A", "Response": "True"}"#)
            .unwrap();
        assert_eq!(h.kind, MediaKind::Movie);
        assert_eq!(h.country, "");
        assert_eq!(h.rating.as_deref(), Some("N/A"));
    }

    #[test]
    fn failed_lookup_is_no_match() {
        assert!(hit(r#"{"Response": "False", "Error": "Movie not found!"}"#).is_none());
    }

    #[tokio::test]
    async fn year_is_sent_only_when_known() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;

        let (base, server) = serve_once(reply("200 OK", body)).await;
        let client = OmdbClient::new(Client::new(), &base);
        assert!(client.find_title("Jawan", None, "k1").await.unwrap().is_none());
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /?apikey=k1&t=Jawan HTTP/1.1"), "{request}");

        let (base, server) = serve_once(reply("200 OK", body)).await;
        let client = OmdbClient::new(Client::new(), &base);
        assert!(client.find_title("Jawan", Some(2023), "k1").await.unwrap().is_none());
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /?apikey=k1&t=Jawan&y=2023 HTTP/1.1"), "{request}");
    }
}
