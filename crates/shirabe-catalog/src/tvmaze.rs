//! TVmaze single-search client, the episodic catalog.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{EpisodicCatalog, ShowHit};
use crate::error::Result;
use crate::http::{check_response, parse_json, trim_base};

#[derive(Debug, Deserialize)]
struct Show {
    name: Option<String>,
    rating: Option<Rating>,
    premiered: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    network: Option<Channel>,
    #[serde(rename = "webChannel")]
    web_channel: Option<Channel>,
}

#[derive(Debug, Deserialize)]
struct Rating {
    average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    country: Option<Country>,
}

#[derive(Debug, Deserialize)]
struct Country {
    code: Option<String>,
}

impl Channel {
    fn country_code(&self) -> Option<String> {
        self.country.as_ref().and_then(|c| c.code.clone())
    }
}

impl From<Show> for ShowHit {
    fn from(show: Show) -> Self {
        let country_code = show
            .network
            .as_ref()
            .and_then(Channel::country_code)
            .or_else(|| show.web_channel.as_ref().and_then(Channel::country_code));
        Self {
            name: show.name,
            rating: show.rating.and_then(|r| r.average),
            premiered: show.premiered.filter(|p| !p.is_empty()),
            genres: show.genres,
            country_code,
        }
    }
}

pub struct TvMazeClient {
    http: Client,
    base_url: String,
}

impl TvMazeClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: trim_base(base_url),
        }
    }
}

impl EpisodicCatalog for TvMazeClient {
    async fn find_show(&self, query: &str) -> Result<Option<ShowHit>> {
        debug!(query, "tvmaze single search");
        let resp = self
            .http
            .get(format!("{}/singlesearch/shows", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        // No match is reported as 404.
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check_response(resp).await?;
        let show: Show = parse_json(resp).await?;
        Ok(Some(show.into()))
    }
}
