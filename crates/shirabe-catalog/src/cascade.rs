//! # Provider Cascade
//!
//! Fixed-order enrichment across four catalogs. Each step sees the record the
//! previous one produced, decides from it whether to run, and returns an
//! updated copy. A failing step is logged and skipped; the cascade itself
//! never fails.
//!
//! 1. **Primary**: multi-type search. Picks the candidate whose year matches
//!    the hint (else the first) and classifies it.
//! 2. **Episodic**: only for series-like records still missing a rating.
//! 3. **Anime**: only for anime records or filenames with an anime hint. A hit
//!    here is authoritative and ends the cascade.
//! 4. **General**: only while genres are still unknown.

use std::fmt;

use serde::Serialize;
use shirabe_core::{
    ContentType, MetadataRecord, NOT_AVAILABLE, MISC_GENRES, Signals, classify,
    classify_by_country_name, drama_for_country_code,
};
use tracing::{debug, info, warn};

use crate::catalog::{
    AnimeCatalog, AnimeHit, EpisodicCatalog, GeneralCatalog, GeneralHit, MultiCandidate,
    PrimaryCatalog, ShowHit,
};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::http::build_client;
use crate::jikan::JikanClient;
use crate::keys::{KeyPool, request_rng};
use crate::omdb::OmdbClient;
use crate::tmdb::TmdbClient;
use crate::tvmaze::TvMazeClient;

/// Filename fragments that route a record to the anime catalog.
const ANIME_HINTS: &[&str] = &["anime", "judas"];

/// Genres kept from a catalog's list.
const MAX_GENRES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Primary,
    Episodic,
    Anime,
    General,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Primary => "primary",
            Self::Episodic => "episodic",
            Self::Anime => "anime",
            Self::General => "general",
        })
    }
}

/// What happened at one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The catalog matched and the record was updated.
    Applied,
    /// The catalog answered without a usable match.
    Empty,
    /// Preconditions not met; the catalog was not called.
    Skipped(&'static str),
    /// The call failed (transport, timeout, bad status or body).
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Final record plus a per-step trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub record: MetadataRecord,
    pub steps: Vec<StepReport>,
}

impl CascadeReport {
    #[must_use]
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.step == step).map(|s| &s.outcome)
    }
}

/// Inputs of one cascade run.
#[derive(Debug, Clone, Copy)]
pub struct CascadeQuery<'a> {
    /// Guessed title; becomes the record title when nothing matches.
    pub title: &'a str,
    pub year: Option<u16>,
    /// Raw filename, scanned for anime hints.
    pub filename: &'a str,
    /// Search with the first title word only.
    pub deep_match: bool,
}

impl<'a> CascadeQuery<'a> {
    pub fn new(title: &'a str, filename: &'a str) -> Self {
        Self {
            title,
            year: None,
            filename,
            deep_match: false,
        }
    }

    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.year = year;
        self
    }

    pub fn with_deep_match(mut self, deep_match: bool) -> Self {
        self.deep_match = deep_match;
        self
    }

    /// The string actually sent to the catalogs.
    #[must_use]
    pub fn search_term(&self) -> &'a str {
        if self.deep_match {
            self.title.split_whitespace().next().unwrap_or(self.title)
        } else {
            self.title
        }
    }
}

/// The four-step cascade over concrete catalogs.
pub struct Cascade<P, E, A, G> {
    primary: P,
    episodic: E,
    anime: A,
    general: G,
    primary_keys: KeyPool,
    general_keys: KeyPool,
    key_seed: Option<u64>,
}

/// Cascade over the live HTTP clients.
pub type HttpCascade = Cascade<TmdbClient, TvMazeClient, JikanClient, OmdbClient>;

impl HttpCascade {
    /// Builds the live clients around one shared HTTP client.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let http = build_client(config)?;
        Ok(Cascade::new(
            TmdbClient::new(http.clone(), &config.tmdb_url),
            TvMazeClient::new(http.clone(), &config.tvmaze_url),
            JikanClient::new(http.clone(), &config.jikan_url),
            OmdbClient::new(http, &config.omdb_url),
        )
        .with_keys(config.tmdb_keys.clone(), config.omdb_keys.clone())
        .with_key_seed(config.key_seed))
    }
}

impl<P, E, A, G> Cascade<P, E, A, G>
where
    P: PrimaryCatalog,
    E: EpisodicCatalog,
    A: AnimeCatalog,
    G: GeneralCatalog,
{
    pub fn new(primary: P, episodic: E, anime: A, general: G) -> Self {
        Self {
            primary,
            episodic,
            anime,
            general,
            primary_keys: KeyPool::default(),
            general_keys: KeyPool::default(),
            key_seed: None,
        }
    }

    pub fn with_keys(mut self, primary: KeyPool, general: KeyPool) -> Self {
        self.primary_keys = primary;
        self.general_keys = general;
        self
    }

    pub fn with_key_seed(mut self, seed: Option<u64>) -> Self {
        self.key_seed = seed;
        self
    }

    /// Runs all steps for one request. Never fails: with every catalog down
    /// the record is the query title with default sentinels.
    pub async fn run(&self, query: &CascadeQuery<'_>) -> CascadeReport {
        let term = query.search_term();
        let mut rng = request_rng(self.key_seed);
        let primary_key = self.primary_keys.pick(&mut rng).map(str::to_owned);
        let general_key = self.general_keys.pick(&mut rng).map(str::to_owned);

        let mut record = MetadataRecord::new(query.title);
        let mut steps = Vec::with_capacity(4);

        // 1. primary
        let outcome = match primary_key.as_deref() {
            None => StepOutcome::Skipped("no API key"),
            Some(key) => match self.primary.search_multi(term, key).await {
                Ok(candidates) => match select_candidate(&candidates, query.year) {
                    Some(candidate) => {
                        record = apply_primary(record, candidate);
                        StepOutcome::Applied
                    }
                    None => StepOutcome::Empty,
                },
                Err(e) => failed(Step::Primary, &e),
            },
        };
        push(&mut steps, Step::Primary, outcome);

        // 2. episodic
        let outcome = if record.has_rating() {
            StepOutcome::Skipped("rating already known")
        } else if !record.content_type.is_series_like() {
            StepOutcome::Skipped("not a series")
        } else {
            match self.episodic.find_show(term).await {
                Ok(Some(hit)) => {
                    record = apply_episodic(record, &hit);
                    StepOutcome::Applied
                }
                Ok(None) => StepOutcome::Empty,
                Err(e) => failed(Step::Episodic, &e),
            }
        };
        push(&mut steps, Step::Episodic, outcome);

        // 3. anime
        let outcome = if record.content_type != ContentType::Anime && !anime_hint(query.filename) {
            StepOutcome::Skipped("no anime signal")
        } else {
            match self.anime.find_anime(term).await {
                Ok(Some(hit)) => {
                    record = apply_anime(record, &hit);
                    push(&mut steps, Step::Anime, StepOutcome::Applied);
                    push(
                        &mut steps,
                        Step::General,
                        StepOutcome::Skipped("resolved by anime catalog"),
                    );
                    return finish(record, steps);
                }
                Ok(None) => StepOutcome::Empty,
                Err(e) => failed(Step::Anime, &e),
            }
        };
        push(&mut steps, Step::Anime, outcome);

        // 4. general
        let outcome = if record.has_genres() {
            StepOutcome::Skipped("genres already known")
        } else {
            match general_key.as_deref() {
                None => StepOutcome::Skipped("no API key"),
                Some(key) => match self.general.find_title(term, query.year, key).await {
                    Ok(Some(hit)) => {
                        record = apply_general(record, &hit);
                        StepOutcome::Applied
                    }
                    Ok(None) => StepOutcome::Empty,
                    Err(e) => failed(Step::General, &e),
                },
            }
        };
        push(&mut steps, Step::General, outcome);

        finish(record, steps)
    }
}

fn push(steps: &mut Vec<StepReport>, step: Step, outcome: StepOutcome) {
    debug!(%step, ?outcome, "cascade step");
    steps.push(StepReport { step, outcome });
}

fn failed(step: Step, err: &crate::CatalogError) -> StepOutcome {
    warn!(%step, error = %err, timeout = err.is_timeout(), "catalog lookup failed");
    StepOutcome::Failed(err.to_string())
}

fn finish(record: MetadataRecord, steps: Vec<StepReport>) -> CascadeReport {
    info!(
        title = %record.title,
        content_type = %record.content_type,
        rating = %record.rating,
        "cascade resolved"
    );
    CascadeReport { record, steps }
}

// ── Pure merge steps ───────────────────────────────────────────

/// `true` when the filename names an anime release.
#[must_use]
pub fn anime_hint(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    ANIME_HINTS.iter().any(|hint| lower.contains(hint))
}

/// First candidate whose date contains the hinted year, else the first candidate.
#[must_use]
pub fn select_candidate(candidates: &[MultiCandidate], year: Option<u16>) -> Option<&MultiCandidate> {
    let wanted = year.map(|y| y.to_string());
    wanted
        .as_deref()
        .and_then(|y| {
            candidates
                .iter()
                .find(|c| c.date.as_deref().is_some_and(|d| d.contains(y)))
        })
        .or_else(|| candidates.first())
}

/// Renders a catalog score: integral values keep one decimal (`8.0`),
/// others print as given (`8.54`).
#[must_use]
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.1} ⭐")
    } else {
        format!("{score} ⭐")
    }
}

fn top_genres(genres: &[String]) -> Option<String> {
    let kept: Vec<&str> = genres
        .iter()
        .map(String::as_str)
        .filter(|g| !g.is_empty())
        .take(MAX_GENRES)
        .collect();
    (!kept.is_empty()).then(|| kept.join(", "))
}

fn year_prefix(date: &str) -> &str {
    date.get(..4).unwrap_or(date)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn apply_primary(record: MetadataRecord, candidate: &MultiCandidate) -> MetadataRecord {
    let signals = Signals {
        kind: candidate.kind,
        country: candidate.origin_country.as_deref().unwrap_or(""),
        language: candidate.original_language.as_deref().unwrap_or(""),
        animation: candidate.animation,
    };
    let mut record = record.refine_content_type(classify(&signals));

    if let Some(title) = present(candidate.title.as_deref()) {
        record = record.with_title(title);
    }
    if let Some(genres) = top_genres(&candidate.genres) {
        record = record.with_genres(genres);
    }
    // A zero vote average means "no votes".
    if let Some(vote) = candidate.vote_average.filter(|v| *v > 0.0) {
        record = record.with_rating(format!("{vote:.1} ⭐"));
    }
    record.with_date(candidate.year().unwrap_or(NOT_AVAILABLE))
}

pub fn apply_episodic(record: MetadataRecord, hit: &ShowHit) -> MetadataRecord {
    let mut record = record;
    if let Some(name) = present(hit.name.as_deref()) {
        record = record.with_title(name);
    }
    if let Some(rating) = hit.rating.filter(|r| *r > 0.0) {
        record = record.with_rating(format_score(rating));
    }
    if let Some(premiered) = present(hit.premiered.as_deref()) {
        record = record.with_date(year_prefix(premiered));
    }
    if let Some(genres) = top_genres(&hit.genres) {
        record = record.with_genres(genres);
    }
    match hit.country_code.as_deref().and_then(drama_for_country_code) {
        Some(drama) if record.content_type.is_series_like() => record.refine_content_type(drama),
        _ => record,
    }
}

/// Anime-catalog hits override every field and force the anime label.
pub fn apply_anime(record: MetadataRecord, hit: &AnimeHit) -> MetadataRecord {
    let mut record = record;
    if let Some(title) = present(hit.title.as_deref()) {
        record = record.with_title(title);
    }
    record = record.with_rating(hit.score.map_or_else(|| NOT_AVAILABLE.to_string(), format_score));
    if let Some(year) = hit.year {
        record = record.with_date(year.to_string());
    }
    if let Some(genres) = top_genres(&hit.genres) {
        record = record.with_genres(genres);
    }
    record.force_content_type(ContentType::Anime)
}

pub fn apply_general(record: MetadataRecord, hit: &GeneralHit) -> MetadataRecord {
    let mut record = record;
    if let Some(title) = present(hit.title.as_deref()) {
        record = record.with_title(title);
    }
    let rating = match present(hit.rating.as_deref()) {
        Some(r) if r != NOT_AVAILABLE => format!("{r} ⭐"),
        _ => NOT_AVAILABLE.to_string(),
    };
    record = record
        .with_rating(rating)
        .with_genres(present(hit.genres.as_deref()).unwrap_or(MISC_GENRES));
    if let Some(year) = present(hit.year.as_deref()) {
        record = record.with_date(year_prefix(year));
    }
    match classify_by_country_name(hit.kind, &hit.country) {
        Some(ty) => record.refine_content_type(ty),
        None => record,
    }
}
