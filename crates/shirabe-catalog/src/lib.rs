//! # Shirabe Catalog
//!
//! Clients for the four remote metadata catalogs and the fixed-order
//! [`Cascade`] that enriches a guessed title into a [`MetadataRecord`].
//!
//! | Step | Catalog | Client |
//! |------|---------|--------|
//! | primary | TMDB multi search | [`TmdbClient`] |
//! | episodic | TVmaze single search | [`TvMazeClient`] |
//! | anime | Jikan | [`JikanClient`] |
//! | general | OMDb | [`OmdbClient`] |
//!
//! [`MetadataRecord`]: shirabe_core::MetadataRecord

pub mod cascade;
pub mod catalog;
pub mod config;
pub mod error;
mod http;
pub mod jikan;
pub mod keys;
pub mod omdb;
pub mod tmdb;
pub mod tvmaze;

pub use cascade::{Cascade, CascadeQuery, CascadeReport, HttpCascade, Step, StepOutcome, StepReport};
pub use catalog::{
    AnimeCatalog, AnimeHit, EpisodicCatalog, GeneralCatalog, GeneralHit, MultiCandidate,
    PrimaryCatalog, ShowHit,
};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use http::build_client;
pub use jikan::JikanClient;
pub use keys::KeyPool;
pub use omdb::OmdbClient;
pub use tmdb::TmdbClient;
pub use tvmaze::TvMazeClient;
