use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::keys::KeyPool;

pub const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TVMAZE_URL: &str = "https://api.tvmaze.com";
pub const DEFAULT_JIKAN_URL: &str = "https://api.jikan.moe/v4";
pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com";

/// Per-call timeout applied to every catalog request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the catalog clients and the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub tmdb_url: String,
    pub tvmaze_url: String,
    pub jikan_url: String,
    pub omdb_url: String,
    pub timeout_secs: u64,
    pub tmdb_keys: KeyPool,
    pub omdb_keys: KeyPool,
    /// Fixed seed for key selection; `None` seeds from the clock per request.
    pub key_seed: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tmdb_url: DEFAULT_TMDB_URL.to_string(),
            tvmaze_url: DEFAULT_TVMAZE_URL.to_string(),
            jikan_url: DEFAULT_JIKAN_URL.to_string(),
            omdb_url: DEFAULT_OMDB_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tmdb_keys: KeyPool::default(),
            omdb_keys: KeyPool::default(),
            key_seed: None,
        }
    }
}

impl CatalogConfig {
    /// Create a configuration with default endpoints and no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TMDB key pool.
    pub fn with_tmdb_keys(mut self, keys: KeyPool) -> Self {
        self.tmdb_keys = keys;
        self
    }

    /// Set the OMDb key pool.
    pub fn with_omdb_keys(mut self, keys: KeyPool) -> Self {
        self.omdb_keys = keys;
        self
    }

    /// Set the per-call timeout (at least one second).
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    /// Pin key selection to a seed.
    pub fn with_key_seed(mut self, seed: u64) -> Self {
        self.key_seed = Some(seed);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
