use serde::{Deserialize, Serialize};
use shirabe_catalog::CatalogConfig;
use shirabe_probe::ProbeConfig;

/// Configuration for a [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub catalog: CatalogConfig,
    pub probe: ProbeConfig,
    /// Skip every network call; records carry only filename-derived data.
    pub offline: bool,
}

impl ResolverConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog configuration.
    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the probe configuration.
    pub fn with_probe(mut self, probe: ProbeConfig) -> Self {
        self.probe = probe;
        self
    }

    /// Enable or disable offline mode.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}
