use shirabe_catalog::CatalogError;
use shirabe_core::ShirabeError;
use shirabe_probe::ProbeError;
use thiserror::Error;

/// Errors raised while building a [`Resolver`](crate::Resolver).
///
/// Resolution itself never fails; these only surface at construction.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error(transparent)]
    Core(#[from] ShirabeError),

    #[error("catalog setup failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("probe setup failed: {0}")]
    Probe(#[from] ProbeError),
}

pub type Result<T> = std::result::Result<T, ResolverError>;
