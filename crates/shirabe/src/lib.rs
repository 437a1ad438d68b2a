//! # Shirabe
//!
//! Turns a noisy media filename into a display-ready metadata record.
//!
//! ```text
//! filename ─► normalize ─► structural guess ─┬─► catalog cascade ──┐
//!                                            └─► resolution probe ─┼─► assemble ─► DisplayRecord
//!                          language detection ─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shirabe::{HttpResolver, ResolveRequest, ResolverConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = HttpResolver::from_config(&ResolverConfig::default())?;
//! let record = resolver
//!     .resolve(&ResolveRequest::new("Parasite.2019.KOR.1080p.BluRay.mkv", 2_147_483_648))
//!     .await;
//! println!("{record}");
//! # Ok(())
//! # }
//! ```
//!
//! The building blocks are re-exported as [`domain`], [`catalog`] and [`probe`].

pub mod config;
pub mod error;
pub mod request;
pub mod resolver;

pub use shirabe_catalog as catalog;
pub use shirabe_core as domain;
pub use shirabe_probe as probe;

pub use config::ResolverConfig;
pub use error::{ResolverError, Result};
pub use request::{Resolution, ResolveRequest};
pub use resolver::{HttpResolver, MetadataLookup, QualityProbe, Resolver, UNKNOWN_TITLE};

pub use shirabe_core::{ContentType, DisplayRecord, LanguageSet, MetadataRecord, ResolutionTier};
pub use shirabe_probe::FileHandle;
