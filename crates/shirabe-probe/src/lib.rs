//! # Shirabe Probe
//!
//! Best-effort resolution detection for a remotely stored video: locate the
//! file, download its first megabyte, read the video track's pixel size from
//! the container header and bucket it into a [`ResolutionTier`].
//!
//! Every failure collapses to "unknown" (`None`); the caller then falls back
//! to the screen-size token guessed from the filename.

pub mod config;
pub mod error;
pub mod fetch;
pub mod inspect;
pub mod locator;

use shirabe_core::ResolutionTier;
use tracing::{debug, warn};

pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use fetch::{HttpSampler, SampleFetcher, range_header};
pub use inspect::{Container, ContainerInspector, SniffInspector};
pub use locator::{AnyLocator, BotApiLocator, DirectLocator, FileHandle, FileLocator};

/// Locate → ranged fetch → inspect → tier.
pub struct ResolutionProbe<L, F, I> {
    locator: L,
    fetcher: F,
    inspector: I,
}

/// Probe over live HTTP with the built-in container sniffer.
pub type HttpProbe = ResolutionProbe<AnyLocator, HttpSampler, SniffInspector>;

impl HttpProbe {
    /// Uses the bot API locator when a token is configured, direct URLs otherwise.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let sampler = HttpSampler::from_config(config)?;
        let locator = match &config.bot_token {
            Some(token) => {
                let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
                AnyLocator::BotApi(BotApiLocator::new(http, &config.bot_api_url, token.clone()))
            }
            None => AnyLocator::Direct(DirectLocator),
        };
        Ok(ResolutionProbe::new(locator, sampler, SniffInspector))
    }
}

impl<L, F, I> ResolutionProbe<L, F, I>
where
    L: FileLocator,
    F: SampleFetcher,
    I: ContainerInspector,
{
    pub fn new(locator: L, fetcher: F, inspector: I) -> Self {
        Self {
            locator,
            fetcher,
            inspector,
        }
    }

    /// Probes `handle`; any failure or incomplete header yields `None`.
    pub async fn probe(&self, handle: &FileHandle) -> Option<ResolutionTier> {
        match self.try_probe(handle).await {
            Ok(tier) => {
                debug!(%handle, ?tier, "probe finished");
                tier
            }
            Err(e) => {
                warn!(%handle, error = %e, "resolution probe failed");
                None
            }
        }
    }

    /// Like [`probe`](Self::probe) but surfaces the failure.
    ///
    /// # Errors
    ///
    /// Propagates locator, transport and container errors.
    pub async fn try_probe(&self, handle: &FileHandle) -> Result<Option<ResolutionTier>> {
        let url = self.locator.locate(handle).await?;
        let sample = self.fetcher.fetch_sample(&url).await?;
        let dims = self.inspector.dimensions(&sample)?;
        Ok(ResolutionTier::from_dimensions(dims))
    }
}

#[cfg(test)]
mod tests {
    use shirabe_core::Dimensions;

    use super::*;

    struct FixedSample(Vec<u8>);

    impl SampleFetcher for FixedSample {
        async fn fetch_sample(&self, _url: &str) -> Result<Vec<u8>> {
            if self.0.is_empty() {
                Err(ProbeError::EmptySample)
            } else {
                Ok(self.0.clone())
            }
        }
    }

    struct FixedDims(Dimensions);

    impl ContainerInspector for FixedDims {
        fn dimensions(&self, _sample: &[u8]) -> Result<Dimensions> {
            Ok(self.0)
        }
    }

    fn url() -> FileHandle {
        FileHandle::new("https://cdn.example.com/video.mkv")
    }

    #[tokio::test]
    async fn maps_dimensions_to_tier() {
        let probe = ResolutionProbe::new(
            DirectLocator,
            FixedSample(vec![1, 2, 3]),
            FixedDims(Dimensions::new(1920, 800)),
        );
        assert_eq!(probe.probe(&url()).await, Some(ResolutionTier::FullHd));
    }

    #[tokio::test]
    async fn partial_dimensions_are_unknown() {
        let probe = ResolutionProbe::new(
            DirectLocator,
            FixedSample(vec![1]),
            FixedDims(Dimensions {
                width: Some(1920),
                height: None,
            }),
        );
        assert_eq!(probe.probe(&url()).await, None);
    }

    #[tokio::test]
    async fn failures_collapse_to_none() {
        let probe = ResolutionProbe::new(DirectLocator, FixedSample(Vec::new()), SniffInspector);
        assert_eq!(probe.probe(&url()).await, None);
        assert!(matches!(
            probe.try_probe(&url()).await,
            Err(ProbeError::EmptySample)
        ));

        let unlocatable = FileHandle::new("AgADBAADr6cxG");
        assert_eq!(probe.probe(&unlocatable).await, None);
    }

    #[tokio::test]
    async fn unknown_container_is_none() {
        let probe = ResolutionProbe::new(
            DirectLocator,
            FixedSample(b"GIF89a".to_vec()),
            SniffInspector,
        );
        assert!(matches!(
            probe.try_probe(&url()).await,
            Err(ProbeError::UnsupportedContainer)
        ));
    }

    #[test]
    fn http_probe_builds_from_config() {
        assert!(HttpProbe::from_config(&ProbeConfig::default()).is_ok());
        assert!(HttpProbe::from_config(&ProbeConfig::new().with_bot_token("1:t")).is_ok());
    }
}
