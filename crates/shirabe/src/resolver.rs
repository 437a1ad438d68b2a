//! # Resolver
//!
//! The request boundary: normalize, guess, run the cascade and the probe
//! concurrently, detect languages, assemble. Never fails once built.

use std::future::Future;

use shirabe_catalog::{
    AnimeCatalog, Cascade, CascadeQuery, CascadeReport, EpisodicCatalog, GeneralCatalog,
    HttpCascade, PrimaryCatalog,
};
use shirabe_core::{
    DisplayRecord, FilenameNormalizer, HeuristicGuesser, MetadataRecord, ResolutionTier,
    StructuralGuess, StructuralGuesser, assemble, detect_languages,
};
use shirabe_probe::{
    ContainerInspector, FileHandle, FileLocator, HttpProbe, ResolutionProbe, SampleFetcher,
};
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::request::{Resolution, ResolveRequest};

/// Search title used when the filename yields none.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Source of catalog metadata for a query.
pub trait MetadataLookup: Send + Sync {
    fn lookup(&self, query: &CascadeQuery<'_>) -> impl Future<Output = CascadeReport> + Send;
}

impl<P, E, A, G> MetadataLookup for Cascade<P, E, A, G>
where
    P: PrimaryCatalog,
    E: EpisodicCatalog,
    A: AnimeCatalog,
    G: GeneralCatalog,
{
    async fn lookup(&self, query: &CascadeQuery<'_>) -> CascadeReport {
        self.run(query).await
    }
}

/// Source of the true video quality for a stored file.
pub trait QualityProbe: Send + Sync {
    fn probe(&self, handle: &FileHandle) -> impl Future<Output = Option<ResolutionTier>> + Send;
}

impl<L, F, I> QualityProbe for ResolutionProbe<L, F, I>
where
    L: FileLocator,
    F: SampleFetcher,
    I: ContainerInspector,
{
    async fn probe(&self, handle: &FileHandle) -> Option<ResolutionTier> {
        ResolutionProbe::probe(self, handle).await
    }
}

/// Filename → display record.
pub struct Resolver<M, Q> {
    normalizer: FilenameNormalizer,
    guesser: Box<dyn StructuralGuesser>,
    lookup: Option<M>,
    prober: Option<Q>,
}

/// Resolver over the live catalogs and HTTP probe.
pub type HttpResolver = Resolver<HttpCascade, HttpProbe>;

impl HttpResolver {
    /// Builds the live resolver, or an offline one when configured so.
    ///
    /// # Errors
    ///
    /// Fails if a regex or an HTTP client cannot be built.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        if config.offline {
            return Self::offline();
        }
        Self::new(
            HttpCascade::from_config(&config.catalog)?,
            HttpProbe::from_config(&config.probe)?,
        )
    }
}

impl<M: MetadataLookup, Q: QualityProbe> Resolver<M, Q> {
    /// # Errors
    ///
    /// Fails if the built-in normalizer or guesser patterns fail to compile.
    pub fn new(lookup: M, prober: Q) -> Result<Self> {
        Self::build(Some(lookup), Some(prober))
    }

    /// A resolver that makes no network calls.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn offline() -> Result<Self> {
        Self::build(None, None)
    }

    fn build(lookup: Option<M>, prober: Option<Q>) -> Result<Self> {
        Ok(Self {
            normalizer: FilenameNormalizer::new()?,
            guesser: Box::new(HeuristicGuesser::new()?),
            lookup,
            prober,
        })
    }

    /// Replace the structural guesser.
    pub fn with_guesser(mut self, guesser: impl StructuralGuesser + 'static) -> Self {
        self.guesser = Box::new(guesser);
        self
    }

    pub async fn resolve(&self, request: &ResolveRequest) -> DisplayRecord {
        self.resolve_detailed(request).await.display
    }

    /// Resolves and keeps the intermediate results.
    pub async fn resolve_detailed(&self, request: &ResolveRequest) -> Resolution {
        let cleaned = self.normalizer.normalize(&request.filename);
        let guess = self.guesser.guess(&cleaned).unwrap_or_else(|e| {
            debug!(%cleaned, error = %e, "no structural guess");
            StructuralGuess::default()
        });

        let title = request
            .title
            .as_deref()
            .or(guess.title.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();
        let query = CascadeQuery::new(&title, &request.filename)
            .with_year(guess.year)
            .with_deep_match(request.deep_match);
        debug!(
            filename = %request.filename,
            %cleaned,
            %title,
            year = ?guess.year,
            deep_match = request.deep_match,
            "resolving"
        );

        let (report, probed) = tokio::join!(
            self.lookup_metadata(&query),
            self.probe_quality(request.file_handle.as_ref()),
        );

        let record = report
            .as_ref()
            .map_or_else(|| MetadataRecord::new(title.as_str()), |r| r.record.clone());
        let languages = detect_languages(&request.filename, &guess.languages);
        let was_probed = probed.is_some();
        let quality = probed
            .unwrap_or_else(|| ResolutionTier::from_screen_size_hint(guess.screen_size.as_deref()));

        let resolved = assemble(record, &languages, quality, request.file_size);
        info!(
            title = %resolved.title,
            content_type = %resolved.content_type,
            quality = %resolved.quality,
            probed = was_probed,
            "resolved"
        );

        Resolution {
            display: resolved,
            guess,
            report,
            probed: was_probed,
        }
    }

    async fn lookup_metadata(&self, query: &CascadeQuery<'_>) -> Option<CascadeReport> {
        match &self.lookup {
            Some(lookup) => Some(lookup.lookup(query).await),
            None => None,
        }
    }

    async fn probe_quality(&self, handle: Option<&FileHandle>) -> Option<ResolutionTier> {
        let (Some(prober), Some(handle)) = (&self.prober, handle) else {
            return None;
        };
        prober.probe(handle).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use shirabe_catalog::{
        AnimeHit, CatalogError, GeneralHit, KeyPool, MultiCandidate, ShowHit, StepOutcome,
    };
    use shirabe_core::ContentType;

    use super::*;

    /// Every catalog call fails.
    struct Down;

    fn down() -> CatalogError {
        CatalogError::Api {
            status: 502,
            message: "bad gateway".into(),
        }
    }

    impl PrimaryCatalog for Down {
        async fn search_multi(
            &self,
            _query: &str,
            _api_key: &str,
        ) -> shirabe_catalog::Result<Vec<MultiCandidate>> {
            Err(down())
        }
    }

    impl EpisodicCatalog for Down {
        async fn find_show(&self, _query: &str) -> shirabe_catalog::Result<Option<ShowHit>> {
            Err(down())
        }
    }

    impl AnimeCatalog for Down {
        async fn find_anime(&self, _query: &str) -> shirabe_catalog::Result<Option<AnimeHit>> {
            Err(down())
        }
    }

    impl GeneralCatalog for Down {
        async fn find_title(
            &self,
            _title: &str,
            _year: Option<u16>,
            _api_key: &str,
        ) -> shirabe_catalog::Result<Option<GeneralHit>> {
            Err(down())
        }
    }

    struct FixedProbe(Option<ResolutionTier>);

    impl QualityProbe for FixedProbe {
        async fn probe(&self, _handle: &FileHandle) -> Option<ResolutionTier> {
            self.0.clone()
        }
    }

    /// Records each query and answers with a fixed record.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(String, String, Option<u16>)>>,
        answer: Option<MetadataRecord>,
    }

    impl MetadataLookup for Recorder {
        async fn lookup(&self, query: &CascadeQuery<'_>) -> CascadeReport {
            self.seen.lock().unwrap().push((
                query.title.to_string(),
                query.search_term().to_string(),
                query.year,
            ));
            CascadeReport {
                record: self
                    .answer
                    .clone()
                    .unwrap_or_else(|| MetadataRecord::new(query.title)),
                steps: Vec::new(),
            }
        }
    }

    fn failing_cascade() -> Cascade<Down, Down, Down, Down> {
        Cascade::new(Down, Down, Down, Down)
            .with_keys(KeyPool::new(["t"]), KeyPool::new(["o"]))
            .with_key_seed(Some(5))
    }

    fn handle() -> FileHandle {
        FileHandle::new("https://cdn.example.com/file.mkv")
    }

    #[tokio::test]
    async fn total_fallback_keeps_sentinels() {
        let resolver = Resolver::new(failing_cascade(), FixedProbe(None)).unwrap();
        let request = ResolveRequest::new("Inception.2010.1080p.BluRay.x264.mkv", 1_468_006_400)
            .with_handle(handle());

        let resolution = resolver.resolve_detailed(&request).await;
        let d = &resolution.display;
        assert_eq!(d.title, "Inception");
        assert_eq!(d.rating, "N/A");
        assert_eq!(d.genres, "Misc");
        assert_eq!(d.date, "N/A");
        assert_eq!(d.content_type, ContentType::Movie);
        assert_eq!(d.languages, "Unknown");
        assert_eq!(d.quality, ResolutionTier::FullHd);
        assert_eq!(d.size, "1.37 GB");
        assert!(!resolution.probed);

        let report = resolution.report.unwrap();
        assert!(
            report
                .steps
                .iter()
                .any(|s| matches!(s.outcome, StepOutcome::Failed(_)))
        );
    }

    #[tokio::test]
    async fn probed_quality_beats_filename_hint() {
        let resolver =
            Resolver::new(Recorder::default(), FixedProbe(Some(ResolutionTier::Uhd4k))).unwrap();
        let request = ResolveRequest::new("Dune.2021.720p.WEB-DL.mkv", 10).with_handle(handle());

        let resolution = resolver.resolve_detailed(&request).await;
        assert_eq!(resolution.display.quality.to_string(), "4K (2160p)");
        assert!(resolution.probed);
    }

    #[tokio::test]
    async fn no_handle_means_no_probe() {
        let resolver =
            Resolver::new(Recorder::default(), FixedProbe(Some(ResolutionTier::Uhd4k))).unwrap();
        let display = resolver
            .resolve(&ResolveRequest::new("Dune.2021.720p.WEB-DL.mkv", 10))
            .await;
        assert_eq!(display.quality, ResolutionTier::Hd);
    }

    #[tokio::test]
    async fn unmapped_hint_passes_through() {
        let resolver = Resolver::new(Recorder::default(), FixedProbe(None)).unwrap();
        let display = resolver
            .resolve(&ResolveRequest::new("Old.Show.S02E03.480p.mkv", 0).with_handle(handle()))
            .await;
        assert_eq!(display.quality.to_string(), "480p");
        assert_eq!(display.size, "0B");
    }

    #[tokio::test]
    async fn catalog_record_flows_into_display() {
        let answer = MetadataRecord::new("Parasite")
            .with_rating("8.5 ⭐")
            .with_genres("Comedy, Thriller, Drama")
            .with_date("2019")
            .force_content_type(ContentType::KMovie);
        let resolver = Resolver::new(
            Recorder {
                answer: Some(answer),
                ..Recorder::default()
            },
            FixedProbe(None),
        )
        .unwrap();

        let display = resolver
            .resolve(&ResolveRequest::new("Parasite.2019.KOR.1080p.mkv", 2_147_483_648))
            .await;
        assert_eq!(display.title, "Parasite");
        assert_eq!(display.content_type, ContentType::KMovie);
        assert_eq!(display.rating, "8.5 ⭐");
        assert_eq!(display.languages, "Korean");
        assert_eq!(display.size, "2.0 GB");
    }

    #[tokio::test]
    async fn guess_feeds_the_query() {
        let resolver = Resolver::new(Recorder::default(), FixedProbe(None)).unwrap();
        resolver
            .resolve(&ResolveRequest::new("@chan [Grp] Blade.Runner.2049.2017.2160p.mkv", 0))
            .await;
        resolver
            .resolve(
                &ResolveRequest::new("whatever.mkv", 0)
                    .with_title("Pushpa The Rise")
                    .with_deep_match(true),
            )
            .await;

        let seen = resolver.lookup.as_ref().unwrap().seen.lock().unwrap().clone();
        assert_eq!(
            seen[0],
            (
                "Blade Runner 2049".to_string(),
                "Blade Runner 2049".to_string(),
                Some(2017)
            )
        );
        assert_eq!(seen[1].0, "Pushpa The Rise");
        assert_eq!(seen[1].1, "Pushpa");
    }

    #[tokio::test]
    async fn unparsable_filename_uses_unknown_title() {
        let resolver = Resolver::new(Recorder::default(), FixedProbe(None)).unwrap();
        let display = resolver.resolve(&ResolveRequest::new("", 0)).await;
        assert_eq!(display.title, UNKNOWN_TITLE);
        assert_eq!(display.quality, ResolutionTier::FullHd);
        assert_eq!(display.languages, "Unknown");
    }

    #[tokio::test]
    async fn offline_resolver_uses_filename_only() {
        let resolver = HttpResolver::from_config(&ResolverConfig::new().with_offline(true)).unwrap();
        let resolution = resolver
            .resolve_detailed(
                &ResolveRequest::new("@Channel [Group] Jawan.2023.Hindi.Tamil.Dual.1080p.mkv", 0)
                    .with_handle(handle()),
            )
            .await;

        let d = &resolution.display;
        assert_eq!(d.title, "Jawan");
        assert_eq!(d.languages, "Hindi & Tamil & Dual Audio");
        assert_eq!(d.quality, ResolutionTier::FullHd);
        assert!(resolution.report.is_none());
        assert_eq!(resolution.guess.year, Some(2023));
    }

    #[tokio::test]
    async fn resolution_serializes() {
        let resolver = Resolver::new(Recorder::default(), FixedProbe(None)).unwrap();
        let resolution = resolver
            .resolve_detailed(&ResolveRequest::new("Movie.Name.2019.mkv", 1024))
            .await;
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["display"]["title"], "Movie Name");
        assert_eq!(json["display"]["size"], "1.0 KB");
        assert_eq!(json["probed"], false);
    }
}
