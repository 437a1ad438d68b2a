//! Shirabe command-line front-end
//!
//! Resolves media filenames given as arguments (or one per stdin line) and
//! prints one JSON record per input, in input order. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use shirabe::catalog::{CascadeReport, CatalogConfig, KeyPool};
use shirabe::domain::StructuralGuess;
use shirabe::probe::ProbeConfig;
use shirabe::{DisplayRecord, FileHandle, HttpResolver, ResolveRequest, ResolverConfig};
use tokio::task::JoinSet;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON object per line
    Json,
    /// Human-readable record blocks
    Text,
}

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "shirabe")]
#[command(about = "Resolve noisy media filenames into metadata records")]
#[command(version)]
struct Cli {
    /// Filenames to resolve; read from stdin when omitted
    filenames: Vec<String>,

    /// File size in bytes, applied to every input
    #[arg(short, long, default_value_t = 0)]
    size: u64,

    /// File URL or bot file id to probe for the real resolution
    #[arg(long)]
    handle: Option<String>,

    /// Search with the first word of the title only
    #[arg(short, long)]
    deep: bool,

    /// Search this title instead of the guessed one
    #[arg(short, long)]
    title: Option<String>,

    /// Make no network calls
    #[arg(long)]
    offline: bool,

    /// Per-call catalog timeout
    #[arg(long, env = "SHIRABE_TIMEOUT_SECS", default_value_t = 5)]
    timeout_secs: u64,

    /// Comma-separated TMDB API keys
    #[arg(long, env = "SHIRABE_TMDB_KEYS", hide_env_values = true, default_value = "")]
    tmdb_keys: String,

    /// Comma-separated OMDb API keys
    #[arg(long, env = "SHIRABE_OMDB_KEYS", hide_env_values = true, default_value = "")]
    omdb_keys: String,

    /// Bot token for resolving file ids
    #[arg(long, env = "SHIRABE_BOT_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    /// Fixed seed for API key selection
    #[arg(long)]
    key_seed: Option<u64>,

    /// Include the structural guess and per-catalog outcomes
    #[arg(short, long)]
    explain: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolver_config(&self) -> ResolverConfig {
        let mut catalog = CatalogConfig::new()
            .with_tmdb_keys(KeyPool::from_csv(&self.tmdb_keys))
            .with_omdb_keys(KeyPool::from_csv(&self.omdb_keys))
            .with_timeout_secs(self.timeout_secs);
        if let Some(seed) = self.key_seed {
            catalog = catalog.with_key_seed(seed);
        }

        let mut probe = ProbeConfig::new();
        if let Some(token) = self.bot_token.as_deref().filter(|t| !t.is_empty()) {
            probe = probe.with_bot_token(token);
        }

        ResolverConfig::new()
            .with_catalog(catalog)
            .with_probe(probe)
            .with_offline(self.offline)
    }

    fn request(&self, filename: String) -> ResolveRequest {
        let mut request = ResolveRequest::new(filename, self.size).with_deep_match(self.deep);
        if let Some(handle) = &self.handle {
            request = request.with_handle(FileHandle::new(handle.clone()));
        }
        if let Some(title) = &self.title {
            request = request.with_title(title.clone());
        }
        request
    }
}

/// One line of JSON output.
#[derive(Debug, Serialize)]
struct Output {
    input: String,
    record: DisplayRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    guess: Option<StructuralGuess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cascade: Option<CascadeReport>,
    probed: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_inputs(cli: &Cli) -> Result<Vec<String>> {
    if !cli.filenames.is_empty() {
        return Ok(cli.filenames.clone());
    }
    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            inputs.push(line.to_string());
        }
    }
    Ok(inputs)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let resolver = Arc::new(
        HttpResolver::from_config(&cli.resolver_config()).context("failed to build resolver")?,
    );
    let inputs = read_inputs(&cli)?;
    info!(count = inputs.len(), offline = cli.offline, "resolving");

    let mut tasks = JoinSet::new();
    for (idx, filename) in inputs.into_iter().enumerate() {
        let resolver = Arc::clone(&resolver);
        let request = cli.request(filename);
        tasks.spawn(async move {
            let resolution = resolver.resolve_detailed(&request).await;
            (idx, request.filename, resolution)
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        results.push(joined.context("resolve task failed")?);
    }
    results.sort_by_key(|(idx, ..)| *idx);
    debug!(count = results.len(), "all inputs resolved");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (_, input, resolution) in results {
        match cli.format {
            Format::Json => {
                let (guess, cascade) = if cli.explain {
                    (Some(resolution.guess), resolution.report)
                } else {
                    (None, None)
                };
                let output = Output {
                    input,
                    record: resolution.display,
                    guess,
                    cascade,
                    probed: resolution.probed,
                };
                serde_json::to_writer(&mut out, &output).context("failed to encode record")?;
                writeln!(out)?;
            }
            Format::Text => {
                writeln!(out, "# {input}")?;
                writeln!(out, "{}", resolution.display)?;
                if cli.explain {
                    if let Some(report) = &resolution.report {
                        for step in &report.steps {
                            writeln!(out, "  {:<9} {:?}", step.step, step.outcome)?;
                        }
                    }
                }
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_into_config_and_request() {
        let cli = Cli::try_parse_from([
            "shirabe",
            "--tmdb-keys",
            "a,b",
            "--omdb-keys",
            "c",
            "--key-seed",
            "7",
            "--offline",
            "--deep",
            "--size",
            "2048",
            "--handle",
            "https://host/f.mkv",
            "Movie.2019.mkv",
        ])
        .unwrap();

        let config = cli.resolver_config();
        assert!(config.offline);
        assert_eq!(config.catalog.tmdb_keys.len(), 2);
        assert_eq!(config.catalog.omdb_keys.len(), 1);
        assert_eq!(config.catalog.key_seed, Some(7));
        assert!(config.probe.bot_token.is_none());

        let request = cli.request("Movie.2019.mkv".into());
        assert!(request.deep_match);
        assert_eq!(request.file_size, 2048);
        assert_eq!(
            request.file_handle.as_ref().map(FileHandle::as_str),
            Some("https://host/f.mkv")
        );
    }
}
