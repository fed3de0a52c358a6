mod cli;

use marquee::{
    cache::FieldCache,
    config,
    enrichment::{self, EnrichOptions, EnrichmentPipeline, ResolveMode},
    list,
    report::ReportOptions,
    sources::{http::HttpClient, providers::LetterboxdProvider, SourceSet},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "marquee=trace,marquee_common=trace,reqwest=debug".to_string()
        } else {
            "marquee=info,marquee_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;
    let cache_path = cli
        .datafile
        .clone()
        .unwrap_or_else(|| config.cache.path.clone());

    match cli.command {
        Commands::Run {
            input,
            output,
            force_availability,
            title_search,
        } => {
            let options = EnrichOptions {
                mode: if title_search {
                    ResolveMode::TitleSearch
                } else {
                    ResolveMode::ReviewSlug
                },
                force_availability,
            };
            let output = output.unwrap_or_else(|| enrichment::default_output_path(&input));
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_movies(&config, &cache_path, &input, &output, options))
        }
        Commands::Delete { query } => delete_movie(&cache_path, &query),
        Commands::FetchList {
            url,
            output,
            npages,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(fetch_list(&config, &url, &output, npages))
        }
        Commands::Fields => list_fields(&cache_path),
        Commands::Version => {
            println!("marquee {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn run_movies(
    config: &config::Config,
    cache_path: &Path,
    input: &Path,
    output: &Path,
    options: EnrichOptions,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let mut cache = FieldCache::open(cache_path)
        .with_context(|| format!("Failed to open movie cache: {:?}", cache_path))?;
    tracing::info!("Using movie cache at {:?} ({} movies)", cache_path, cache.len());

    let pipeline = EnrichmentPipeline::new(SourceSet::from_config(config), options);
    let report_options = ReportOptions::from(&config.report);
    let summary =
        enrichment::manage_movies(&pipeline, &mut cache, input, output, &report_options).await?;

    println!(
        "Processed {} movies: {} complete, {} not found, {} failed",
        summary.processed, summary.completed, summary.not_found, summary.failed
    );
    println!("Report: {}", output.display());
    if summary.failed > 0 {
        println!("Run again to retry the failed movies.");
    }

    Ok(())
}

fn delete_movie(cache_path: &Path, query: &str) -> Result<()> {
    let mut cache = FieldCache::open(cache_path)
        .with_context(|| format!("Failed to open movie cache: {:?}", cache_path))?;

    let key = query.to_lowercase();
    if cache.delete(&key)? {
        println!("Deleted '{}' from {}", key, cache_path.display());
    } else {
        println!("'{}' is not in {}", key, cache_path.display());
    }
    Ok(())
}

async fn fetch_list(config: &config::Config, url: &str, output: &Path, npages: u32) -> Result<()> {
    let letterboxd = LetterboxdProvider::new(
        HttpClient::new(&config.scrape),
        &config.sources.letterboxd_url,
    );

    let slugs = list::download_list(&letterboxd, url, npages)
        .await
        .with_context(|| format!("Failed to download list: {}", url))?;
    list::write_list(output, &slugs)
        .with_context(|| format!("Failed to write list file: {:?}", output))?;

    println!("Saved {} films to {}", slugs.len(), output.display());
    Ok(())
}

fn list_fields(cache_path: &Path) -> Result<()> {
    let cache = FieldCache::open(cache_path)
        .with_context(|| format!("Failed to open movie cache: {:?}", cache_path))?;

    for name in cache.all_field_names() {
        println!("{}", name);
    }
    Ok(())
}
