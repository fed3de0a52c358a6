//! Enrichment pipeline for filling the movie cache.
//!
//! The [`EnrichmentPipeline`] walks a list of query keys and, for each one,
//! runs only the steps whose fields are not cached yet:
//!
//! 1. resolve the canonical id (review-site slug or title search),
//! 2. movie database details,
//! 3. parental-guide summary,
//! 4. review-site rating,
//! 5. streaming availability (also when a refresh is forced).
//!
//! A `NotFound` from any source stops the remaining steps for that key;
//! other failures are logged and the run moves on. The cache is persisted
//! after every key, whatever happened, so re-running the pipeline resumes
//! where the last run stopped without repeating finished source calls.

mod steps;

pub use steps::{normalize_offers, truncate_plot, PLOT_PREVIEW_CHARS};

use std::path::{Path, PathBuf};

use anyhow::Context;
use marquee_common::{fields, Error, Result};
use tracing::{info, warn};

use crate::cache::FieldCache;
use crate::report::{self, ReportOptions};
use crate::sources::SourceSet;

/// How query keys map to movies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
    /// Keys are Letterboxd film slugs (as produced by `fetch-list`).
    #[default]
    ReviewSlug,
    /// Keys are free-text titles, resolved by searching IMDb.
    TitleSearch,
}

/// Options for a pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichOptions {
    pub mode: ResolveMode,
    /// Re-fetch availability even when it is already cached.
    pub force_availability: bool,
}

/// Counts for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank keys visited.
    pub processed: usize,
    /// Keys whose every step succeeded or was already cached.
    pub completed: usize,
    /// Keys stopped by a `NotFound`.
    pub not_found: usize,
    /// Keys stopped by a malformed response or transient error.
    pub failed: usize,
}

/// Fills cache fields from the configured sources.
#[derive(Debug, Clone)]
pub struct EnrichmentPipeline {
    sources: SourceSet,
    options: EnrichOptions,
}

impl EnrichmentPipeline {
    pub fn new(sources: SourceSet, options: EnrichOptions) -> Self {
        Self { sources, options }
    }

    /// Enrich every key in `queries`, persisting the cache after each one.
    ///
    /// Source failures never abort the run. The only error returned is a
    /// failure to write the cache file.
    pub async fn run(&self, cache: &mut FieldCache, queries: &[String]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for query in queries {
            if query.trim().is_empty() {
                continue;
            }
            summary.processed += 1;

            match self.enrich(cache, query).await {
                Ok(()) => summary.completed += 1,
                Err(e) if e.is_not_found() => {
                    warn!(query = %query, error = %e, "Movie not found; skipping remaining steps");
                    summary.not_found += 1;
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "Enrichment failed, will retry on the next run");
                    summary.failed += 1;
                }
            }

            cache.persist()?;
        }

        info!(
            processed = summary.processed,
            completed = summary.completed,
            not_found = summary.not_found,
            failed = summary.failed,
            "Enrichment run finished"
        );
        Ok(summary)
    }

    /// Run every missing step for one key. Stops at the first error.
    pub async fn enrich(&self, cache: &mut FieldCache, query: &str) -> Result<()> {
        let sources = &self.sources;

        if self.options.mode == ResolveMode::ReviewSlug
            && (!cache.has(query, fields::IMDB_ID) || !cache.has(query, fields::LETTERBOXD_RATING))
        {
            steps::resolve_review_slug(sources.reviews.as_ref(), cache, query).await?;
        }

        if cache.get(query, fields::IMDB_ID).is_empty() {
            let search_text = self.search_text(query);
            steps::search_title(sources.database.as_ref(), cache, query, &search_text).await?;
        }
        let id = cache.get(query, fields::IMDB_ID);
        if id.is_empty() {
            return Err(Error::not_found(query));
        }

        if !cache.has(query, fields::IMDB_RATING) || !cache.has(query, fields::KIND) {
            steps::fetch_main_details(sources.database.as_ref(), cache, query, &id).await?;
        }

        if !cache.has(query, fields::OBJECTIONABLE_CONTENT) {
            steps::fetch_parental_guide(sources.database.as_ref(), cache, query, &id).await?;
        }

        if !cache.has(query, fields::LETTERBOXD_RATING) {
            steps::fetch_reviews(sources.reviews.as_ref(), cache, query, &id).await?;
        }

        if self.options.force_availability
            || !cache.has(query, fields::STREAM)
            || !cache.has(query, fields::RENT)
        {
            steps::fetch_availability(sources.availability.as_ref(), cache, query).await?;
        }

        Ok(())
    }

    /// Text to search IMDb with. Slugs read better as words.
    fn search_text(&self, query: &str) -> String {
        match self.options.mode {
            ResolveMode::ReviewSlug => query.replace('-', " "),
            ResolveMode::TitleSearch => query.to_string(),
        }
    }
}

/// Read query keys from a list file: one per line, lowercased.
///
/// Blank lines are kept so the list keeps its shape; the pipeline skips
/// them.
pub fn read_queries(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim_end_matches('\r').to_lowercase())
        .collect())
}

/// Default report path: `out_<input file name>.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "movies".to_string());
    input.with_file_name(format!("out_{name}.csv"))
}

/// Enrich every movie listed in `input` and write the report to `output`.
pub async fn manage_movies(
    pipeline: &EnrichmentPipeline,
    cache: &mut FieldCache,
    input: &Path,
    output: &Path,
    report_options: &ReportOptions,
) -> anyhow::Result<RunSummary> {
    let queries = read_queries(input)
        .with_context(|| format!("Failed to read movie list: {:?}", input))?;
    info!(input = ?input, movies = queries.len(), "Processing movie list");

    let summary = pipeline
        .run(cache, &queries)
        .await
        .with_context(|| format!("Failed to persist movie cache: {:?}", cache.path()))?;

    let rows = report::write_report(output, cache, &queries, report_options)
        .with_context(|| format!("Failed to write report: {:?}", output))?;
    info!(output = ?output, rows, "Wrote report");

    Ok(summary)
}
