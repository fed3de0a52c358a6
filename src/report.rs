//! Tab-separated movie reports built from the cache.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use marquee_common::{fields, Result};

use crate::cache::FieldCache;
use crate::config::ReportConfig;

/// Which columns to write and which genres to leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub columns: Vec<String>,
    /// An empty list keeps every movie.
    pub skip_genres: Vec<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            skip_genres: config.skip_genres.clone(),
        }
    }
}

/// Whether a `-`-joined genre list names any of `skip`.
///
/// Matching is on whole list entries, so genres that contain the delimiter
/// themselves ("Sci-Fi", "Film-Noir") still match exactly.
fn has_skipped_genre(genres: &str, skip: &[String]) -> bool {
    if genres.is_empty() {
        return false;
    }
    let d = fields::GENRE_DELIMITER;
    let wrapped = format!("{d}{genres}{d}");
    skip.iter()
        .filter(|genre| !genre.is_empty())
        .any(|genre| wrapped.contains(&format!("{d}{genre}{d}")))
}

/// Keep cells on one line and inside one column.
fn cell(value: String) -> String {
    if value.contains(['\t', '\n', '\r']) {
        value.replace(['\t', '\n', '\r'], " ")
    } else {
        value
    }
}

/// Keys in report order: most IMDb ratings first, ties in input order,
/// blank keys and skipped genres removed.
pub fn report_rows<'a>(
    cache: &FieldCache,
    keys: &'a [String],
    options: &ReportOptions,
) -> Vec<&'a str> {
    let mut rows: Vec<&str> = keys
        .iter()
        .map(String::as_str)
        .filter(|key| !key.trim().is_empty())
        .filter(|key| !has_skipped_genre(&cache.get(key, fields::GENRES), &options.skip_genres))
        .collect();

    rows.sort_by(|a, b| {
        let count_a = cache.get_number(a, fields::IMDB_COUNT);
        let count_b = cache.get_number(b, fields::IMDB_COUNT);
        count_b.total_cmp(&count_a)
    });
    rows
}

/// Render the report as text: a header line, then one line per movie.
pub fn render_report(cache: &FieldCache, keys: &[String], options: &ReportOptions) -> String {
    let mut out = options.columns.join("\t");
    out.push('\n');

    for key in report_rows(cache, keys, options) {
        let line: Vec<String> = options
            .columns
            .iter()
            .map(|column| cell(cache.get(key, column)))
            .collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}

/// Write the report to `path`. Returns the number of movie rows written.
pub fn write_report(
    path: &Path,
    cache: &FieldCache,
    keys: &[String],
    options: &ReportOptions,
) -> Result<usize> {
    let text = render_report(cache, keys, options);
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(report_rows(cache, keys, options).len())
}
