//! IMDb movie database source.
//!
//! Implements [`MovieDatabase`] by scraping public IMDb pages:
//!
//! - title search through the suggestion JSON endpoint,
//! - details from the schema.org JSON-LD block on the title page,
//! - parental-guide votes from the `__NEXT_DATA__` payload of the
//!   parental-guide page.

use async_trait::async_trait;
use marquee_common::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::advisory::{AdvisoryVotes, Category, CategoryVotes, Severity};
use crate::sources::http::{decode_entities, urlencoded, HttpClient};
use crate::sources::markup;
use crate::sources::provider::{MovieDatabase, MovieDetails, TitleMatch};

/// Suggestion result kinds that never count as a movie match.
const PROHIBITED_KINDS: [&str; 4] = ["tvSeries", "tvMiniSeries", "tvSpecial", "podcastSeries"];

// ---------------------------------------------------------------------------
// Suggestion API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SuggestionResponse {
    #[serde(default)]
    d: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    id: String,
    /// Display label (title).
    l: Option<String>,
    /// Year.
    y: Option<u16>,
    /// Kind identifier (`movie`, `tvSeries`, ...).
    qid: Option<String>,
}

// ---------------------------------------------------------------------------
// Source implementation
// ---------------------------------------------------------------------------

/// IMDb source.
pub struct ImdbProvider {
    http: HttpClient,
    base_url: String,
    search_url: String,
}

impl ImdbProvider {
    /// Create a provider against the given site and suggestion endpoints.
    pub fn new(http: HttpClient, base_url: &str, search_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            search_url: search_url.trim_end_matches('/').to_string(),
        }
    }

    fn suggestion_url(&self, query: &str) -> String {
        let bucket = query
            .chars()
            .find(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or('x');
        format!(
            "{}/suggestion/{bucket}/{}.json",
            self.search_url,
            urlencoded(query.trim())
        )
    }
}

/// First suggestion that is a title and not a TV-only kind.
fn first_eligible(response: SuggestionResponse, query: &str) -> Result<TitleMatch> {
    response
        .d
        .into_iter()
        .filter(|s| s.id.starts_with("tt"))
        .find(|s| {
            s.qid
                .as_deref()
                .map(|kind| !PROHIBITED_KINDS.contains(&kind))
                .unwrap_or(true)
        })
        .map(|s| TitleMatch {
            title: s.l.unwrap_or_default(),
            year: s.y,
            id: s.id,
        })
        .ok_or_else(|| Error::not_found(query))
}

/// Convert the JSON-LD `@type` to the lowercase kind labels stored in the cache.
fn kind_label(schema_type: &str) -> String {
    match schema_type {
        "Movie" => "movie".to_string(),
        "TVSeries" => "tv series".to_string(),
        "TVMiniSeries" => "tv mini series".to_string(),
        "TVEpisode" => "episode".to_string(),
        "TVSpecial" => "tv special".to_string(),
        "VideoGame" => "video game".to_string(),
        other => other.to_ascii_lowercase(),
    }
}

/// Parse an ISO-8601 duration like `PT2H28M` into whole minutes.
fn parse_duration_minutes(duration: &str) -> Option<u32> {
    let rest = duration.strip_prefix("PT")?;
    let mut minutes = 0u32;
    let mut number = String::new();
    for c in rest.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        let value: u32 = number.parse().ok()?;
        number.clear();
        match c {
            'H' => minutes = minutes.checked_add(value.checked_mul(60)?)?,
            'M' => minutes = minutes.checked_add(value)?,
            'S' => {}
            _ => return None,
        }
    }
    if !number.is_empty() {
        return None;
    }
    Some(minutes)
}

fn parse_details(html: &str, id: &str) -> Result<MovieDetails> {
    let ld = markup::json_ld(html)
        .ok_or_else(|| Error::malformed(format!("no JSON-LD block on IMDb page for {id}")))?;

    let rating = ld.get("aggregateRating");
    Ok(MovieDetails {
        minutes: ld
            .get("duration")
            .and_then(Value::as_str)
            .and_then(parse_duration_minutes),
        rating: rating
            .and_then(|r| r.get("ratingValue"))
            .and_then(markup::as_f64),
        rating_count: rating
            .and_then(|r| r.get("ratingCount"))
            .and_then(markup::as_u64),
        cast: markup::person_names(ld.get("actor"))
            .iter()
            .map(|name| decode_entities(name))
            .collect(),
        genres: markup::strings(ld.get("genre")),
        plot: ld
            .get("description")
            .and_then(Value::as_str)
            .map(decode_entities),
        kind: ld
            .get("@type")
            .and_then(Value::as_str)
            .map(kind_label)
            .unwrap_or_default(),
    })
}

fn parse_advisory(html: &str, id: &str) -> Result<AdvisoryVotes> {
    let data = markup::script_json(html, "script#__NEXT_DATA__")
        .ok_or_else(|| Error::malformed(format!("no page data on parental guide for {id}")))?;
    let categories = data
        .pointer("/props/pageProps/contentData/categories")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::malformed(format!("no advisory categories for {id}")))?;

    let mut advisory = AdvisoryVotes::default();
    for entry in categories {
        let Some(category) = entry
            .get("id")
            .and_then(Value::as_str)
            .and_then(Category::from_imdb)
        else {
            continue;
        };

        let mut votes = CategoryVotes {
            status: entry
                .pointer("/severitySummary/text")
                .and_then(Value::as_str)
                .and_then(Severity::parse),
            ..CategoryVotes::default()
        };
        for breakdown in entry
            .get("severityBreakdowns")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            let tier = breakdown
                .get("voteType")
                .and_then(Value::as_str)
                .and_then(Severity::parse);
            let count = breakdown.get("votedFor").and_then(markup::as_u64);
            if let (Some(tier), Some(count)) = (tier, count) {
                votes
                    .votes
                    .insert(tier, u32::try_from(count).unwrap_or(u32::MAX));
            }
        }
        advisory.insert(category, votes);
    }

    Ok(advisory)
}

#[async_trait]
impl MovieDatabase for ImdbProvider {
    fn name(&self) -> &'static str {
        "imdb"
    }

    async fn search_by_title(&self, query: &str) -> Result<TitleMatch> {
        let url = self.suggestion_url(query);
        debug!(url = %url, "IMDb title search");
        let response: SuggestionResponse = self.http.get_json(&url).await?;
        first_eligible(response, query)
    }

    async fn fetch_details(&self, id: &str) -> Result<MovieDetails> {
        let url = format!("{}/title/{id}/", self.base_url);
        let page = self.http.get_page(&url).await?;
        parse_details(&page.body, id)
    }

    async fn fetch_advisory(&self, id: &str) -> Result<AdvisoryVotes> {
        let url = format!("{}/title/{id}/parentalguide", self.base_url);
        let page = self.http.get_page(&url).await?;
        parse_advisory(&page.body, id)
    }
}
