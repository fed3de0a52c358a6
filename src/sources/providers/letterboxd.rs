//! Letterboxd review-site source.
//!
//! Film pages carry a CDATA-wrapped JSON-LD block with the aggregate rating
//! and cast. The IMDb id only appears as an outbound link, so it is matched
//! from the raw markup.

use std::sync::OnceLock;

use async_trait::async_trait;
use marquee_common::{Error, Result};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::sources::http::{decode_entities, urlencoded, HttpClient};
use crate::sources::markup;
use crate::sources::provider::{ReviewRecord, ReviewSite};

fn imdb_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"imdb\.com/title/(tt\d+)").expect("valid IMDb link pattern"))
}

/// Letterboxd source.
pub struct LetterboxdProvider {
    http: HttpClient,
    base_url: String,
}

impl LetterboxdProvider {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<ReviewRecord> {
        debug!(url = %url, "Letterboxd film page");
        let page = self.http.get_page(url).await?;
        parse_film_page(&page.body, &page.url)
    }

    /// Collect film slugs from one page of a list.
    pub async fn fetch_list_page(&self, url: &str) -> Result<Vec<String>> {
        let page = self.http.get_page(url).await?;
        Ok(parse_list_slugs(&page.body))
    }
}

/// Parse a film page. `page_url` is the URL the page was served from, used
/// when the JSON-LD block carries no URL of its own.
fn parse_film_page(html: &str, page_url: &str) -> Result<ReviewRecord> {
    let ld = markup::json_ld(html)
        .ok_or_else(|| Error::malformed(format!("no JSON-LD block on {page_url}")))?;

    let url = ld
        .get("@id")
        .or_else(|| ld.get("url"))
        .and_then(Value::as_str)
        .unwrap_or(page_url)
        .to_string();
    let rating = ld.get("aggregateRating");

    Ok(ReviewRecord {
        url,
        rating: rating
            .and_then(|r| r.get("ratingValue"))
            .and_then(markup::as_f64),
        rating_count: rating
            .and_then(|r| r.get("ratingCount"))
            .and_then(markup::as_u64),
        cast: markup::person_names(ld.get("actors").or_else(|| ld.get("actor")))
            .iter()
            .map(|name| decode_entities(name))
            .collect(),
        source_id: imdb_link()
            .captures(html)
            .map(|caps| caps[1].to_string()),
        title: ld
            .get("name")
            .and_then(Value::as_str)
            .map(decode_entities),
        year: ld
            .pointer("/releasedEvent/0/startDate")
            .and_then(|v| match v {
                Value::Number(n) => n.as_u64().and_then(|y| u16::try_from(y).ok()),
                Value::String(s) => markup::parse_year(s),
                _ => None,
            }),
    })
}

/// Film slugs on a list page, in page order.
pub(crate) fn parse_list_slugs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("[data-film-slug], [data-item-slug]") else {
        return Vec::new();
    };

    let mut slugs: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        let attrs = element.value();
        let slug = attrs
            .attr("data-film-slug")
            .or_else(|| attrs.attr("data-item-slug"))
            .map(str::trim)
            .unwrap_or_default();
        if !slug.is_empty() && !slugs.iter().any(|s| s == slug) {
            slugs.push(slug.to_string());
        }
    }
    slugs
}

#[async_trait]
impl ReviewSite for LetterboxdProvider {
    fn name(&self) -> &'static str {
        "letterboxd"
    }

    async fn fetch_by_source_id(&self, id: &str) -> Result<ReviewRecord> {
        let url = format!("{}/imdb/{}/", self.base_url, urlencoded(id));
        self.fetch_page(&url).await
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<ReviewRecord> {
        let url = format!("{}/film/{}/", self.base_url, urlencoded(slug.trim()));
        self.fetch_page(&url).await
    }
}
