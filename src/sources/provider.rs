//! Trait definitions and record types for data sources.
//!
//! Three kinds of source feed the movie cache:
//!
//! - a [`MovieDatabase`] (IMDb) resolves titles to canonical ids and serves
//!   details and parental-guide votes,
//! - a [`ReviewSite`] (Letterboxd) serves community ratings and cast,
//! - an [`AvailabilitySource`] (JustWatch data) lists where a film can be
//!   streamed or rented.
//!
//! Every call may fail with [`Error::NotFound`](marquee_common::Error::NotFound),
//! [`Error::Malformed`](marquee_common::Error::Malformed) or
//! [`Error::Transient`](marquee_common::Error::Transient).

use std::collections::BTreeMap;

use async_trait::async_trait;
use marquee_common::Result;
use serde::{Deserialize, Serialize};

use crate::advisory::AdvisoryVotes;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Best eligible match for a free-text title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleMatch {
    /// Canonical id (e.g. `tt1375666`).
    pub id: String,
    pub title: String,
    pub year: Option<u16>,
}

/// Full details from the movie database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub minutes: Option<u32>,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    /// Cast in the order the source lists it.
    pub cast: Vec<String>,
    pub genres: Vec<String>,
    pub plot: Option<String>,
    /// Title kind, lowercased (`"movie"`, `"tv series"`, ...).
    pub kind: String,
}

/// A film page on the review site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Canonical film page URL.
    pub url: String,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    pub cast: Vec<String>,
    /// Movie database id linked from the page, when present.
    pub source_id: Option<String>,
    pub title: Option<String>,
    pub year: Option<u16>,
}

/// How a service offers a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Stream,
    Rent,
    Buy,
}

impl Modality {
    /// Map an offer label (`"Stream"`, `"Play"`, `"Rent"`, ...) to a modality.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "stream" | "play" | "free" | "ads" => Some(Self::Stream),
            "rent" => Some(Self::Rent),
            "buy" => Some(Self::Buy),
            _ => None,
        }
    }
}

/// Service names per modality, as listed by the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub offers: BTreeMap<Modality, Vec<String>>,
}

impl Availability {
    pub fn add(&mut self, modality: Modality, service: impl Into<String>) {
        self.offers.entry(modality).or_default().push(service.into());
    }

    pub fn services(&self, modality: Modality) -> &[String] {
        self.offers.get(&modality).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Source traits
// ---------------------------------------------------------------------------

/// The primary movie database.
#[async_trait]
pub trait MovieDatabase: Send + Sync {
    /// Short, lowercase identifier for this source (e.g. `"imdb"`).
    fn name(&self) -> &'static str;

    /// Resolve a free-text title to the first eligible match.
    ///
    /// TV-only results are filtered out here; zero eligible results is
    /// `NotFound`.
    async fn search_by_title(&self, query: &str) -> Result<TitleMatch>;

    /// Fetch full details for a canonical id.
    async fn fetch_details(&self, id: &str) -> Result<MovieDetails>;

    /// Fetch parental-guide votes for a canonical id.
    async fn fetch_advisory(&self, id: &str) -> Result<AdvisoryVotes>;
}

/// The community review site.
#[async_trait]
pub trait ReviewSite: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch the film page linked to a movie database id.
    async fn fetch_by_source_id(&self, id: &str) -> Result<ReviewRecord>;

    /// Fetch a film page by its site slug (e.g. `"the-thing"`). The record's
    /// `source_id`, `title` and `year` are filled in when the page has them.
    async fn fetch_by_slug(&self, slug: &str) -> Result<ReviewRecord>;
}

/// Streaming and rental availability.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch offers for the film whose review-site page is `review_url`.
    async fn fetch_availability(&self, review_url: &str) -> Result<Availability>;
}
