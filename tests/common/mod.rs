//! Shared test harness for integration tests.
//!
//! Provides in-memory sources that implement the source traits, count every
//! call, and can be told to fail. [`Fixture::library`] seeds them with a
//! couple of well-known films.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marquee::advisory::{AdvisoryVotes, Category, CategoryVotes, Severity};
use marquee::sources::{
    Availability, AvailabilitySource, Modality, MovieDatabase, MovieDetails, ReviewRecord,
    ReviewSite, SourceSet, TitleMatch,
};
use marquee_common::{Error, Result};

/// Error a source should return for the next N calls to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    NotFound,
    Malformed,
    Transient,
}

impl Failure {
    fn error(self, what: &str) -> Error {
        match self {
            Self::NotFound => Error::not_found(what),
            Self::Malformed => Error::malformed(what),
            Self::Transient => Error::transient(what),
        }
    }
}

/// Per-operation call counter plus queued failures.
#[derive(Debug, Default)]
pub struct Operation {
    calls: AtomicUsize,
    failures: Mutex<Vec<Failure>>,
}

impl Operation {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Fail the next call with `failure`.
    pub fn fail_next(&self, failure: Failure) {
        self.failures.lock().unwrap().push(failure);
    }

    fn enter(&self, what: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut failures = self.failures.lock().unwrap();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures.remove(0).error(what))
        }
    }
}

// ---------------------------------------------------------------------------
// Movie database
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FakeDatabase {
    pub titles: Mutex<HashMap<String, TitleMatch>>,
    pub details: Mutex<HashMap<String, MovieDetails>>,
    pub advisories: Mutex<HashMap<String, AdvisoryVotes>>,
    pub search: Operation,
    pub fetch_details: Operation,
    pub fetch_advisory: Operation,
    /// Every search text received, in order.
    pub searched: Mutex<Vec<String>>,
}

impl FakeDatabase {
    pub fn calls(&self) -> usize {
        self.search.calls() + self.fetch_details.calls() + self.fetch_advisory.calls()
    }
}

#[async_trait]
impl MovieDatabase for FakeDatabase {
    fn name(&self) -> &'static str {
        "fake-imdb"
    }

    async fn search_by_title(&self, query: &str) -> Result<TitleMatch> {
        self.search.enter(query)?;
        self.searched.lock().unwrap().push(query.to_string());
        self.titles
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .ok_or_else(|| Error::not_found(query))
    }

    async fn fetch_details(&self, id: &str) -> Result<MovieDetails> {
        self.fetch_details.enter(id)?;
        self.details
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(id))
    }

    async fn fetch_advisory(&self, id: &str) -> Result<AdvisoryVotes> {
        self.fetch_advisory.enter(id)?;
        self.advisories
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::malformed(id))
    }
}

// ---------------------------------------------------------------------------
// Review site
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FakeReviews {
    pub by_id: Mutex<HashMap<String, ReviewRecord>>,
    pub by_slug: Mutex<HashMap<String, ReviewRecord>>,
    pub fetch_by_id: Operation,
    pub fetch_by_slug: Operation,
}

impl FakeReviews {
    pub fn calls(&self) -> usize {
        self.fetch_by_id.calls() + self.fetch_by_slug.calls()
    }
}

#[async_trait]
impl ReviewSite for FakeReviews {
    fn name(&self) -> &'static str {
        "fake-letterboxd"
    }

    async fn fetch_by_source_id(&self, id: &str) -> Result<ReviewRecord> {
        self.fetch_by_id.enter(id)?;
        self.by_id
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(id))
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<ReviewRecord> {
        self.fetch_by_slug.enter(slug)?;
        self.by_slug
            .lock()
            .unwrap()
            .get(slug)
            .cloned()
            .ok_or_else(|| Error::not_found(slug))
    }
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FakeAvailability {
    pub offers: Mutex<HashMap<String, Availability>>,
    pub fetch: Operation,
}

impl FakeAvailability {
    pub fn calls(&self) -> usize {
        self.fetch.calls()
    }
}

#[async_trait]
impl AvailabilitySource for FakeAvailability {
    fn name(&self) -> &'static str {
        "fake-justwatch"
    }

    async fn fetch_availability(&self, review_url: &str) -> Result<Availability> {
        self.fetch.enter(review_url)?;
        Ok(self
            .offers
            .lock()
            .unwrap()
            .get(review_url)
            .cloned()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// The three fake sources, shared with the pipeline under test.
#[derive(Debug, Default, Clone)]
pub struct Fixture {
    pub database: Arc<FakeDatabase>,
    pub reviews: Arc<FakeReviews>,
    pub availability: Arc<FakeAvailability>,
}

pub const ALIEN_ID: &str = "tt0078748";
pub const ALIEN_URL: &str = "https://letterboxd.com/film/alien/";
pub const THING_ID: &str = "tt0084787";
pub const THING_URL: &str = "https://letterboxd.com/film/the-thing/";

fn advisory(violence: Severity, nudity: Severity) -> AdvisoryVotes {
    let mut votes = AdvisoryVotes::default();
    votes.insert(
        Category::Frightening,
        CategoryVotes::new(Severity::Severe)
            .with_votes(Severity::Moderate, 40)
            .with_votes(Severity::Severe, 300),
    );
    votes.insert(Category::Violence, CategoryVotes::new(violence));
    votes.insert(Category::Nudity, CategoryVotes::new(nudity));
    votes.insert(Category::Profanity, CategoryVotes::new(Severity::Mild));
    votes
}

impl Fixture {
    /// Sources that know about "Alien" and "The Thing".
    pub fn library() -> Self {
        let fixture = Self::default();

        {
            let mut titles = fixture.database.titles.lock().unwrap();
            titles.insert(
                "alien".to_string(),
                TitleMatch {
                    id: ALIEN_ID.to_string(),
                    title: "Alien".to_string(),
                    year: Some(1979),
                },
            );
            titles.insert(
                "the thing".to_string(),
                TitleMatch {
                    id: THING_ID.to_string(),
                    title: "The Thing".to_string(),
                    year: Some(1982),
                },
            );
        }

        {
            let mut details = fixture.database.details.lock().unwrap();
            details.insert(
                ALIEN_ID.to_string(),
                MovieDetails {
                    minutes: Some(117),
                    rating: Some(8.5),
                    rating_count: Some(950_000),
                    cast: vec!["Sigourney Weaver".to_string(), "Tom Skerritt".to_string()],
                    genres: vec!["Horror".to_string(), "Sci-Fi".to_string()],
                    plot: Some(
                        "The crew of a commercial spacecraft encounters a deadly lifeform after investigating an unknown transmission."
                            .to_string(),
                    ),
                    kind: "movie".to_string(),
                },
            );
            details.insert(
                THING_ID.to_string(),
                MovieDetails {
                    minutes: Some(109),
                    rating: Some(8.2),
                    rating_count: Some(450_000),
                    cast: Vec::new(),
                    genres: vec!["Horror".to_string(), "Mystery".to_string()],
                    plot: Some("Antarctica.".to_string()),
                    kind: "movie".to_string(),
                },
            );
        }

        {
            let mut advisories = fixture.database.advisories.lock().unwrap();
            advisories.insert(ALIEN_ID.to_string(), advisory(Severity::Moderate, Severity::None));
            advisories.insert(THING_ID.to_string(), advisory(Severity::Severe, Severity::None));
        }

        {
            let alien = ReviewRecord {
                url: ALIEN_URL.to_string(),
                rating: Some(4.3),
                rating_count: Some(700_000),
                cast: vec!["Sigourney Weaver".to_string()],
                source_id: Some(ALIEN_ID.to_string()),
                title: Some("Alien".to_string()),
                year: Some(1979),
            };
            let thing = ReviewRecord {
                url: THING_URL.to_string(),
                rating: Some(4.4),
                rating_count: Some(600_000),
                cast: vec!["Kurt Russell".to_string()],
                source_id: Some(THING_ID.to_string()),
                title: Some("The Thing".to_string()),
                year: Some(1982),
            };
            let mut by_id = fixture.reviews.by_id.lock().unwrap();
            by_id.insert(ALIEN_ID.to_string(), alien.clone());
            by_id.insert(THING_ID.to_string(), thing.clone());
            let mut by_slug = fixture.reviews.by_slug.lock().unwrap();
            by_slug.insert("alien".to_string(), alien);
            by_slug.insert("the-thing".to_string(), thing);
        }

        {
            let mut offers = fixture.availability.offers.lock().unwrap();
            let mut alien = Availability::default();
            alien.add(Modality::Stream, "Hulu");
            alien.add(Modality::Rent, "Apple TV");
            alien.add(Modality::Rent, "Hulu");
            offers.insert(ALIEN_URL.to_string(), alien);
            let mut thing = Availability::default();
            thing.add(Modality::Stream, "Peacock Premium");
            thing.add(Modality::Stream, "Peacock Premium Plus");
            thing.add(Modality::Buy, "Amazon Video");
            offers.insert(THING_URL.to_string(), thing);
        }

        fixture
    }

    pub fn sources(&self) -> SourceSet {
        SourceSet::new(
            self.database.clone(),
            self.reviews.clone(),
            self.availability.clone(),
        )
    }

    /// Source calls made so far, across all three sources.
    pub fn total_calls(&self) -> usize {
        self.database.calls() + self.reviews.calls() + self.availability.calls()
    }
}

/// Owned query keys.
pub fn queries(list: &[&str]) -> Vec<String> {
    list.iter().map(|q| q.to_string()).collect()
}
