//! Data sources that feed the movie cache.
//!
//! # Module layout
//!
//! - [`provider`] -- Source traits and the records they return.
//! - [`providers`] -- IMDb, Letterboxd and JustWatch implementations.
//! - [`http`] -- Shared rate-limited HTTP client.
//! - [`markup`] -- JSON-LD and embedded-JSON helpers for scraped pages.

pub mod http;
pub mod markup;
pub mod provider;
pub mod providers;

use std::sync::Arc;

use crate::config::Config;

pub use provider::{
    Availability, AvailabilitySource, Modality, MovieDatabase, MovieDetails, ReviewRecord,
    ReviewSite, TitleMatch,
};

/// The three sources the enrichment pipeline draws from.
#[derive(Clone)]
pub struct SourceSet {
    pub database: Arc<dyn MovieDatabase>,
    pub reviews: Arc<dyn ReviewSite>,
    pub availability: Arc<dyn AvailabilitySource>,
}

impl SourceSet {
    pub fn new(
        database: Arc<dyn MovieDatabase>,
        reviews: Arc<dyn ReviewSite>,
        availability: Arc<dyn AvailabilitySource>,
    ) -> Self {
        Self {
            database,
            reviews,
            availability,
        }
    }

    /// Build the scraping sources described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let http = http::HttpClient::new(&config.scrape);
        Self::new(
            Arc::new(providers::ImdbProvider::new(
                http.clone(),
                &config.sources.imdb_url,
                &config.sources.imdb_search_url,
            )),
            Arc::new(providers::LetterboxdProvider::new(
                http.clone(),
                &config.sources.letterboxd_url,
            )),
            Arc::new(providers::JustWatchProvider::new(
                http,
                &config.sources.letterboxd_url,
            )),
        )
    }
}

impl std::fmt::Debug for SourceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSet")
            .field("database", &self.database.name())
            .field("reviews", &self.reviews.name())
            .field("availability", &self.availability.name())
            .finish()
    }
}
