//! Individual enrichment steps.
//!
//! Each step performs exactly one source call and writes its results into
//! the cache. Values a source does not have are written as empty text so
//! the field still counts as fetched on the next run.

use marquee_common::{fields, Error, FieldValue, Result};
use tracing::info;

use crate::advisory;
use crate::cache::FieldCache;
use crate::sources::{Availability, AvailabilitySource, Modality, MovieDatabase, ReviewRecord, ReviewSite};

/// Plots are cut at the first space at or after this many characters.
pub const PLOT_PREVIEW_CHARS: usize = 60;

const ELLIPSIS: &str = "...";
const SERVICE_SEPARATOR: &str = ", ";

fn or_empty<T: Into<FieldValue>>(value: Option<T>) -> FieldValue {
    value.map(Into::into).unwrap_or_else(|| FieldValue::from(""))
}

/// Resolve a review-site slug to its film page, which also yields the
/// canonical id, title and year.
pub async fn resolve_review_slug(
    reviews: &dyn ReviewSite,
    cache: &mut FieldCache,
    query: &str,
) -> Result<()> {
    info!(query = %query, "Fetching Letterboxd info for '{}'", query);
    let record = reviews.fetch_by_slug(query).await?;

    if let Some(id) = &record.source_id {
        cache.set(query, fields::IMDB_ID, id.as_str());
    }
    if let Some(title) = &record.title {
        cache.set(query, fields::TITLE, title.as_str());
    }
    if let Some(year) = record.year {
        cache.set(query, fields::YEAR, u32::from(year));
    }
    apply_review(cache, query, &record);
    Ok(())
}

/// Search the movie database by free text and store title, year and id.
pub async fn search_title(
    database: &dyn MovieDatabase,
    cache: &mut FieldCache,
    query: &str,
    search_text: &str,
) -> Result<()> {
    info!(query = %query, "Searching IMDb for '{}'", search_text);
    let found = database.search_by_title(search_text).await?;
    if found.id.is_empty() {
        return Err(Error::malformed(format!("search for '{search_text}' returned no id")));
    }

    cache.set(query, fields::TITLE, found.title);
    cache.set(query, fields::YEAR, or_empty(found.year.map(u32::from)));
    cache.set(query, fields::IMDB_ID, found.id);
    Ok(())
}

/// Fetch runtime, rating, cast, genres, plot and kind.
pub async fn fetch_main_details(
    database: &dyn MovieDatabase,
    cache: &mut FieldCache,
    query: &str,
    id: &str,
) -> Result<()> {
    info!(query = %query, id = %id, "Fetching film details for '{}'", cache.get(query, fields::TITLE));
    let details = database.fetch_details(id).await?;

    cache.set(query, fields::MINUTES, or_empty(details.minutes));
    cache.set(query, fields::IMDB_RATING, or_empty(details.rating));
    cache.set(query, fields::IMDB_COUNT, or_empty(details.rating_count));
    // IMDb cast order is not billing order, so an existing lead wins.
    if cache.get(query, fields::LEAD).is_empty() {
        let lead = details
            .cast
            .first()
            .map(String::as_str)
            .unwrap_or(fields::NO_LEAD);
        cache.set(query, fields::LEAD, lead);
    }
    cache.set(query, fields::GENRES, details.genres.join(fields::GENRE_DELIMITER));
    cache.set(
        query,
        fields::PLOT,
        details.plot.as_deref().map(truncate_plot).unwrap_or_default(),
    );
    cache.set(query, fields::KIND, details.kind);
    Ok(())
}

/// Fetch the parental guide and store its summary.
pub async fn fetch_parental_guide(
    database: &dyn MovieDatabase,
    cache: &mut FieldCache,
    query: &str,
    id: &str,
) -> Result<()> {
    info!(query = %query, id = %id, "Fetching parental guide for '{}'", cache.get(query, fields::TITLE));
    let votes = database.fetch_advisory(id).await?;
    cache.set(query, fields::OBJECTIONABLE_CONTENT, advisory::summarize(&votes));
    Ok(())
}

/// Fetch the review-site page linked to a canonical id.
pub async fn fetch_reviews(
    reviews: &dyn ReviewSite,
    cache: &mut FieldCache,
    query: &str,
    id: &str,
) -> Result<()> {
    info!(query = %query, id = %id, "Fetching Letterboxd info for '{}'", cache.get(query, fields::TITLE));
    let record = reviews.fetch_by_source_id(id).await?;
    apply_review(cache, query, &record);
    Ok(())
}

/// Fetch streaming and rental offers for the film's review-site page.
pub async fn fetch_availability(
    availability: &dyn AvailabilitySource,
    cache: &mut FieldCache,
    query: &str,
) -> Result<()> {
    let url = cache.get(query, fields::LETTERBOXD_URL);
    if url.is_empty() {
        return Err(Error::not_found(format!("no Letterboxd page for '{query}'")));
    }

    info!(query = %query, "Fetching availability info for '{}'", cache.get(query, fields::TITLE));
    let offers = availability.fetch_availability(&url).await?;
    let (stream, rent) = normalize_offers(&offers);
    cache.set(query, fields::STREAM, stream.join(SERVICE_SEPARATOR));
    cache.set(query, fields::RENT, rent.join(SERVICE_SEPARATOR));
    Ok(())
}

/// Store review-site rating fields and backfill the lead actor.
fn apply_review(cache: &mut FieldCache, query: &str, record: &ReviewRecord) {
    cache.set(query, fields::LETTERBOXD_URL, record.url.as_str());
    cache.set(query, fields::LETTERBOXD_RATING, or_empty(record.rating));
    cache.set(query, fields::LETTERBOXD_COUNT, or_empty(record.rating_count));

    let lead = cache.get(query, fields::LEAD);
    if lead.is_empty() || lead == fields::NO_LEAD {
        let lead = record
            .cast
            .first()
            .map(String::as_str)
            .unwrap_or(fields::NO_LEAD);
        cache.set(query, fields::LEAD, lead);
    }
}

/// Cut a plot at the first space at or after [`PLOT_PREVIEW_CHARS`] and mark
/// the cut with an ellipsis. Plots with no such space are kept whole.
pub fn truncate_plot(plot: &str) -> String {
    let Some((start, _)) = plot.char_indices().nth(PLOT_PREVIEW_CHARS) else {
        return plot.to_string();
    };
    match plot[start..].find(' ') {
        Some(offset) => format!("{}{ELLIPSIS}", &plot[..start + offset]),
        None => plot.to_string(),
    }
}

/// Reduce offers to short service names.
///
/// Streaming services come first; a rental service that also streams the
/// film is dropped from the rental list. Each service appears once, named by
/// the first word of its label ("Netflix basic with Ads" -> "Netflix").
pub fn normalize_offers(availability: &Availability) -> (Vec<String>, Vec<String>) {
    let short_name = |label: &String| label.split(' ').next().unwrap_or_default().to_string();

    let mut stream: Vec<String> = Vec::new();
    for service in availability.services(Modality::Stream).iter().map(short_name) {
        if !service.is_empty() && !stream.contains(&service) {
            stream.push(service);
        }
    }

    let mut rent: Vec<String> = Vec::new();
    for service in availability.services(Modality::Rent).iter().map(short_name) {
        if !service.is_empty() && !stream.contains(&service) && !rent.contains(&service) {
            rent.push(service);
        }
    }

    (stream, rent)
}
