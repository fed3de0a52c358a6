//! Field names stored in the movie cache.
//!
//! The names double as report column headers, so they are kept exactly as
//! they appear in existing cache files.

/// Display title.
pub const TITLE: &str = "Title";
/// Release year.
pub const YEAR: &str = "Year";
/// IMDb identifier, the canonical id used to cross-reference other sources.
pub const IMDB_ID: &str = "IMDB_ID";
/// Runtime in minutes.
pub const MINUTES: &str = "Minutes";
/// IMDb user rating.
pub const IMDB_RATING: &str = "IMDB Rating";
/// Number of IMDb ratings.
pub const IMDB_COUNT: &str = "IMDB Count";
/// First billed cast member.
pub const LEAD: &str = "Lead";
/// Genre list joined with [`GENRE_DELIMITER`].
pub const GENRES: &str = "Genres";
/// Truncated plot synopsis.
pub const PLOT: &str = "Plot";
/// IMDb title kind ("movie", "short", ...).
pub const KIND: &str = "Kind";
/// Summary of the parental guide.
pub const OBJECTIONABLE_CONTENT: &str = "Objectionable Content";
/// Canonical Letterboxd film page.
pub const LETTERBOXD_URL: &str = "Letterboxd URL";
/// Letterboxd average rating.
pub const LETTERBOXD_RATING: &str = "Letterboxd Rating";
/// Number of Letterboxd ratings.
pub const LETTERBOXD_COUNT: &str = "Letterboxd Count";
/// Services streaming the film with a subscription.
pub const STREAM: &str = "Stream?";
/// Services renting the film that do not also stream it.
pub const RENT: &str = "Rent?";

/// Separator used when storing the genre list.
pub const GENRE_DELIMITER: &str = "-";

/// Lead placeholder for titles without any cast listing.
pub const NO_LEAD: &str = "Nobody";

/// Default report columns, in output order.
pub const DEFAULT_REPORT_COLUMNS: [&str; 12] = [
    YEAR,
    TITLE,
    MINUTES,
    IMDB_RATING,
    LETTERBOXD_RATING,
    LEAD,
    OBJECTIONABLE_CONTENT,
    GENRES,
    STREAM,
    RENT,
    IMDB_COUNT,
    LETTERBOXD_COUNT,
];

/// Genres left out of reports unless the caller says otherwise.
pub const DEFAULT_SKIP_GENRES: [&str; 1] = ["Short"];
