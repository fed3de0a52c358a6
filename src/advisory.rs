//! Parental-guide summaries.
//!
//! IMDb's parental guide lets users vote a severity tier for each content
//! category. [`summarize`] turns those votes into the short complaint list
//! stored in the `Objectionable Content` field.

use std::collections::BTreeMap;
use std::fmt;

/// Returned when too few people voted for the signal to mean anything.
pub const LOW_DATA: &str = "Not enough data";

/// Returned when enough people voted and nothing qualified as a complaint.
pub const NOTHING_OBJECTIONABLE: &str = "Ok";

/// Minimum number of `frightening` votes before the guide is trusted.
pub const MIN_FRIGHTENING_VOTES: u32 = 20;

const SEPARATOR: &str = "; ";

/// Parental-guide categories the summary looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Frightening,
    Violence,
    Nudity,
    Profanity,
}

impl Category {
    /// Map an IMDb category identifier (`"NUDITY"`, `"violence"`, ...) to a
    /// category. Categories the summary ignores (alcohol, ...) map to `None`.
    pub fn from_imdb(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "frightening" | "frightening & intense scenes" => Some(Self::Frightening),
            "violence" | "violence & gore" => Some(Self::Violence),
            "nudity" | "sex & nudity" => Some(Self::Nudity),
            "profanity" => Some(Self::Profanity),
            _ => None,
        }
    }
}

/// Severity tier voted on for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Parse a tier label, ignoring case. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "mild" => Some(Self::Mild),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Mild => write!(f, "Mild"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Severe => write!(f, "Severe"),
        }
    }
}

/// Votes for a single category: the winning tier plus the per-tier counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryVotes {
    pub status: Option<Severity>,
    pub votes: BTreeMap<Severity, u32>,
}

impl CategoryVotes {
    pub fn new(status: Severity) -> Self {
        Self {
            status: Some(status),
            votes: BTreeMap::new(),
        }
    }

    pub fn with_votes(mut self, severity: Severity, count: u32) -> Self {
        self.votes.insert(severity, count);
        self
    }

    pub fn total_votes(&self) -> u64 {
        self.votes.values().map(|&n| u64::from(n)).sum()
    }
}

/// All advisory votes for one title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisoryVotes {
    pub categories: BTreeMap<Category, CategoryVotes>,
}

impl AdvisoryVotes {
    pub fn insert(&mut self, category: Category, votes: CategoryVotes) {
        self.categories.insert(category, votes);
    }

    pub fn status(&self, category: Category) -> Option<Severity> {
        self.categories.get(&category).and_then(|c| c.status)
    }
}

/// Complaint table, evaluated top to bottom. Output order follows row order.
const COMPLAINTS: [(Category, Severity, &str); 6] = [
    (Category::Violence, Severity::Severe, "Intense violence"),
    (Category::Nudity, Severity::Severe, "Abundant sexual content"),
    (Category::Nudity, Severity::Moderate, "Some sexual content"),
    (Category::Profanity, Severity::Severe, "Abundant swearing"),
    (Category::Profanity, Severity::Moderate, "Some swearing"),
    (Category::Violence, Severity::Moderate, "Some violence"),
];

/// Summarize advisory votes into a complaint string.
///
/// The `frightening` vote total gates the whole summary: fewer than
/// [`MIN_FRIGHTENING_VOTES`] (or no frightening category at all) yields
/// [`LOW_DATA`].
pub fn summarize(advisory: &AdvisoryVotes) -> String {
    let frightening = advisory
        .categories
        .get(&Category::Frightening)
        .map(CategoryVotes::total_votes)
        .unwrap_or(0);
    if frightening < u64::from(MIN_FRIGHTENING_VOTES) {
        return LOW_DATA.to_string();
    }

    let complaints: Vec<&str> = COMPLAINTS
        .iter()
        .filter(|(category, severity, _)| advisory.status(*category) == Some(*severity))
        .map(|(_, _, phrase)| *phrase)
        .collect();

    if complaints.is_empty() {
        NOTHING_OBJECTIONABLE.to_string()
    } else {
        complaints.join(SEPARATOR)
    }
}
