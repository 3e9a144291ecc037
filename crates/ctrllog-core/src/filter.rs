//! Catalog filter engine
//!
//! Filtering is a stable, pure selection over a slice of records: a record is
//! kept when every active predicate (genre, year, rating, title search)
//! accepts it, and kept records stay in catalog order.
//!
//! The engine takes criteria as given. Turning UI gestures into criteria
//! (e.g. "every genre deselected" meaning "no genre restriction", negative
//! rating thresholds meaning "any rating") happens in
//! [`crate::discover::DiscoverFilters`] before the engine is called.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{GameRecord, Genre};

/// Inclusive release-year bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    pub fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    pub fn single(year: i32) -> Self {
        Self { from: year, to: year }
    }

    /// An inverted range contains nothing
    pub fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingDirection {
    #[default]
    AtLeast,
    AtMost,
}

impl RatingDirection {
    pub fn symbol(&self) -> &'static str {
        match self {
            RatingDirection::AtLeast => "≥",
            RatingDirection::AtMost => "≤",
        }
    }
}

impl fmt::Display for RatingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingDirection::AtLeast => write!(f, "at-least"),
            RatingDirection::AtMost => write!(f, "at-most"),
        }
    }
}

impl FromStr for RatingDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "at-least" | "above" | "min" | ">=" => Ok(RatingDirection::AtLeast),
            "at-most" | "below" | "max" | "<=" => Ok(RatingDirection::AtMost),
            other => Err(format!("unknown rating direction '{}'", other)),
        }
    }
}

/// Rating bound; a value of 0 disables it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingThreshold {
    pub value: f64,
    #[serde(default)]
    pub direction: RatingDirection,
}

impl RatingThreshold {
    pub fn at_least(value: f64) -> Self {
        Self {
            value,
            direction: RatingDirection::AtLeast,
        }
    }

    pub fn at_most(value: f64) -> Self {
        Self {
            value,
            direction: RatingDirection::AtMost,
        }
    }

    pub fn is_active(&self) -> bool {
        self.value != 0.0
    }

    pub fn accepts(&self, rating: f64) -> bool {
        if !self.is_active() {
            return true;
        }
        match self.direction {
            RatingDirection::AtLeast => rating >= self.value,
            RatingDirection::AtMost => rating <= self.value,
        }
    }
}

/// The active query. `Default` restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Empty, or containing every genre, means no genre restriction
    #[serde(default)]
    pub genre_selection: BTreeSet<Genre>,
    #[serde(default)]
    pub year_range: Option<YearRange>,
    #[serde(default)]
    pub rating_threshold: Option<RatingThreshold>,
    /// Case-insensitive title substring; empty means no restriction
    #[serde(default)]
    pub search_text: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genres(mut self, genres: impl IntoIterator<Item = Genre>) -> Self {
        self.genre_selection = genres.into_iter().collect();
        self
    }

    pub fn with_year_range(mut self, range: YearRange) -> Self {
        self.year_range = Some(range);
        self
    }

    pub fn with_rating(mut self, threshold: RatingThreshold) -> Self {
        self.rating_threshold = Some(threshold);
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn restricts_genre(&self) -> bool {
        !self.genre_selection.is_empty()
            && !Genre::all().iter().all(|g| self.genre_selection.contains(g))
    }

    /// True when no predicate can reject a record
    pub fn is_unrestricted(&self) -> bool {
        !self.restricts_genre()
            && self.year_range.is_none()
            && self.rating_threshold.is_none_or(|t| !t.is_active())
            && self.search_text.is_empty()
    }

    pub fn matches(&self, game: &GameRecord) -> bool {
        Predicates::new(self).accepts(game)
    }
}

/// Criteria with the search needle lowered once per call
struct Predicates<'a> {
    criteria: &'a FilterCriteria,
    restrict_genre: bool,
    needle: String,
}

impl<'a> Predicates<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            restrict_genre: criteria.restricts_genre(),
            needle: criteria.search_text.to_lowercase(),
        }
    }

    fn accepts(&self, game: &GameRecord) -> bool {
        self.genre(game) && self.year(game) && self.rating(game) && self.search(game)
    }

    fn genre(&self, game: &GameRecord) -> bool {
        !self.restrict_genre || self.criteria.genre_selection.contains(&game.genre)
    }

    fn year(&self, game: &GameRecord) -> bool {
        self.criteria
            .year_range
            .is_none_or(|range| range.contains(game.release_year))
    }

    fn rating(&self, game: &GameRecord) -> bool {
        self.criteria
            .rating_threshold
            .is_none_or(|threshold| threshold.accepts(game.rating))
    }

    fn search(&self, game: &GameRecord) -> bool {
        self.needle.is_empty() || game.title.to_lowercase().contains(&self.needle)
    }
}

/// Iterate over the records of `catalog` accepted by `criteria`, in order
pub fn filter_iter<'a>(
    catalog: &'a [GameRecord],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a GameRecord> + 'a {
    let predicates = Predicates::new(criteria);
    catalog.iter().filter(move |game| predicates.accepts(game))
}

/// Stable filter: the returned records keep their relative catalog order
pub fn apply_filters(catalog: &[GameRecord], criteria: &FilterCriteria) -> Vec<GameRecord> {
    let filtered: Vec<GameRecord> = filter_iter(catalog, criteria).cloned().collect();
    tracing::trace!(
        catalog = catalog.len(),
        kept = filtered.len(),
        "Applied filters"
    );
    filtered
}
