//! Discover page view model
//!
//! [`DiscoverFilters`] holds the per-view filter state that the dropdowns,
//! inline genre buttons and command-line flags all write to. It is the one
//! place where gestures are normalized into [`FilterCriteria`]:
//!
//! - deselecting the last selected genre resets the selection to all genres,
//!   and an explicitly cleared selection means "no genre restriction"
//! - ratings are snapped to the half-star grid; negative or NaN ratings mean
//!   "any rating"
//! - year bounds are kept ordered
//!
//! [`DiscoverPage::build`] then runs the filter engine once and assembles
//! every section of the page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Catalog, GameRecord, Genre, GenreDescriptor, Recommendation};
use crate::filter::{apply_filters, FilterCriteria, RatingDirection, RatingThreshold, YearRange};
use crate::rating::snap_to_half_star;
use crate::session::Session;
use crate::sort::{apply_sort, SortMode};

/// Oldest year offered by the year pickers
pub const EARLIEST_YEAR: i32 = 1990;
/// Tiles shown in the featured and recommended rows
pub const FEATURED_LIMIT: usize = 6;
pub const RECOMMENDED_LIMIT: usize = 6;

/// Year picker options, newest first
pub fn year_options(current_year: i32) -> Vec<i32> {
    (EARLIEST_YEAR..=current_year).rev().collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverFilters {
    selected_genres: BTreeSet<Genre>,
    year_range: Option<YearRange>,
    rating: f64,
    direction: RatingDirection,
    search: String,
}

impl Default for DiscoverFilters {
    fn default() -> Self {
        Self {
            selected_genres: Genre::all().iter().copied().collect(),
            year_range: None,
            rating: 0.0,
            direction: RatingDirection::AtLeast,
            search: String::new(),
        }
    }
}

impl DiscoverFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_genres(&self) -> &BTreeSet<Genre> {
        &self.selected_genres
    }

    pub fn is_genre_selected(&self, genre: Genre) -> bool {
        self.selected_genres.contains(&genre)
    }

    fn all_genres_selected(&self) -> bool {
        Genre::all().iter().all(|g| self.selected_genres.contains(g))
    }

    pub fn toggle_genre(&mut self, genre: Genre) {
        if self.selected_genres.remove(&genre) {
            if self.selected_genres.is_empty() {
                self.select_all_genres();
            }
        } else {
            self.selected_genres.insert(genre);
        }
    }

    pub fn select_all_genres(&mut self) {
        self.selected_genres = Genre::all().iter().copied().collect();
    }

    /// An empty selection shows every genre
    pub fn clear_genres(&mut self) {
        self.selected_genres.clear();
    }

    /// Replace the selection, e.g. from repeated `--genre` flags
    pub fn set_genres(&mut self, genres: impl IntoIterator<Item = Genre>) {
        self.selected_genres = genres.into_iter().collect();
    }

    pub fn year_range(&self) -> Option<YearRange> {
        self.year_range
    }

    /// Raising `from` past `to` pulls `to` along
    pub fn set_year_from(&mut self, year: i32) {
        let to = self.year_range.map_or(year, |r| r.to.max(year));
        self.year_range = Some(YearRange::new(year, to));
    }

    /// Lowering `to` below `from` pulls `from` along
    pub fn set_year_to(&mut self, year: i32) {
        let from = self.year_range.map_or(year, |r| r.from.min(year));
        self.year_range = Some(YearRange::new(from, year));
    }

    /// Set both bounds at once; inverted bounds are swapped
    pub fn set_year_range(&mut self, from: i32, to: i32) {
        self.year_range = Some(YearRange::new(from.min(to), from.max(to)));
    }

    pub fn clear_years(&mut self) {
        self.year_range = None;
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn set_rating(&mut self, value: f64) {
        let snapped = snap_to_half_star(value);
        if snapped != value {
            tracing::debug!(requested = value, applied = snapped, "Normalized rating filter");
        }
        self.rating = snapped;
    }

    pub fn clear_rating(&mut self) {
        self.rating = 0.0;
    }

    pub fn direction(&self) -> RatingDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: RatingDirection) {
        self.direction = direction;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Normalized criteria for the filter engine
    pub fn criteria(&self) -> FilterCriteria {
        let genre_selection = if self.all_genres_selected() {
            BTreeSet::new()
        } else {
            self.selected_genres.clone()
        };

        let rating_threshold = (self.rating > 0.0).then_some(RatingThreshold {
            value: self.rating,
            direction: self.direction,
        });

        FilterCriteria {
            genre_selection,
            year_range: self.year_range,
            rating_threshold,
            search_text: self.search.trim().to_string(),
        }
    }

    /// Genre dropdown label: "All genres", the single genre's name, or "N genres"
    pub fn genre_label(&self, genres: &[GenreDescriptor]) -> String {
        if self.selected_genres.is_empty() || self.all_genres_selected() {
            return "All genres".to_string();
        }
        if self.selected_genres.len() == 1 {
            if let Some(genre) = self.selected_genres.iter().next() {
                return genres
                    .iter()
                    .find(|d| d.id == *genre)
                    .map(|d| d.display_name.clone())
                    .unwrap_or_else(|| genre.label().to_string());
            }
        }
        format!("{} genres", self.selected_genres.len())
    }

    pub fn year_label(&self) -> String {
        match self.year_range {
            None => "Any year".to_string(),
            Some(r) if r.from == r.to => r.from.to_string(),
            Some(r) => format!("{} - {}", r.from, r.to),
        }
    }

    pub fn rating_label(&self) -> String {
        if self.rating <= 0.0 {
            "Any rating".to_string()
        } else {
            format!("Rating {} {} stars", self.direction.symbol(), self.rating)
        }
    }
}

/// Tabs under the discover filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoverTab {
    #[default]
    Latest,
    BestReviewed,
    ByGenre,
}

impl DiscoverTab {
    pub fn all() -> &'static [DiscoverTab] {
        &[DiscoverTab::Latest, DiscoverTab::BestReviewed, DiscoverTab::ByGenre]
    }

    pub fn sort_mode(&self) -> SortMode {
        match self {
            DiscoverTab::Latest => SortMode::ByRecency,
            DiscoverTab::BestReviewed => SortMode::ByRatingDesc,
            DiscoverTab::ByGenre => SortMode::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiscoverTab::Latest => "Latest",
            DiscoverTab::BestReviewed => "Best Reviewed",
            DiscoverTab::ByGenre => "By Genre",
        }
    }
}

impl fmt::Display for DiscoverTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoverTab::Latest => write!(f, "latest"),
            DiscoverTab::BestReviewed => write!(f, "best-reviewed"),
            DiscoverTab::ByGenre => write!(f, "by-genre"),
        }
    }
}

impl FromStr for DiscoverTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(DiscoverTab::Latest),
            "best-reviewed" | "best" => Ok(DiscoverTab::BestReviewed),
            "by-genre" | "genre" => Ok(DiscoverTab::ByGenre),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// Everything the discover page renders for one state of the filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoverPage {
    pub tab: DiscoverTab,
    pub criteria: FilterCriteria,
    /// Shown to anonymous visitors only
    pub featured: Vec<GameRecord>,
    /// Shown to signed-in users only
    pub recommended: Vec<Recommendation>,
    pub results: Vec<GameRecord>,
}

impl DiscoverPage {
    pub fn build(
        catalog: &Catalog,
        recommendations: &[Recommendation],
        session: &Session,
        filters: &DiscoverFilters,
        tab: DiscoverTab,
    ) -> Self {
        let criteria = filters.criteria();
        let results = apply_sort(apply_filters(catalog.games(), &criteria), tab.sort_mode());

        let (featured, recommended) = if session.is_signed_in() {
            let picks = recommendations.iter().take(RECOMMENDED_LIMIT).cloned().collect();
            (Vec::new(), picks)
        } else {
            let featured = catalog.games().iter().take(FEATURED_LIMIT).cloned().collect();
            (featured, Vec::new())
        };

        tracing::debug!(
            %tab,
            signed_in = session.is_signed_in(),
            catalog = catalog.len(),
            results = results.len(),
            "Built discover page"
        );

        Self {
            tab,
            criteria,
            featured,
            recommended,
            results,
        }
    }
}
