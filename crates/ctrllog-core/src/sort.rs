//! Display ordering for filtered games

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::GameRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep catalog order
    #[default]
    None,
    /// Newest release year first
    ByRecency,
    /// Highest rating first
    ByRatingDesc,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::None => write!(f, "none"),
            SortMode::ByRecency => write!(f, "by-recency"),
            SortMode::ByRatingDesc => write!(f, "by-rating-desc"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "catalog" => Ok(SortMode::None),
            "by-recency" | "recency" | "latest" => Ok(SortMode::ByRecency),
            "by-rating-desc" | "rating" | "best-reviewed" => Ok(SortMode::ByRatingDesc),
            other => Err(format!("unknown sort mode '{}'", other)),
        }
    }
}

/// Order games for display. Both orderings are stable: ties keep their
/// incoming relative order.
pub fn apply_sort(mut games: Vec<GameRecord>, mode: SortMode) -> Vec<GameRecord> {
    match mode {
        SortMode::None => {}
        SortMode::ByRecency => games.sort_by(|a, b| b.release_year.cmp(&a.release_year)),
        SortMode::ByRatingDesc => games.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    games
}
