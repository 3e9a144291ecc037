//! Per-game detail view
//!
//! Everything the game page shows beyond the catalog record: the community
//! rating breakdown, how many players are in each play state, reviews, and a
//! row of similar games drawn from the same catalog through the filter engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, GameRecord, Genre};
use crate::filter::{apply_filters, FilterCriteria};
use crate::rating::RatingDistribution;

pub const SIMILAR_LIMIT: usize = 6;

/// How many players have the game in each diary state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayStats {
    pub playing: u64,
    pub completed: u64,
    pub dropped: u64,
    pub wishlisted: u64,
}

impl PlayStats {
    pub fn total(&self) -> u64 {
        self.playing + self.completed + self.dropped + self.wishlisted
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    /// Whole stars, 1..=5
    pub rating: u8,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub likes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDetail {
    pub game: GameRecord,
    pub developer: String,
    pub publisher: String,
    pub platforms: Vec<String>,
    pub description: String,
    pub ratings: RatingDistribution,
    pub play_stats: PlayStats,
    pub reviews: Vec<Review>,
    pub similar: Vec<GameRecord>,
}

impl GameDetail {
    /// Detail page with nothing known beyond the catalog record
    pub fn new(game: GameRecord) -> Self {
        Self {
            game,
            developer: String::new(),
            publisher: String::new(),
            platforms: Vec::new(),
            description: String::new(),
            ratings: RatingDistribution::default(),
            play_stats: PlayStats::default(),
            reviews: Vec::new(),
            similar: Vec::new(),
        }
    }

    /// Build the page for catalog game `id`, filling in the built-in detail
    /// data where there is some. `None` when the id is not in the catalog.
    pub fn lookup(catalog: &Catalog, id: u32) -> Option<Self> {
        let game = catalog.games().iter().find(|g| g.id == id)?;

        let mut detail = sample_details()
            .into_iter()
            .find(|d| d.game.id == id)
            .unwrap_or_else(|| GameDetail::new(game.clone()));
        detail.game = game.clone();
        detail.similar = similar_games(catalog.games(), game, SIMILAR_LIMIT);

        tracing::debug!(
            id,
            reviews = detail.reviews.len(),
            similar = detail.similar.len(),
            "Built game detail"
        );
        Some(detail)
    }

    /// Number of community ratings behind the distribution
    pub fn rating_count(&self) -> u64 {
        self.ratings.total()
    }

    /// Reviews with the most liked first; equal likes keep their order
    pub fn top_reviews(&self) -> Vec<&Review> {
        let mut reviews: Vec<&Review> = self.reviews.iter().collect();
        reviews.sort_by(|a, b| b.likes.cmp(&a.likes));
        reviews
    }
}

/// Games sharing `game`'s genre, in catalog order, without `game` itself
pub fn similar_games(catalog: &[GameRecord], game: &GameRecord, limit: usize) -> Vec<GameRecord> {
    let criteria = FilterCriteria::new().with_genres([game.genre]);
    apply_filters(catalog, &criteria)
        .into_iter()
        .filter(|candidate| candidate.id != game.id)
        .take(limit)
        .collect()
}

fn sample_details() -> Vec<GameDetail> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    let review = |author: &str, rating, posted, content: &str, likes| Review {
        author: author.to_string(),
        rating,
        date: posted,
        content: content.to_string(),
        likes,
    };

    let mut cyberpunk = GameDetail::new(GameRecord::new(
        1,
        "Cyberpunk 2077",
        Genre::Rpg,
        2020,
        4.2,
        "game-1.jpg",
    ));
    cyberpunk.developer = "CD Projekt RED".to_string();
    cyberpunk.publisher = "CD Projekt".to_string();
    cyberpunk.platforms = ["PC", "PS5", "Xbox Series X/S", "PS4", "Xbox One"]
        .iter()
        .map(|p| p.to_string())
        .collect();
    cyberpunk.description = "An open-world, action-adventure story set in Night City, \
        a megalopolis obsessed with power, glamour and body modification."
        .to_string();
    cyberpunk.ratings = RatingDistribution::new([720, 1200, 2800, 4200, 6500]);
    cyberpunk.play_stats = PlayStats {
        playing: 2800,
        completed: 8400,
        dropped: 1200,
        wishlisted: 3200,
    };
    cyberpunk.reviews = vec![
        review(
            "GamerPro2023",
            5,
            date(2024, 1, 15),
            "After the recent updates, this game has become a masterpiece. \
             The world-building is incredible and the story is engaging.",
            128,
        ),
        review(
            "NightCityFan",
            4,
            date(2024, 1, 10),
            "Great atmosphere and visuals. \
             Some bugs still persist but overall a solid experience.",
            89,
        ),
        review(
            "RPGLover",
            4,
            date(2024, 1, 8),
            "The RPG elements are well implemented. Character progression feels meaningful.",
            56,
        ),
    ];

    vec![cyberpunk]
}
