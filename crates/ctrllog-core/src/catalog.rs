//! Game catalog model
//!
//! A catalog is a materialized list of game records plus the genre
//! descriptors shown in the discover filters. It is supplied once per view,
//! either from the built-in sample data or from a JSON file with the same
//! shape as [`Catalog`]'s serde representation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::rating::MAX_RATING;

/// Closed set of genre identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Rpg,
    Action,
    Adventure,
    Racing,
    Horror,
    Platformer,
    Fighting,
}

impl Genre {
    pub fn all() -> &'static [Genre] {
        &[
            Genre::Rpg,
            Genre::Action,
            Genre::Adventure,
            Genre::Racing,
            Genre::Horror,
            Genre::Platformer,
            Genre::Fighting,
        ]
    }

    /// Stable identifier used in JSON and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Genre::Rpg => "rpg",
            Genre::Action => "action",
            Genre::Adventure => "adventure",
            Genre::Racing => "racing",
            Genre::Horror => "horror",
            Genre::Platformer => "platformer",
            Genre::Fighting => "fighting",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Rpg => "RPG",
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Racing => "Racing",
            Genre::Horror => "Horror",
            Genre::Platformer => "Platformer",
            Genre::Fighting => "Fighting",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Genre {
    type Err = Error;

    /// Accepts either the id or the label, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Genre::all()
            .iter()
            .copied()
            .find(|g| g.id().eq_ignore_ascii_case(needle) || g.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::UnknownGenre(s.to_string()))
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u32,
    pub title: String,
    pub genre: Genre,
    pub release_year: i32,
    /// Average community rating in [0, 5]
    pub rating: f64,
    /// Opaque artwork reference, never interpreted here
    #[serde(default)]
    pub image_ref: String,
}

impl GameRecord {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        genre: Genre,
        release_year: i32,
        rating: f64,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genre,
            release_year,
            rating,
            image_ref: image_ref.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidRecord {
                id: self.id,
                reason: "title is empty".to_string(),
            });
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(Error::InvalidRecord {
                id: self.id,
                reason: format!("rating {} is outside 0-{}", self.rating, MAX_RATING),
            });
        }
        Ok(())
    }
}

/// Genre shown in the filter UI. `member_count` is a static label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDescriptor {
    pub id: Genre,
    pub display_name: String,
    #[serde(default)]
    pub member_count: u32,
}

impl GenreDescriptor {
    pub fn new(id: Genre, member_count: u32) -> Self {
        Self {
            id,
            display_name: id.label().to_string(),
            member_count,
        }
    }
}

/// A personalized pick shown to signed-in users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub game: GameRecord,
    pub reason: String,
}

/// Validated, read-only collection of games and genre descriptors.
/// Deserialization goes through [`Catalog::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    games: Vec<GameRecord>,
    genres: Vec<GenreDescriptor>,
}

/// Unchecked wire shape of a catalog file
#[derive(Deserialize)]
struct RawCatalog {
    games: Vec<GameRecord>,
    #[serde(default)]
    genres: Vec<GenreDescriptor>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = Error;

    fn try_from(raw: RawCatalog) -> Result<Self> {
        Catalog::new(raw.games, raw.genres)
    }
}

impl Catalog {
    /// Build a catalog, checking record invariants and id uniqueness.
    /// An empty genre list is replaced by one descriptor per known genre.
    pub fn new(games: Vec<GameRecord>, genres: Vec<GenreDescriptor>) -> Result<Self> {
        let mut seen_ids = HashSet::with_capacity(games.len());
        for game in &games {
            game.validate()?;
            if !seen_ids.insert(game.id) {
                return Err(Error::DuplicateId(game.id));
            }
        }

        let genres = if genres.is_empty() {
            Genre::all().iter().map(|g| GenreDescriptor::new(*g, 0)).collect()
        } else {
            let mut seen_genres = HashSet::with_capacity(genres.len());
            for descriptor in &genres {
                if !seen_genres.insert(descriptor.id) {
                    return Err(Error::DuplicateGenre(descriptor.id.id().to_string()));
                }
            }
            genres
        };

        Ok(Self { games, genres })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            games = catalog.games.len(),
            genres = catalog.genres.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn genres(&self) -> &[GenreDescriptor] {
        &self.genres
    }

    pub fn genre(&self, id: Genre) -> Option<&GenreDescriptor> {
        self.genres.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Built-in discover catalog used when no catalog file is configured
    pub fn sample() -> Self {
        let games = vec![
            GameRecord::new(1, "Cyberpunk 2077", Genre::Rpg, 2020, 4.2, "game-1.jpg"),
            GameRecord::new(2, "Elden Ring", Genre::Rpg, 2022, 4.8, "game-2.jpg"),
            GameRecord::new(3, "Gran Turismo 7", Genre::Racing, 2022, 4.1, "game-3.jpg"),
            GameRecord::new(4, "Horizon Forbidden West", Genre::Action, 2022, 4.6, "game-1.jpg"),
            GameRecord::new(5, "God of War Ragnarök", Genre::Action, 2022, 4.9, "game-2.jpg"),
            GameRecord::new(6, "The Last of Us Part I", Genre::Action, 2022, 4.3, "game-3.jpg"),
            GameRecord::new(7, "Spider-Man 2", Genre::Action, 2023, 4.7, "game-1.jpg"),
            GameRecord::new(8, "Baldur's Gate 3", Genre::Rpg, 2023, 4.9, "game-2.jpg"),
            GameRecord::new(9, "Starfield", Genre::Rpg, 2023, 4.0, "game-3.jpg"),
            GameRecord::new(10, "Alan Wake 2", Genre::Horror, 2023, 4.4, "game-1.jpg"),
            GameRecord::new(
                11,
                "The Legend of Zelda: Tears of the Kingdom",
                Genre::Adventure,
                2023,
                4.9,
                "game-2.jpg",
            ),
            GameRecord::new(
                12,
                "Super Mario Bros. Wonder",
                Genre::Platformer,
                2023,
                4.8,
                "game-3.jpg",
            ),
            GameRecord::new(
                13,
                "Metroid Prime Remastered",
                Genre::Adventure,
                2023,
                4.7,
                "game-1.jpg",
            ),
        ];

        let genres = vec![
            GenreDescriptor::new(Genre::Rpg, 45),
            GenreDescriptor::new(Genre::Action, 38),
            GenreDescriptor::new(Genre::Adventure, 22),
            GenreDescriptor::new(Genre::Racing, 15),
            GenreDescriptor::new(Genre::Horror, 12),
            GenreDescriptor::new(Genre::Platformer, 8),
            GenreDescriptor::new(Genre::Fighting, 10),
        ];

        Self { games, genres }
    }
}

/// Built-in personalized picks for signed-in users
pub fn sample_recommendations() -> Vec<Recommendation> {
    let pick = |game: GameRecord, reason: &str| Recommendation {
        game,
        reason: reason.to_string(),
    };

    vec![
        pick(
            GameRecord::new(14, "Final Fantasy XVI", Genre::Rpg, 2023, 4.5, "game-2.jpg"),
            "Featured: Epic fantasy adventure",
        ),
        pick(
            GameRecord::new(15, "Diablo IV", Genre::Rpg, 2023, 4.2, "game-3.jpg"),
            "Similar to games you've rated highly",
        ),
        pick(
            GameRecord::new(16, "Street Fighter 6", Genre::Fighting, 2023, 4.6, "game-1.jpg"),
            "Trending in your network",
        ),
        pick(
            GameRecord::new(17, "The Witcher 3", Genre::Rpg, 2015, 4.9, "game-2.jpg"),
            "Featured: Community favorite",
        ),
        pick(
            GameRecord::new(18, "Red Dead Redemption 2", Genre::Action, 2018, 4.7, "game-3.jpg"),
            "Based on your adventure preferences",
        ),
        pick(
            GameRecord::new(19, "Cyberpunk 2077", Genre::Rpg, 2020, 4.2, "game-1.jpg"),
            "Futuristic RPG experience",
        ),
    ]
}
