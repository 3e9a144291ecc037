//! CtrlLog Core - Game catalog, discover filters, game details, star ratings and diary entries

pub mod catalog;
pub mod detail;
pub mod diary;
pub mod discover;
pub mod error;
pub mod filter;
pub mod rating;
pub mod session;
pub mod sort;

pub use catalog::{Catalog, GameRecord, Genre, GenreDescriptor, Recommendation};
pub use detail::{GameDetail, PlayStats, Review};
pub use discover::{DiscoverFilters, DiscoverPage, DiscoverTab};
pub use error::{Error, Result};
pub use filter::{apply_filters, FilterCriteria, RatingDirection, RatingThreshold, YearRange};
pub use session::{Session, SignInIdentifier, UserProfile};
pub use sort::{apply_sort, SortMode};
