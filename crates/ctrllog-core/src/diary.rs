//! Gaming diary entries (the "log a game" form)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::rating::is_half_step;

pub const PLATFORMS: &[&str] = &[
    "PC (Steam)",
    "PC (Epic)",
    "PC (GOG)",
    "PC (Other)",
    "PlayStation 5",
    "PlayStation 4",
    "PlayStation 3",
    "Xbox Series X/S",
    "Xbox One",
    "Xbox 360",
    "Nintendo Switch",
    "Nintendo 3DS",
    "Mobile (iOS)",
    "Mobile (Android)",
    "Other",
];

/// Quick-add suggestions under the tag input
pub const COMMON_TAGS: &[&str] = &[
    "multiplayer",
    "singleplayer",
    "co-op",
    "pvp",
    "indie",
    "aaa",
    "retro",
    "pixel-art",
    "rpg",
    "fps",
    "strategy",
    "puzzle",
    "soulslike",
    "roguelike",
    "open-world",
    "linear",
    "story-rich",
    "action",
    "adventure",
    "simulation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStatus {
    Completed,
    Playing,
    Dropped,
    WantToPlay,
}

impl PlayStatus {
    pub fn all() -> &'static [PlayStatus] {
        &[
            PlayStatus::Completed,
            PlayStatus::Playing,
            PlayStatus::Dropped,
            PlayStatus::WantToPlay,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            PlayStatus::Completed => "completed",
            PlayStatus::Playing => "playing",
            PlayStatus::Dropped => "dropped",
            PlayStatus::WantToPlay => "want_to_play",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayStatus::Completed => "Completed",
            PlayStatus::Playing => "Playing",
            PlayStatus::Dropped => "Dropped",
            PlayStatus::WantToPlay => "Want to Play",
        }
    }
}

impl fmt::Display for PlayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PlayStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        PlayStatus::all()
            .iter()
            .copied()
            .find(|status| status.id() == normalized)
            .ok_or_else(|| Error::InvalidEntry(format!("unknown status '{}'", s)))
    }
}

/// Ordered tags without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the tag was blank or already present
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = TagList::new();
        for tag in iter {
            tags.add(tag.as_ref());
        }
        tags
    }
}

/// Form state before submission; every field may still be missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogEntryDraft {
    pub game_title: String,
    pub platform: Option<String>,
    pub status: Option<PlayStatus>,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub hours_played: Option<f64>,
    /// 0 means unrated
    pub rating: f64,
    pub review: String,
    pub tags: TagList,
}

impl LogEntryDraft {
    /// Mirrors the submit button's enabled state
    pub fn can_submit(&self) -> bool {
        !self.game_title.trim().is_empty()
            && self.platform.as_deref().is_some_and(|p| !p.trim().is_empty())
            && self.status.is_some()
    }

    pub fn submit(self) -> Result<LogEntry> {
        let game_title = self.game_title.trim().to_string();
        if game_title.is_empty() {
            return Err(Error::InvalidEntry("game title is required".to_string()));
        }

        let platform = self
            .platform
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::InvalidEntry("platform is required".to_string()))?;

        let status = self
            .status
            .ok_or_else(|| Error::InvalidEntry("status is required".to_string()))?;

        if let Some(hours) = self.hours_played {
            if !hours.is_finite() || hours < 0.0 || (hours * 2.0).fract() != 0.0 {
                return Err(Error::InvalidEntry(format!(
                    "hours played must be a non-negative multiple of 0.5, got {}",
                    hours
                )));
            }
        }

        if !is_half_step(self.rating) {
            return Err(Error::InvalidEntry(format!(
                "rating must be between 0 and 5 in half stars, got {}",
                self.rating
            )));
        }

        if let (Some(start), Some(finish)) = (self.start_date, self.finish_date) {
            if finish < start {
                return Err(Error::InvalidEntry(format!(
                    "finish date {} is before start date {}",
                    finish, start
                )));
            }
        }

        let review = self.review.trim();

        Ok(LogEntry {
            game_title,
            platform,
            status,
            start_date: self.start_date,
            finish_date: self.finish_date,
            hours_played: self.hours_played,
            rating: (self.rating > 0.0).then_some(self.rating),
            review: (!review.is_empty()).then(|| review.to_string()),
            tags: self.tags,
        })
    }
}

/// A validated diary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub game_title: String,
    pub platform: String,
    pub status: PlayStatus,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub hours_played: Option<f64>,
    pub rating: Option<f64>,
    pub review: Option<String>,
    pub tags: TagList,
}

impl LogEntry {
    /// Confirmation line shown after a successful submit
    pub fn confirmation(&self) -> String {
        format!("{} has been added to your gaming diary.", self.game_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> LogEntryDraft {
        LogEntryDraft {
            game_title: "Elden Ring".to_string(),
            platform: Some("PlayStation 5".to_string()),
            status: Some(PlayStatus::Completed),
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tag_list_dedupes() {
        let mut tags = TagList::new();
        assert!(tags.add("soulslike"));
        assert!(!tags.add("soulslike"));
        assert!(!tags.add("   "));
        assert!(tags.add(" open-world "));
        assert_eq!(tags.as_slice(), &["soulslike", "open-world"]);

        assert!(tags.remove("soulslike"));
        assert!(!tags.remove("soulslike"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_tag_list_from_iter() {
        let tags: TagList = ["rpg", "rpg", "indie"].into_iter().collect();
        assert_eq!(tags.as_slice(), &["rpg", "indie"]);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("want to play".parse::<PlayStatus>().unwrap(), PlayStatus::WantToPlay);
        assert_eq!("want-to-play".parse::<PlayStatus>().unwrap(), PlayStatus::WantToPlay);
        assert_eq!("Completed".parse::<PlayStatus>().unwrap(), PlayStatus::Completed);
        assert!("abandoned".parse::<PlayStatus>().is_err());
    }

    #[test]
    fn test_submit_minimal() {
        assert!(draft().can_submit());
        let entry = draft().submit().unwrap();
        assert_eq!(entry.rating, None);
        assert_eq!(entry.review, None);
        assert_eq!(entry.confirmation(), "Elden Ring has been added to your gaming diary.");
    }

    #[test]
    fn test_submit_requires_fields() {
        let mut missing_title = draft();
        missing_title.game_title = "  ".to_string();
        assert!(!missing_title.can_submit());
        assert!(missing_title.submit().is_err());

        let mut missing_platform = draft();
        missing_platform.platform = None;
        assert!(missing_platform.submit().is_err());

        let mut missing_status = draft();
        missing_status.status = None;
        assert!(!missing_status.can_submit());
        assert!(missing_status.submit().is_err());
    }

    #[test]
    fn test_submit_validates_numbers() {
        let mut hours = draft();
        hours.hours_played = Some(-1.0);
        assert!(hours.submit().is_err());

        let mut odd_hours = draft();
        odd_hours.hours_played = Some(12.25);
        assert!(odd_hours.submit().is_err());

        let mut rating = draft();
        rating.rating = 4.3;
        assert!(rating.submit().is_err());

        let mut good = draft();
        good.hours_played = Some(103.5);
        good.rating = 4.5;
        let entry = good.submit().unwrap();
        assert_eq!(entry.rating, Some(4.5));
        assert_eq!(entry.hours_played, Some(103.5));
    }

    #[test]
    fn test_submit_checks_dates() {
        let mut backwards = draft();
        backwards.start_date = Some(date(2024, 1, 15));
        backwards.finish_date = Some(date(2024, 1, 10));
        assert!(backwards.submit().is_err());

        let mut same_day = draft();
        same_day.start_date = Some(date(2024, 1, 10));
        same_day.finish_date = Some(date(2024, 1, 10));
        assert!(same_day.submit().is_ok());
    }

    #[test]
    fn test_entry_serde() {
        let mut d = draft();
        d.tags.add("soulslike");
        d.status = Some(PlayStatus::WantToPlay);
        let entry = d.submit().unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "want_to_play");
        assert_eq!(json["tags"], serde_json::json!(["soulslike"]));
    }

    #[test]
    fn test_option_lists() {
        assert_eq!(PLATFORMS.len(), 15);
        assert_eq!(COMMON_TAGS.len(), 20);
        assert!(PLATFORMS.contains(&"Nintendo Switch"));
    }
}
