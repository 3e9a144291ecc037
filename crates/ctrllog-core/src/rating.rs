//! Star ratings: partial-star fill and rating distributions

use serde::{Deserialize, Serialize};

pub const MAX_RATING: f64 = 5.0;
pub const STAR_COUNT: usize = 5;

/// Fractional fill of star `index` (1-based) for a rating.
///
/// `clamp(rating - (index - 1), 0, 1)`; indices outside 1..=5 are empty.
pub fn star_fill(rating: f64, index: usize) -> f64 {
    if index == 0 || index > STAR_COUNT || rating.is_nan() {
        return 0.0;
    }
    (rating - (index - 1) as f64).clamp(0.0, 1.0)
}

/// Fill fractions for all five stars
pub fn star_fills(rating: f64) -> [f64; STAR_COUNT] {
    std::array::from_fn(|i| star_fill(rating, i + 1))
}

/// True for 0, 0.5, 1, ... 5
pub fn is_half_step(rating: f64) -> bool {
    (0.0..=MAX_RATING).contains(&rating) && (rating * 2.0).fract() == 0.0
}

/// Snap a user-entered rating onto the half-star grid.
/// NaN and negatives become 0, values above the maximum become 5.
pub fn snap_to_half_star(rating: f64) -> f64 {
    if rating.is_nan() || rating <= 0.0 {
        return 0.0;
    }
    ((rating * 2.0).floor() / 2.0).min(MAX_RATING)
}

/// Number of ratings per whole star value (1..=5)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    counts: [u64; STAR_COUNT],
}

impl RatingDistribution {
    /// `counts[0]` is the number of one-star ratings
    pub fn new(counts: [u64; STAR_COUNT]) -> Self {
        Self { counts }
    }

    pub fn record(&mut self, stars: usize) {
        if (1..=STAR_COUNT).contains(&stars) {
            self.counts[stars - 1] += 1;
        }
    }

    pub fn count(&self, stars: usize) -> u64 {
        if (1..=STAR_COUNT).contains(&stars) {
            self.counts[stars - 1]
        } else {
            0
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of ratings at `stars`, in percent. Zero for an empty distribution.
    pub fn percentage(&self, stars: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(stars) as f64 / total as f64 * 100.0
    }

    pub fn average(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: u64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, count)| (i as u64 + 1) * count)
            .sum();
        Some(weighted as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_fills_half() {
        assert_eq!(star_fills(3.5), [1.0, 1.0, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_star_fills_bounds() {
        assert_eq!(star_fills(0.0), [0.0; 5]);
        assert_eq!(star_fills(5.0), [1.0; 5]);
        assert_eq!(star_fills(7.0), [1.0; 5]);
        assert_eq!(star_fills(-1.0), [0.0; 5]);
    }

    #[test]
    fn test_star_fill_fractional() {
        let fills = star_fills(4.2);
        assert_eq!(fills[3], 1.0);
        assert!((fills[4] - 0.2).abs() < 1e-9);
        assert_eq!(star_fill(4.2, 0), 0.0);
        assert_eq!(star_fill(4.2, 6), 0.0);
    }

    #[test]
    fn test_half_step() {
        assert!(is_half_step(0.0));
        assert!(is_half_step(3.5));
        assert!(is_half_step(5.0));
        assert!(!is_half_step(4.2));
        assert!(!is_half_step(5.5));
        assert!(!is_half_step(-0.5));
    }

    #[test]
    fn test_snap_to_half_star() {
        assert_eq!(snap_to_half_star(-2.0), 0.0);
        assert_eq!(snap_to_half_star(f64::NAN), 0.0);
        assert_eq!(snap_to_half_star(3.7), 3.5);
        assert_eq!(snap_to_half_star(4.0), 4.0);
        assert_eq!(snap_to_half_star(9.0), 5.0);
    }

    #[test]
    fn test_distribution() {
        let dist = RatingDistribution::new([720, 1200, 2800, 4200, 6500]);
        assert_eq!(dist.total(), 15420);
        assert_eq!(dist.count(5), 6500);
        assert_eq!(dist.count(0), 0);
        assert!((dist.percentage(5) - 42.153).abs() < 0.01);
        let avg = dist.average().unwrap();
        assert!(avg > 3.9 && avg < 4.0);
    }

    #[test]
    fn test_empty_distribution() {
        let mut dist = RatingDistribution::default();
        assert_eq!(dist.percentage(3), 0.0);
        assert_eq!(dist.average(), None);

        dist.record(4);
        dist.record(9);
        assert_eq!(dist.total(), 1);
        assert_eq!(dist.percentage(4), 100.0);
    }
}
