//! Rank tiers derived from cumulative points.
//!
//! Ranks are a pure function of the point total; nothing here reads or
//! writes progress state.

use serde::{Deserialize, Serialize};

/// Named rank tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Newcomer,
    Traveler,
    Explorer,
    Pathfinder,
    Legend,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 5] = [
        Rank::Newcomer,
        Rank::Traveler,
        Rank::Explorer,
        Rank::Pathfinder,
        Rank::Legend,
    ];

    /// Display name for the rank.
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Newcomer => "Newcomer",
            Rank::Traveler => "Traveler",
            Rank::Explorer => "Explorer",
            Rank::Pathfinder => "Pathfinder",
            Rank::Legend => "Legend",
        }
    }

    /// Rank for a cumulative point total.
    pub fn for_points(points: u64) -> Rank {
        match points {
            0..=50 => Rank::Newcomer,
            51..=150 => Rank::Traveler,
            151..=400 => Rank::Explorer,
            401..=900 => Rank::Pathfinder,
            _ => Rank::Legend,
        }
    }

    /// Minimum point total for this rank.
    pub fn min_points(&self) -> u64 {
        match self {
            Rank::Newcomer => 0,
            Rank::Traveler => 51,
            Rank::Explorer => 151,
            Rank::Pathfinder => 401,
            Rank::Legend => 901,
        }
    }

    /// The next rank up, or `None` for the terminal tier.
    pub fn next(&self) -> Option<Rank> {
        match self {
            Rank::Newcomer => Some(Rank::Traveler),
            Rank::Traveler => Some(Rank::Explorer),
            Rank::Explorer => Some(Rank::Pathfinder),
            Rank::Pathfinder => Some(Rank::Legend),
            Rank::Legend => None,
        }
    }

    /// Points still needed to reach the next rank, or `None` at the top.
    pub fn points_to_next(&self, points: u64) -> Option<u64> {
        self.next()
            .map(|next| next.min_points().saturating_sub(points))
    }

    /// Fraction of the way through this rank, in `[0, 1]`.
    ///
    /// The terminal tier always reports `1.0`.
    pub fn progress_fraction(&self, points: u64) -> f64 {
        let Some(next) = self.next() else {
            return 1.0;
        };
        let floor = self.min_points();
        let span = (next.min_points() - floor) as f64;
        let into = points.saturating_sub(floor) as f64;
        (into / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_for_points_boundaries() {
        assert_eq!(Rank::for_points(0), Rank::Newcomer);
        assert_eq!(Rank::for_points(50), Rank::Newcomer);
        assert_eq!(Rank::for_points(51), Rank::Traveler);
        assert_eq!(Rank::for_points(150), Rank::Traveler);
        assert_eq!(Rank::for_points(151), Rank::Explorer);
        assert_eq!(Rank::for_points(400), Rank::Explorer);
        assert_eq!(Rank::for_points(401), Rank::Pathfinder);
        assert_eq!(Rank::for_points(901), Rank::Legend);
        assert_eq!(Rank::for_points(1_000_000), Rank::Legend);
    }

    #[test]
    fn test_points_to_next_round_trip() {
        // A user with 55 points is a Traveler, 96 short of Explorer.
        let rank = Rank::for_points(55);
        assert_eq!(rank, Rank::Traveler);
        assert_eq!(rank.points_to_next(55), Some(96));
    }

    #[test]
    fn test_terminal_rank_has_no_next() {
        assert_eq!(Rank::Legend.next(), None);
        assert_eq!(Rank::Legend.points_to_next(2000), None);
        assert_eq!(Rank::Legend.progress_fraction(2000), 1.0);
    }

    #[test]
    fn test_progress_fraction_bounds() {
        assert_eq!(Rank::Newcomer.progress_fraction(0), 0.0);
        assert!(Rank::Newcomer.progress_fraction(25) > 0.0);
        assert!(Rank::Newcomer.progress_fraction(25) < 1.0);
        // Past the tier ceiling the fraction saturates rather than overflowing.
        assert_eq!(Rank::Newcomer.progress_fraction(500), 1.0);
    }

    #[test]
    fn test_all_is_ascending() {
        for pair in Rank::ALL.windows(2) {
            assert!(pair[0].min_points() < pair[1].min_points());
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
    }
}
