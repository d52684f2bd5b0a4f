//! The owned user-progress value.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::sites::{PlaceId, QuizId, Site, SiteId, SubLocationId};

/// Record of a single achievement unlock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub unlocked_at: i64,
}

/// Everything the engine persists for one user.
///
/// Owned exclusively by [`ProgressStore`](crate::progress::ProgressStore);
/// readers receive clones and never observe a mutation mid-flight.
///
/// Invariants:
/// - `self_reported_sites ⊆ explorer_badges`
/// - `total_points` never decreases except through a full reset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total_points: u64,
    /// Knowledge keys: all story content for the sub-location consumed.
    pub scholar_badges: HashSet<SubLocationId>,
    /// Discovery keys: site visited, verified or self-reported.
    pub explorer_badges: HashSet<SiteId>,
    /// Discovery keys granted without geolocation proof. Upgradeable.
    pub self_reported_sites: HashSet<SiteId>,
    /// Unix timestamp of the last recorded visit of either kind.
    pub verified_visits: HashMap<SiteId, i64>,
    /// Unix timestamp of the last rewarded content-discovery event.
    pub discovered_places: HashMap<PlaceId, i64>,
    pub completed_quizzes: HashSet<QuizId>,
    pub unlocked_achievements: HashMap<String, UnlockRecord>,
    /// Persisted convenience only; no gameplay effect.
    pub favorite_sites: HashSet<SiteId>,
}

impl ProgressSnapshot {
    pub fn has_scholar_badge(&self, sub_location_id: &str) -> bool {
        self.scholar_badges.contains(sub_location_id)
    }

    pub fn has_explorer_badge(&self, site_id: &str) -> bool {
        self.explorer_badges.contains(site_id)
    }

    pub fn is_self_reported(&self, site_id: &str) -> bool {
        self.self_reported_sites.contains(site_id)
    }

    /// Visited with geolocation proof: badge present and not merely
    /// self-reported.
    pub fn is_fully_verified(&self, site_id: &str) -> bool {
        self.has_explorer_badge(site_id) && !self.is_self_reported(site_id)
    }

    /// Unix timestamp of the last recorded visit, if any.
    pub fn last_visit(&self, site_id: &str) -> Option<i64> {
        self.verified_visits.get(site_id).copied()
    }

    pub fn is_achievement_unlocked(&self, id: &str) -> bool {
        self.unlocked_achievements.contains_key(id)
    }

    pub fn is_favorite(&self, site_id: &str) -> bool {
        self.favorite_sites.contains(site_id)
    }

    /// A site counts as fully completed once it carries a discovery key and
    /// every sub-location carries its knowledge key.
    pub fn is_site_completed(&self, site: &Site) -> bool {
        self.has_explorer_badge(&site.id)
            && site
                .sub_locations
                .iter()
                .all(|sub| self.scholar_badges.contains(sub))
    }

    pub fn credit(&mut self, points: u64) {
        self.total_points += points;
    }
}
