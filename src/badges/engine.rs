//! Badge awards: knowledge keys, discovery keys, and the point rules
//! around them.

use std::sync::Arc;

use chrono::Utc;

use crate::achievements::AchievementEngine;
use crate::constants::{
    CORRECT_QUIZ_POINTS, DISCOVERY_COOLDOWN_SECS, PLACE_DISCOVERY_POINTS, REVISIT_COOLDOWN_SECS,
    SCHOLAR_BADGE_POINTS, SECS_PER_DAY, SELF_REPORTED_VISIT_POINTS, VERIFIED_VISIT_POINTS,
    VISIT_RADIUS_METERS, VISIT_UPGRADE_POINTS,
};
use crate::geo;
use crate::location::PositionFix;
use crate::progress::{ProgressSnapshot, ProgressStore};
use crate::sites::Site;

use super::types::VisitResult;

/// Applies the visit and reading-completion rules.
///
/// Every award runs as one store mutation, so the badge insert and its
/// point credit move together; any award then triggers achievement
/// re-evaluation. Rejected attempts (cooldown, distance, missing position)
/// only read.
pub struct BadgeEngine {
    store: Arc<ProgressStore>,
    achievements: Arc<AchievementEngine>,
}

impl BadgeEngine {
    pub fn new(store: Arc<ProgressStore>, achievements: Arc<AchievementEngine>) -> Self {
        Self {
            store,
            achievements,
        }
    }

    /// Award the knowledge key for a sub-location. Idempotent: the first
    /// call inserts and credits, every later call is a no-op.
    pub fn award_scholar_badge(&self, sub_location_id: &str) -> bool {
        if self.store.has_scholar_badge(sub_location_id) {
            return false;
        }
        let awarded = self.store.mutate(|s| {
            if s.has_scholar_badge(sub_location_id) {
                return false;
            }
            s.scholar_badges.insert(sub_location_id.to_string());
            s.credit(SCHOLAR_BADGE_POINTS);
            true
        });
        if awarded {
            self.achievements.evaluate();
        }
        awarded
    }

    /// Record a geolocation-verified visit.
    pub fn verify_visit(&self, site: &Site, position: Option<&PositionFix>) -> VisitResult {
        self.verify_visit_at(site, position, Utc::now().timestamp())
    }

    /// [`verify_visit`](Self::verify_visit) with an explicit clock, for
    /// cooldown arithmetic in tests.
    pub fn verify_visit_at(
        &self,
        site: &Site,
        position: Option<&PositionFix>,
        now: i64,
    ) -> VisitResult {
        if let Some(blocked) = self.store.read(|s| Self::cooldown_check(s, site, now)) {
            return blocked;
        }
        let Some(fix) = position else {
            return VisitResult::NoLocation;
        };
        let distance_m = geo::distance_meters(&fix.coordinate, &site.coordinate);
        if distance_m > VISIT_RADIUS_METERS {
            return VisitResult::TooFar {
                distance_km: distance_m / 1000.0,
            };
        }

        let result = self.store.mutate(|s| {
            // State may have moved since the read above.
            if let Some(blocked) = Self::cooldown_check(s, site, now) {
                return blocked;
            }
            s.verified_visits.insert(site.id.clone(), now);
            if s.is_self_reported(&site.id) {
                s.self_reported_sites.remove(&site.id);
                s.credit(VISIT_UPGRADE_POINTS);
                VisitResult::Upgraded
            } else {
                s.explorer_badges.insert(site.id.clone());
                s.credit(VERIFIED_VISIT_POINTS);
                VisitResult::Verified
            }
        });
        if result.recorded_visit() {
            self.achievements.evaluate();
        }
        result
    }

    /// Record a visit without geolocation proof.
    pub fn self_report_visit(&self, site: &Site) -> VisitResult {
        self.self_report_visit_at(site, Utc::now().timestamp())
    }

    /// [`self_report_visit`](Self::self_report_visit) with an explicit clock.
    pub fn self_report_visit_at(&self, site: &Site, now: i64) -> VisitResult {
        let rejected = self.store.read(|s| Self::self_report_check(s, site, now));
        if let Some(rejection) = rejected {
            return rejection;
        }

        let result = self.store.mutate(|s| {
            if let Some(rejection) = Self::self_report_check(s, site, now) {
                return rejection;
            }
            s.explorer_badges.insert(site.id.clone());
            s.self_reported_sites.insert(site.id.clone());
            s.verified_visits.insert(site.id.clone(), now);
            s.credit(SELF_REPORTED_VISIT_POINTS);
            VisitResult::SelfReported
        });
        if result.recorded_visit() {
            self.achievements.evaluate();
        }
        result
    }

    /// Content-discovery reward: +1 point when a place is first discovered
    /// or rediscovered after the 30-day cooldown.
    pub fn discover_place(&self, place_id: &str) -> bool {
        self.discover_place_at(place_id, Utc::now().timestamp())
    }

    pub fn discover_place_at(&self, place_id: &str, now: i64) -> bool {
        if !self.store.read(|s| Self::discovery_due(s, place_id, now)) {
            return false;
        }
        let awarded = self.store.mutate(|s| {
            if !Self::discovery_due(s, place_id, now) {
                return false;
            }
            s.discovered_places.insert(place_id.to_string(), now);
            s.credit(PLACE_DISCOVERY_POINTS);
            true
        });
        if awarded {
            self.achievements.evaluate();
        }
        awarded
    }

    /// Credit a correctly answered quiz. Idempotent per quiz id.
    pub fn record_correct_quiz(&self, quiz_id: &str) -> bool {
        if self.store.read(|s| s.completed_quizzes.contains(quiz_id)) {
            return false;
        }
        let awarded = self.store.mutate(|s| {
            if s.completed_quizzes.contains(quiz_id) {
                return false;
            }
            s.completed_quizzes.insert(quiz_id.to_string());
            s.credit(CORRECT_QUIZ_POINTS);
            true
        });
        if awarded {
            self.achievements.evaluate();
        }
        awarded
    }

    /// Toggle a site's favorite flag. Persisted convenience only: no
    /// points, no achievement evaluation. Returns the new membership.
    pub fn toggle_favorite(&self, site_id: &str) -> bool {
        self.store.mutate(|s| {
            if s.favorite_sites.remove(site_id) {
                false
            } else {
                s.favorite_sites.insert(site_id.to_string());
                true
            }
        })
    }

    /// `Blocked` when the site is fully verified and its last visit is
    /// still inside the revisit cooldown.
    fn cooldown_check(s: &ProgressSnapshot, site: &Site, now: i64) -> Option<VisitResult> {
        if !s.is_fully_verified(&site.id) {
            return None;
        }
        let last = s.last_visit(&site.id)?;
        let remaining = REVISIT_COOLDOWN_SECS - (now - last);
        if remaining > 0 {
            return Some(VisitResult::Blocked {
                days_remaining: days_ceil(remaining),
            });
        }
        None
    }

    fn self_report_check(s: &ProgressSnapshot, site: &Site, now: i64) -> Option<VisitResult> {
        if s.is_self_reported(&site.id) {
            return Some(VisitResult::AlreadySelfReported);
        }
        Self::cooldown_check(s, site, now)
    }

    fn discovery_due(s: &ProgressSnapshot, place_id: &str, now: i64) -> bool {
        match s.discovered_places.get(place_id) {
            None => true,
            Some(last) => now - last >= DISCOVERY_COOLDOWN_SECS,
        }
    }
}

/// Remaining seconds rounded up to whole days, so a cooldown that just
/// started reports the full window and one about to lapse reports 1.
fn days_ceil(secs: i64) -> i64 {
    (secs + SECS_PER_DAY - 1) / SECS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_ceil() {
        assert_eq!(days_ceil(REVISIT_COOLDOWN_SECS), 30);
        assert_eq!(days_ceil(SECS_PER_DAY), 1);
        assert_eq!(days_ceil(SECS_PER_DAY + 1), 2);
        assert_eq!(days_ceil(1), 1);
    }
}
