//! Achievement evaluation, unlocking, and cached aggregates.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::debug;

use crate::progress::{ProgressSnapshot, ProgressStore, UnlockRecord};
use crate::sites::{Site, SiteCatalog};

use super::data::ALL_ACHIEVEMENTS;
use super::types::{AchievementDef, AchievementProgress, AchievementRequirement};

/// Aggregates that cost O(sites × sub-locations) to recompute. Valid only
/// for the store generation that produced them.
#[derive(Clone)]
struct CachedAggregates {
    generation: u64,
    fully_completed_sites: u64,
    next_achievement: Option<&'static AchievementDef>,
}

/// Evaluates the static catalog against current progress.
///
/// Unlocking is re-entrant safe: membership is re-checked inside the store
/// mutation, so re-running evaluation after any event never double-unlocks
/// or double-pays. Expensive aggregates are memoized against the store's
/// generation counter; every mutation bumps the counter, so a stale value
/// can never be served.
pub struct AchievementEngine {
    store: Arc<ProgressStore>,
    catalog: Arc<dyn SiteCatalog>,
    cache: Mutex<Option<CachedAggregates>>,
    pending: Mutex<Vec<&'static AchievementDef>>,
}

impl AchievementEngine {
    pub fn new(store: Arc<ProgressStore>, catalog: Arc<dyn SiteCatalog>) -> Self {
        Self {
            store,
            catalog,
            cache: Mutex::new(None),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Evaluate every locked achievement and unlock those whose requirement
    /// is met. Returns the newly unlocked definitions, which are also
    /// queued for one-shot notification.
    pub fn evaluate(&self) -> Vec<&'static AchievementDef> {
        let sites = self.catalog.sites();
        let snapshot = self.store.snapshot();

        let candidates: Vec<&'static AchievementDef> = ALL_ACHIEVEMENTS
            .iter()
            .filter(|def| !snapshot.is_achievement_unlocked(def.id))
            .filter(|def| progress_for(def, &snapshot, &sites).is_met())
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let now = Utc::now().timestamp();
        let unlocked = self.store.mutate(|s| {
            let mut newly = Vec::new();
            for def in candidates {
                // Membership re-checked at the mutation site; this is what
                // makes repeated evaluation pay each reward exactly once.
                if s.is_achievement_unlocked(def.id) {
                    continue;
                }
                if !progress_for(def, s, &sites).is_met() {
                    continue;
                }
                s.unlocked_achievements
                    .insert(def.id.to_string(), UnlockRecord { unlocked_at: now });
                s.credit(def.reward_points);
                newly.push(def);
            }
            newly
        });

        if !unlocked.is_empty() {
            debug!(count = unlocked.len(), "achievements unlocked");
            self.pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(unlocked.iter().copied());
        }
        unlocked
    }

    /// Display progress for one achievement, or `None` for an unknown id.
    pub fn progress(&self, id: &str) -> Option<AchievementProgress> {
        let def = ALL_ACHIEVEMENTS.iter().find(|def| def.id == id)?;
        let sites = self.catalog.sites();
        let snapshot = self.store.snapshot();
        Some(progress_for(def, &snapshot, &sites))
    }

    /// Unlocked achievements in catalog order.
    pub fn unlocked(&self) -> Vec<&'static AchievementDef> {
        let snapshot = self.store.snapshot();
        ALL_ACHIEVEMENTS
            .iter()
            .filter(|def| snapshot.is_achievement_unlocked(def.id))
            .collect()
    }

    /// Still-locked achievements in catalog order.
    pub fn locked(&self) -> Vec<&'static AchievementDef> {
        let snapshot = self.store.snapshot();
        ALL_ACHIEVEMENTS
            .iter()
            .filter(|def| !snapshot.is_achievement_unlocked(def.id))
            .collect()
    }

    /// Number of sites with a discovery key and every knowledge key. Served
    /// from the generation-checked cache.
    pub fn fully_completed_site_count(&self) -> u64 {
        self.aggregates().fully_completed_sites
    }

    /// The locked achievement closest to unlocking, as a display hint.
    /// Served from the generation-checked cache.
    pub fn next_achievement(&self) -> Option<&'static AchievementDef> {
        self.aggregates().next_achievement
    }

    /// Drain the one-shot unlock notifications. Each unlock is surfaced
    /// exactly once; the caller owns showing and dismissing it.
    pub fn take_just_unlocked(&self) -> Vec<&'static AchievementDef> {
        std::mem::take(
            &mut *self
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Clear all progress unconditionally, along with pending
    /// notifications and the aggregate cache.
    pub fn reset(&self) {
        self.store.reset();
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn aggregates(&self) -> CachedAggregates {
        let (generation, snapshot) = self.store.versioned_snapshot();

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.as_ref() {
            if cached.generation == generation {
                return cached.clone();
            }
        }

        let sites = self.catalog.sites();
        let fresh = CachedAggregates {
            generation,
            fully_completed_sites: completed_site_count(&snapshot, &sites),
            next_achievement: next_locked_achievement(&snapshot, &sites),
        };
        *cache = Some(fresh.clone());
        fresh
    }
}

/// `(current, target)` for one achievement against one snapshot.
fn progress_for(
    def: &AchievementDef,
    snapshot: &ProgressSnapshot,
    sites: &[Site],
) -> AchievementProgress {
    let (current, target) = match def.requirement {
        AchievementRequirement::ScholarBadges(n) => (snapshot.scholar_badges.len() as u64, n),
        AchievementRequirement::CompletedQuizzes(n) => (snapshot.completed_quizzes.len() as u64, n),
        AchievementRequirement::CompletedSites(n) => (completed_site_count(snapshot, sites), n),
        AchievementRequirement::AllSitesCompleted => (
            completed_site_count(snapshot, sites),
            // An empty catalog must not read as 100% complete.
            (sites.len() as u64).max(1),
        ),
        AchievementRequirement::AnyCityCompleted => (
            any_group_completed(snapshot, sites, |site| site.city.as_str()),
            1,
        ),
        AchievementRequirement::AnyEraCompleted => (
            any_group_completed(snapshot, sites, |site| site.era.as_str()),
            1,
        ),
    };
    AchievementProgress { current, target }
}

fn completed_site_count(snapshot: &ProgressSnapshot, sites: &[Site]) -> u64 {
    sites
        .iter()
        .filter(|site| snapshot.is_site_completed(site))
        .count() as u64
}

/// 1 if every site of at least one group is fully completed, else 0.
fn any_group_completed<'a>(
    snapshot: &ProgressSnapshot,
    sites: &'a [Site],
    key: impl Fn(&'a Site) -> &'a str,
) -> u64 {
    let mut groups: std::collections::HashMap<&str, bool> = std::collections::HashMap::new();
    for site in sites {
        let done = snapshot.is_site_completed(site);
        groups
            .entry(key(site))
            .and_modify(|all_done| *all_done &= done)
            .or_insert(done);
    }
    u64::from(groups.values().any(|&all_done| all_done))
}

/// Locked achievement with the greatest completion fraction; ties resolve
/// to catalog order.
fn next_locked_achievement(
    snapshot: &ProgressSnapshot,
    sites: &[Site],
) -> Option<&'static AchievementDef> {
    let mut best: Option<(&'static AchievementDef, f64)> = None;
    for def in ALL_ACHIEVEMENTS {
        if snapshot.is_achievement_unlocked(def.id) {
            continue;
        }
        let fraction = progress_for(def, snapshot, sites).fraction();
        match best {
            Some((_, best_fraction)) if fraction <= best_fraction => {}
            _ => best = Some((def, fraction)),
        }
    }
    best.map(|(def, _)| def)
}
