//! Achievement types.

use serde::{Deserialize, Serialize};

/// Achievement grouping for the browser UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Exploration,
    Knowledge,
    Mastery,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 3] = [
        AchievementCategory::Exploration,
        AchievementCategory::Knowledge,
        AchievementCategory::Mastery,
    ];

    /// Display name for the category.
    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Exploration => "Exploration",
            AchievementCategory::Knowledge => "Knowledge",
            AchievementCategory::Mastery => "Mastery",
        }
    }
}

/// What it takes to unlock an achievement.
///
/// Counter variants compare one progress set against a threshold; the
/// remaining variants are catalog-wide predicates evaluated over every
/// site the content provider currently exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementRequirement {
    /// At least this many knowledge keys.
    ScholarBadges(u64),
    /// At least this many quizzes answered correctly.
    CompletedQuizzes(u64),
    /// At least this many fully completed sites.
    CompletedSites(u64),
    /// Every site in the catalog fully completed.
    AllSitesCompleted,
    /// Every site of at least one city fully completed.
    AnyCityCompleted,
    /// Every site of at least one era fully completed.
    AnyEraCompleted,
}

/// Static definition of an achievement. Ids are string-stable across
/// releases; persisted unlock records key on them.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub requirement: AchievementRequirement,
    pub reward_points: u64,
}

/// Progress toward a single achievement, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub current: u64,
    pub target: u64,
}

impl AchievementProgress {
    /// Completion fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.target == 0 {
            return 0.0;
        }
        (self.current as f64 / self.target as f64).min(1.0)
    }

    pub fn is_met(&self) -> bool {
        self.target > 0 && self.current >= self.target
    }
}
