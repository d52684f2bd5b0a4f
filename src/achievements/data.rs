//! Static achievement catalog.

use super::types::{AchievementCategory, AchievementDef, AchievementRequirement};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // EXPLORATION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: "first_discovery",
        name: "First Discovery",
        description: "Fully complete your first site",
        category: AchievementCategory::Exploration,
        requirement: AchievementRequirement::CompletedSites(1),
        reward_points: 25,
    },
    AchievementDef {
        id: "seasoned_explorer",
        name: "Seasoned Explorer",
        description: "Fully complete 5 sites",
        category: AchievementCategory::Exploration,
        requirement: AchievementRequirement::CompletedSites(5),
        reward_points: 50,
    },
    AchievementDef {
        id: "master_explorer",
        name: "Master Explorer",
        description: "Fully complete every site",
        category: AchievementCategory::Exploration,
        requirement: AchievementRequirement::AllSitesCompleted,
        reward_points: 200,
    },
    // ═══════════════════════════════════════════════════════════════
    // KNOWLEDGE
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: "curious_mind",
        name: "Curious Mind",
        description: "Earn 5 knowledge keys",
        category: AchievementCategory::Knowledge,
        requirement: AchievementRequirement::ScholarBadges(5),
        reward_points: 20,
    },
    AchievementDef {
        id: "scholar",
        name: "Scholar",
        description: "Earn 25 knowledge keys",
        category: AchievementCategory::Knowledge,
        requirement: AchievementRequirement::ScholarBadges(25),
        reward_points: 75,
    },
    AchievementDef {
        id: "quiz_whiz",
        name: "Quiz Whiz",
        description: "Answer 10 quiz questions correctly",
        category: AchievementCategory::Knowledge,
        requirement: AchievementRequirement::CompletedQuizzes(10),
        reward_points: 30,
    },
    AchievementDef {
        id: "quiz_master",
        name: "Quiz Master",
        description: "Answer 50 quiz questions correctly",
        category: AchievementCategory::Knowledge,
        requirement: AchievementRequirement::CompletedQuizzes(50),
        reward_points: 100,
    },
    // ═══════════════════════════════════════════════════════════════
    // MASTERY
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: "city_conqueror",
        name: "City Conqueror",
        description: "Fully complete every site in one city",
        category: AchievementCategory::Mastery,
        requirement: AchievementRequirement::AnyCityCompleted,
        reward_points: 100,
    },
    AchievementDef {
        id: "era_specialist",
        name: "Era Specialist",
        description: "Fully complete every site of one era",
        category: AchievementCategory::Mastery,
        requirement: AchievementRequirement::AnyEraCompleted,
        reward_points: 100,
    },
    AchievementDef {
        id: "completionist",
        name: "Completionist",
        description: "Reach 100% completion",
        category: AchievementCategory::Mastery,
        requirement: AchievementRequirement::AllSitesCompleted,
        reward_points: 300,
    },
];

/// Look up an achievement definition by its stable id.
pub fn get_achievement_def(id: &str) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|def| def.id == id)
}

/// All achievements in one category, in display order.
pub fn achievements_by_category(category: AchievementCategory) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|def| def.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let mut seen = HashSet::new();
        for def in ALL_ACHIEVEMENTS {
            assert!(seen.insert(def.id), "duplicate achievement id: {}", def.id);
        }
    }

    #[test]
    fn test_every_category_has_achievements() {
        for category in AchievementCategory::ALL {
            assert!(
                !achievements_by_category(category).is_empty(),
                "empty category: {}",
                category.name()
            );
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let def = get_achievement_def("first_discovery").unwrap();
        assert_eq!(def.name, "First Discovery");
        assert_eq!(def.reward_points, 25);
        assert!(get_achievement_def("no_such_achievement").is_none());
    }

    #[test]
    fn test_rewards_are_positive() {
        for def in ALL_ACHIEVEMENTS {
            assert!(def.reward_points > 0, "{} pays nothing", def.id);
        }
    }
}
