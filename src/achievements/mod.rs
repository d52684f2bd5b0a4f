//! Achievement catalog and evaluation.

pub mod data;
pub mod engine;
pub mod types;

pub use data::{achievements_by_category, get_achievement_def, ALL_ACHIEVEMENTS};
pub use engine::AchievementEngine;
pub use types::{
    AchievementCategory, AchievementDef, AchievementProgress, AchievementRequirement,
};
