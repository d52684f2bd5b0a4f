// Point awards
pub const SCHOLAR_BADGE_POINTS: u64 = 1;
pub const VERIFIED_VISIT_POINTS: u64 = 50;
pub const SELF_REPORTED_VISIT_POINTS: u64 = 30;
pub const VISIT_UPGRADE_POINTS: u64 = 20;
pub const PLACE_DISCOVERY_POINTS: u64 = 1;
pub const CORRECT_QUIZ_POINTS: u64 = 10;

// Visit verification constants
pub const VISIT_RADIUS_METERS: f64 = 200.0;
pub const SECS_PER_DAY: i64 = 24 * 60 * 60;
pub const REVISIT_COOLDOWN_SECS: i64 = 30 * SECS_PER_DAY;
pub const DISCOVERY_COOLDOWN_SECS: i64 = 30 * SECS_PER_DAY;

// Position freshness bounds for reusing a cached fix
pub const FRESH_FIX_MAX_AGE_SECS: i64 = 30;
pub const FRESH_FIX_MAX_ACCURACY_METERS: f64 = 100.0;
