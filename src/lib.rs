//! CityKeys - Progress & Rewards Engine
//!
//! The gamification core of a city exploration app: users earn knowledge
//! keys (scholar badges) by consuming a sub-location's story content and
//! discovery keys (explorer badges) by physically visiting sites, either
//! geolocation-verified or self-reported. Points accumulate into ranks, and
//! a static achievement catalog is re-evaluated after every mutation.
//!
//! Presentation, content ingestion, and image handling live in the host
//! app; this crate only consumes their narrow interfaces ([`SiteCatalog`],
//! [`PositionSource`], [`KeyValueStore`]).

pub mod achievements;
pub mod badges;
pub mod constants;
pub mod geo;
pub mod location;
pub mod progress;
pub mod rank;
pub mod sites;
pub mod storage;

pub use achievements::{
    AchievementCategory, AchievementDef, AchievementEngine, AchievementProgress,
    AchievementRequirement,
};
pub use badges::{BadgeEngine, VisitResult};
pub use location::{FixSlot, LocationAuthorization, LocationPort, PositionFix, PositionSource};
pub use progress::{ProgressEvent, ProgressSnapshot, ProgressStore};
pub use rank::Rank;
pub use sites::{Coordinate, Site, SiteCatalog, StaticCatalog};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
