//! Visit and reading-completion rules.

pub mod engine;
pub mod types;

pub use engine::BadgeEngine;
pub use types::VisitResult;
