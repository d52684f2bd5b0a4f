//! Visit outcome types.

use serde::{Deserialize, Serialize};

/// Outcome of a visit attempt. Informational, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VisitResult {
    /// First-time or post-cooldown geolocation-verified visit.
    Verified,
    /// A self-reported visit upgraded with geolocation proof.
    Upgraded,
    /// Visit recorded without geolocation proof.
    SelfReported,
    /// The site already carries an unverified visit; suggest an upgrade.
    AlreadySelfReported,
    /// Fully verified within the revisit cooldown. No points.
    Blocked { days_remaining: i64 },
    /// No usable position; the caller should offer the self-report path.
    NoLocation,
    /// Outside the verification radius.
    TooFar { distance_km: f64 },
}

impl VisitResult {
    /// Whether this outcome recorded a visit (and therefore paid points).
    pub fn recorded_visit(&self) -> bool {
        matches!(
            self,
            VisitResult::Verified | VisitResult::Upgraded | VisitResult::SelfReported
        )
    }
}
