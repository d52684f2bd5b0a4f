//! The collaborator-implemented side of position acquisition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::constants::{FRESH_FIX_MAX_ACCURACY_METERS, FRESH_FIX_MAX_AGE_SECS};
use crate::sites::Coordinate;

/// Platform location permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationAuthorization {
    Undetermined,
    Authorized,
    Denied,
}

/// One device position measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    /// Horizontal accuracy radius in meters. Negative means the platform
    /// could not resolve an accuracy for this fix.
    pub horizontal_accuracy_m: f64,
    pub timestamp: DateTime<Utc>,
}

impl PositionFix {
    /// Whether the reported accuracy is usable for visit verification.
    pub fn is_accurate(&self) -> bool {
        self.horizontal_accuracy_m >= 0.0
            && self.horizontal_accuracy_m <= FRESH_FIX_MAX_ACCURACY_METERS
    }

    /// Whether this fix is recent and tight enough to reuse without a new
    /// platform round-trip.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.timestamp).num_seconds();
        self.is_accurate() && (0..FRESH_FIX_MAX_AGE_SECS).contains(&age)
    }
}

/// Platform positioning collaborator. Implemented outside the engine; the
/// engine only ever consumes it through [`LocationPort`](super::LocationPort).
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Current permission state.
    fn authorization(&self) -> LocationAuthorization;

    /// Last fix the platform delivered, if any.
    fn cached_fix(&self) -> Option<PositionFix>;

    /// Await one new fix. `None` means the platform gave up on this attempt.
    /// Retry policy, if any, lives behind this call, never in the engine.
    async fn next_fix(&self) -> Option<PositionFix>;
}
