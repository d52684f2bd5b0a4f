//! Engine-side position requests with bounded wait.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::debug;

use super::source::{LocationAuthorization, PositionFix, PositionSource};

/// Wraps a [`PositionSource`] behind the request semantics the badge engine
/// relies on.
///
/// [`request_position`](Self::request_position) resolves exactly once: the
/// fix future and the timer are raced through `tokio::time::timeout`, the
/// first to complete wins, and the loser is dropped rather than invoked. A
/// caller that abandons the returned future sees no further completion.
pub struct LocationPort {
    source: Arc<dyn PositionSource>,
}

impl LocationPort {
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self { source }
    }

    /// Current permission state, for callers that gate UI on it.
    pub fn authorization(&self) -> LocationAuthorization {
        self.source.authorization()
    }

    /// Obtain a usable position within `wait`, or `None`.
    ///
    /// A cached fix that is fresh (age under 30 s) and accurate (under
    /// 100 m) is returned immediately without a platform round-trip.
    /// `None` covers denial, timeout, and unresolvable accuracy; the caller
    /// is expected to offer the self-report path in that case.
    pub async fn request_position(&self, wait: Duration) -> Option<PositionFix> {
        if self.source.authorization() == LocationAuthorization::Denied {
            return None;
        }

        if let Some(fix) = self.source.cached_fix() {
            if fix.is_fresh(Utc::now()) {
                return Some(fix);
            }
        }

        match timeout(wait, self.source.next_fix()).await {
            Ok(Some(fix)) if fix.is_accurate() => Some(fix),
            Ok(Some(_)) => {
                debug!("discarding position fix with unusable accuracy");
                None
            }
            Ok(None) => None,
            Err(_) => {
                debug!("position request timed out");
                None
            }
        }
    }
}
