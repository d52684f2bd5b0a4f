//! Single-writer owner of the progress snapshot.

use std::sync::{PoisonError, RwLock};

use tokio::sync::broadcast;
use tracing::warn;

use crate::progress::codec;
use crate::progress::state::ProgressSnapshot;
use crate::rank::Rank;
use crate::storage::KeyValueStore;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Broadcast to subscribers after every mutation. The engine assumes
/// nothing about who listens; a UI layer may subscribe or poll.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub total_points: u64,
    pub generation: u64,
}

struct Inner {
    snapshot: ProgressSnapshot,
    generation: u64,
}

/// Single source of truth for persisted user state.
///
/// All mutations funnel through [`mutate`](Self::mutate), which serializes
/// writers behind one lock, bumps the generation counter, persists, and
/// notifies. Readers observe a consistent snapshot; no mutation is ever
/// interleaved mid-read.
pub struct ProgressStore {
    inner: RwLock<Inner>,
    kv: Box<dyn KeyValueStore>,
    events: broadcast::Sender<ProgressEvent>,
}

impl ProgressStore {
    /// Load persisted progress, or start empty on first run.
    pub fn load(kv: Box<dyn KeyValueStore>) -> Self {
        let snapshot = codec::load_snapshot(kv.as_ref());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: RwLock::new(Inner {
                snapshot,
                generation: 0,
            }),
            kv,
            events,
        }
    }

    /// Run a mutation under the write lock, then persist and notify.
    ///
    /// Persistence is best-effort: a failed write is logged and the
    /// in-memory state stays authoritative for the session.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut ProgressSnapshot) -> R) -> R {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut inner.snapshot);
        inner.generation += 1;

        if let Err(e) = codec::persist_snapshot(&inner.snapshot, self.kv.as_ref()) {
            warn!(error = %e, "progress write failed; keeping in-memory state");
        }

        let event = ProgressEvent {
            total_points: inner.snapshot.total_points,
            generation: inner.generation,
        };
        drop(inner);
        let _ = self.events.send(event);
        result
    }

    /// Run a read-only closure against a consistent snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&ProgressSnapshot) -> R) -> R {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&inner.snapshot)
    }

    /// Clone the current snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.read(|s| s.clone())
    }

    /// Snapshot plus the generation that produced it, read atomically.
    pub fn versioned_snapshot(&self) -> (u64, ProgressSnapshot) {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        (inner.generation, inner.snapshot.clone())
    }

    /// Monotonic counter bumped by every mutation. Cache validity token.
    pub fn generation(&self) -> u64 {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.generation
    }

    pub fn total_points(&self) -> u64 {
        self.read(|s| s.total_points)
    }

    /// Current rank for the point total.
    pub fn rank(&self) -> Rank {
        Rank::for_points(self.total_points())
    }

    pub fn has_scholar_badge(&self, sub_location_id: &str) -> bool {
        self.read(|s| s.has_scholar_badge(sub_location_id))
    }

    pub fn has_explorer_badge(&self, site_id: &str) -> bool {
        self.read(|s| s.has_explorer_badge(site_id))
    }

    pub fn is_favorite(&self, site_id: &str) -> bool {
        self.read(|s| s.is_favorite(site_id))
    }

    /// Subscribe to mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.events.subscribe()
    }

    /// Clear all progress unconditionally.
    pub fn reset(&self) {
        self.mutate(|s| *s = ProgressSnapshot::default());
    }
}
