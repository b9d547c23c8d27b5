//! Bounded in-memory round store.
//!
//! Rounds are kept in insertion order. Once the store holds more than its
//! capacity the oldest surviving round is evicted. An optional TTL makes rounds
//! older than the limit invisible; they are purged on the next access.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use super::{GameError, Round};

struct StoredRound {
    round: Round,
    created_at: Instant,
}

#[derive(Default)]
struct StoreInner {
    rounds: HashMap<String, StoredRound>,
    /// Round ids, oldest first.
    order: VecDeque<String>,
}

impl StoreInner {
    fn remove(&mut self, round_id: &str) -> Option<StoredRound> {
        let stored = self.rounds.remove(round_id)?;
        self.order.retain(|id| id != round_id);
        Some(stored)
    }

    fn purge_expired(&mut self, ttl: Option<Duration>) {
        let Some(ttl) = ttl else {
            return;
        };
        // Insertion order is creation order, so expired rounds sit at the front.
        while let Some(oldest) = self.order.front() {
            let expired = self
                .rounds
                .get(oldest)
                .map_or(true, |stored| stored.created_at.elapsed() >= ttl);
            if !expired {
                break;
            }
            if let Some(id) = self.order.pop_front() {
                self.rounds.remove(&id);
                debug!(round_id = %id, "Round expired");
            }
        }
    }
}

/// Process-wide mapping from round id to round, shared by every request.
pub struct RoundStore {
    inner: Mutex<StoreInner>,
    capacity: usize,
    ttl: Option<Duration>,
}

impl RoundStore {
    /// Create a store holding at most `capacity` rounds.
    #[must_use]
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // No invariant spans a panic inside the critical sections.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a round, evicting the oldest ones if over capacity.
    ///
    /// Returns the ids of evicted rounds.
    pub fn insert(&self, round_id: String, round: Round) -> Vec<String> {
        let mut inner = self.lock();
        inner.purge_expired(self.ttl);

        if inner.remove(&round_id).is_some() {
            debug!(round_id = %round_id, "Replacing existing round");
        }
        inner.order.push_back(round_id.clone());
        inner.rounds.insert(
            round_id,
            StoredRound {
                round,
                created_at: Instant::now(),
            },
        );

        let mut evicted = Vec::new();
        while inner.rounds.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            if inner.rounds.remove(&oldest).is_some() {
                debug!(round_id = %oldest, "Evicted oldest round");
                evicted.push(oldest);
            }
        }
        evicted
    }

    /// Evaluate a round and consume it on success.
    ///
    /// `evaluate` runs while the store is locked, so two concurrent
    /// submissions for the same round cannot both succeed. When `evaluate`
    /// fails the round stays active.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoundNotFound`] if the round is absent or expired,
    /// or whatever `evaluate` returns.
    pub fn consume<T>(
        &self,
        round_id: &str,
        evaluate: impl FnOnce(&Round) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut inner = self.lock();
        inner.purge_expired(self.ttl);

        let stored = inner.rounds.get(round_id).ok_or(GameError::RoundNotFound)?;
        let outcome = evaluate(&stored.round)?;
        inner.remove(round_id);
        Ok(outcome)
    }

    /// Whether a round is currently active.
    pub fn contains(&self, round_id: &str) -> bool {
        let mut inner = self.lock();
        inner.purge_expired(self.ttl);
        inner.rounds.contains_key(round_id)
    }

    /// Number of active rounds.
    pub fn len(&self) -> usize {
        let mut inner = self.lock();
        inner.purge_expired(self.ttl);
        inner.rounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
