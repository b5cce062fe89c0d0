//! Process-local dispatch deduplication.
//!
//! Two key spaces: notification identifiers, and `(transaction id, kind)`
//! composites for transaction-linked notifications. First sighting wins;
//! entries expire after a TTL and the key space is capacity-bounded so a
//! long-lived process cannot grow without limit. State is never persisted:
//! a restart resets deduplication, and the record store remains the
//! authority on what exists.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use peerhub_core::config::delivery::DedupConfig;
use peerhub_entity::notification::NotificationType;

/// Guard preventing the same notification (or the same transaction/type
/// pair) from being dispatched twice within one process lifetime.
#[derive(Debug)]
pub struct DedupGuard {
    ttl: Duration,
    max_entries: usize,
    seen_ids: Mutex<HashMap<Uuid, Instant>>,
    seen_transactions: Mutex<HashMap<(Uuid, NotificationType), Instant>>,
}

impl DedupGuard {
    /// Create a guard from configuration.
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.ttl_seconds),
            max_entries: config.max_entries.max(1),
            seen_ids: Mutex::new(HashMap::new()),
            seen_transactions: Mutex::new(HashMap::new()),
        }
    }

    /// Record a notification id. Returns `true` on first sighting —
    /// the membership check and insert happen under one lock, so a given
    /// id can only ever be fresh once.
    pub fn first_seen(&self, id: Uuid) -> bool {
        let mut map = self.seen_ids.lock().unwrap_or_else(|e| e.into_inner());
        Self::probe(&mut map, id, self.ttl, self.max_entries)
    }

    /// Record a `(transaction, kind)` composite. Returns `true` on first
    /// sighting.
    pub fn first_seen_transaction(&self, transaction_id: Uuid, kind: NotificationType) -> bool {
        let mut map = self
            .seen_transactions
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        Self::probe(&mut map, (transaction_id, kind), self.ttl, self.max_entries)
    }

    /// Forget everything. Tests use this to isolate cases.
    pub fn reset(&self) {
        self.seen_ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.seen_transactions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn probe<K: Eq + Hash>(
        map: &mut HashMap<K, Instant>,
        key: K,
        ttl: Duration,
        max_entries: usize,
    ) -> bool {
        let now = Instant::now();

        if let Some(seen_at) = map.get(&key) {
            if now.duration_since(*seen_at) < ttl {
                return false;
            }
        }

        if map.len() >= max_entries {
            Self::evict(map, now, ttl, max_entries);
        }

        map.insert(key, now);
        true
    }

    /// Drop expired entries; if the map is still at capacity, drop the
    /// oldest entries to make room.
    fn evict<K: Eq + Hash>(
        map: &mut HashMap<K, Instant>,
        now: Instant,
        ttl: Duration,
        max_entries: usize,
    ) {
        map.retain(|_, seen_at| now.duration_since(*seen_at) < ttl);

        if map.len() >= max_entries {
            let mut stamps: Vec<Instant> = map.values().copied().collect();
            stamps.sort_unstable();
            // Cut at the median so evictions stay amortized.
            let cutoff = stamps[stamps.len() / 2];
            map.retain(|_, seen_at| *seen_at > cutoff);
        }
    }
}
