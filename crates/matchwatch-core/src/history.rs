//! Per-player memory of recently notified matches

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

use crate::types::MatchRecord;

/// Bounded, time-aware match history keyed by player name.
///
/// Invariants: match ids are unique per player, a player holds at most
/// `capacity` records, and after `evict_stale` no record is older than `ttl`.
#[derive(Debug, Clone)]
pub struct MatchHistory {
    capacity: usize,
    ttl: TimeDelta,
    entries: HashMap<String, Vec<MatchRecord>>,
}

impl MatchHistory {
    pub fn new(capacity: usize, ttl: TimeDelta) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn is_duplicate(&self, player: &str, match_id: &str) -> bool {
        self.entries
            .get(player)
            .is_some_and(|records| records.iter().any(|r| r.match_id == match_id))
    }

    /// Store a record, replacing one with the same match id, then keep the
    /// `capacity` most recent.
    pub fn record(&mut self, record: MatchRecord) {
        let records = self.entries.entry(record.player.clone()).or_default();
        records.retain(|r| r.match_id != record.match_id);
        records.push(record);

        if records.len() > self.capacity {
            records.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
            records.truncate(self.capacity);
        }
    }

    /// Duplicate check and insert in one step. Returns `true` when the match is new.
    pub fn observe(&mut self, record: MatchRecord) -> bool {
        if self.is_duplicate(&record.player, &record.match_id) {
            return false;
        }
        self.record(record);
        true
    }

    /// Drop records older than the TTL and forget players left with none.
    /// Returns the number of records removed.
    pub fn evict_stale(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.ttl;
        let mut removed = 0;

        self.entries.retain(|_, records| {
            let before = records.len();
            records.retain(|r| now.signed_duration_since(r.observed_at) <= ttl);
            removed += before - records.len();
            !records.is_empty()
        });

        removed
    }

    pub fn matches_for(&self, player: &str) -> &[MatchRecord] {
        self.entries
            .get(player)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Players with at least one remembered match
    pub fn player_count(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
