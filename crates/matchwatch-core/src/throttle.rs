//! Cooldown for "summoner not found" alerts

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct NotFoundThrottle {
    cooldown: TimeDelta,
    last_notified: HashMap<String, DateTime<Utc>>,
}

impl NotFoundThrottle {
    pub fn new(cooldown: TimeDelta) -> Self {
        Self {
            cooldown,
            last_notified: HashMap::new(),
        }
    }

    /// `true` when no alert was sent for `player` within the cooldown.
    /// A `true` answer marks `now` as the last alert.
    pub fn should_notify(&mut self, player: &str, now: DateTime<Utc>) -> bool {
        let allowed = self
            .last_notified
            .get(player)
            .is_none_or(|last| now.signed_duration_since(*last) >= self.cooldown);

        if allowed {
            self.last_notified.insert(player.to_string(), now);
        }
        allowed
    }

    /// Forget entries whose cooldown has run out. Returns how many were dropped.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.last_notified.len();
        let cooldown = self.cooldown;
        self.last_notified
            .retain(|_, last| now.signed_duration_since(*last) < cooldown);
        before - self.last_notified.len()
    }

    pub fn len(&self) -> usize {
        self.last_notified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_notified.is_empty()
    }
}
