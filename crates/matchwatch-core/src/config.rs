//! Watcher configuration

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

const LIVE_BASE_URL: &str = "https://porofessor.gg/live";
const FRAGMENT_BASE_URL: &str = "https://porofessor.gg/partial/live-partial";

/// Backoff before the first retry; doubles on each further attempt
pub const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Upper bound for every `*_secs` setting (30 days)
const MAX_SECS: u64 = 30 * 24 * 60 * 60;
const MAX_FETCH_RETRIES: u32 = 10;

/// Routing category; each category posts to its own channel
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Streamer,
    Friend,
    Smurf,
    Troll,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Streamer,
        Category::Friend,
        Category::Smurf,
        Category::Troll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Streamer => "streamer",
            Category::Friend => "friend",
            Category::Smurf => "smurf",
            Category::Troll => "troll",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player being polled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedPlayer {
    /// Riot ID, e.g. `Name#TAG`
    pub name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub category: Category,
}

impl TrackedPlayer {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            nickname: None,
            category,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// URL path segment: the `#` of a Riot ID becomes `-`
    pub fn slug(&self) -> String {
        self.name.replace('#', "-")
    }

    /// Key used by the player's card on the live page
    pub fn card_key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn display_name(&self) -> String {
        match &self.nickname {
            Some(nickname) if !nickname.trim().is_empty() => {
                format!("{} ({})", nickname.trim(), self.name)
            }
            _ => self.name.clone(),
        }
    }
}

fn default_region() -> String {
    "jp".to_string()
}

fn default_poll_interval_secs() -> u64 {
    300
}

fn default_history_capacity() -> usize {
    2
}

fn default_history_ttl_secs() -> u64 {
    90 * 60
}

fn default_not_found_cooldown_secs() -> u64 {
    3 * 60 * 60
}

fn default_max_concurrency() -> usize {
    10
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_fetch_retries() -> u32 {
    3
}

/// Full watcher configuration, loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Status page region segment, e.g. `jp`, `euw`
    #[serde(default = "default_region")]
    pub region: String,

    pub players: Vec<TrackedPlayer>,

    /// Webhook URL per category
    #[serde(default)]
    pub channels: BTreeMap<Category, String>,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Matches remembered per player
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Age after which a remembered match is evicted
    #[serde(default = "default_history_ttl_secs")]
    pub history_ttl_secs: u64,

    /// Minimum time between two "not found" alerts for one player
    #[serde(default = "default_not_found_cooldown_secs")]
    pub not_found_cooldown_secs: u64,

    /// Player checks running at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Timeout of a single HTTP request
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Retries on server errors
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,

    /// Post a status line to every channel when a cycle starts
    #[serde(default)]
    pub announce_cycles: bool,

    /// Post failed player checks to the player's channel
    #[serde(default)]
    pub notify_errors: bool,

    /// Keep raw responses of failed or unrecognized pages on disk
    #[serde(default)]
    pub log_responses: bool,
}

impl WatchConfig {
    pub fn new(players: Vec<TrackedPlayer>, channels: BTreeMap<Category, String>) -> Self {
        Self {
            region: default_region(),
            players,
            channels,
            poll_interval_secs: default_poll_interval_secs(),
            history_capacity: default_history_capacity(),
            history_ttl_secs: default_history_ttl_secs(),
            not_found_cooldown_secs: default_not_found_cooldown_secs(),
            max_concurrency: default_max_concurrency(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            fetch_retries: default_fetch_retries(),
            announce_cycles: false,
            notify_errors: false,
            log_responses: false,
        }
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a JSON config file. Does not validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Legacy setup: a comma-separated player list and one webhook for everything.
    /// Every player is routed to `friend`.
    pub fn from_env_values(player_list: &str, webhook_url: Option<&str>) -> Self {
        let players = player_list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| TrackedPlayer::new(name, Category::Friend))
            .collect();

        let mut channels = BTreeMap::new();
        if let Some(url) = webhook_url.map(str::trim).filter(|url| !url.is_empty()) {
            for category in Category::ALL {
                channels.insert(category, url.to_string());
            }
        }

        Self::new(players, channels)
    }

    /// Build from `PLAYER_LIST` and `DISCORD_WEBHOOK_URL`
    pub fn from_env() -> Self {
        let player_list = std::env::var("PLAYER_LIST").unwrap_or_default();
        let webhook_url = std::env::var("DISCORD_WEBHOOK_URL").ok();
        Self::from_env_values(&player_list, webhook_url.as_deref())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if player.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "players",
                    reason: "player name is empty".to_string(),
                });
            }
            if !seen.insert(player.card_key()) {
                return Err(ConfigError::DuplicatePlayer(player.name.clone()));
            }
            if self.channel(player.category).is_none() {
                return Err(ConfigError::MissingChannel(player.category));
            }
        }

        if self.region.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "region",
                reason: "must not be empty".to_string(),
            });
        }

        let positive: [(&'static str, u64); 4] = [
            ("poll_interval_secs", self.poll_interval_secs),
            ("history_capacity", self.history_capacity as u64),
            ("max_concurrency", self.max_concurrency as u64),
            ("fetch_timeout_secs", self.fetch_timeout_secs),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        let bounded: [(&'static str, u64); 4] = [
            ("poll_interval_secs", self.poll_interval_secs),
            ("history_ttl_secs", self.history_ttl_secs),
            ("not_found_cooldown_secs", self.not_found_cooldown_secs),
            ("fetch_timeout_secs", self.fetch_timeout_secs),
        ];
        for (field, value) in bounded {
            if value > MAX_SECS {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be at most {} seconds", MAX_SECS),
                });
            }
        }

        if self.fetch_retries > MAX_FETCH_RETRIES {
            return Err(ConfigError::InvalidValue {
                field: "fetch_retries",
                reason: format!("must be at most {}", MAX_FETCH_RETRIES),
            });
        }

        Ok(())
    }

    pub fn player(&self, name: &str) -> Option<&TrackedPlayer> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Webhook for a category; blank entries count as missing
    pub fn channel(&self, category: Category) -> Option<&str> {
        self.channels
            .get(&category)
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }

    pub fn live_url(&self, player: &TrackedPlayer) -> String {
        format!("{}/{}/{}", LIVE_BASE_URL, self.region, player.slug())
    }

    pub fn fragment_url(&self, player: &TrackedPlayer) -> String {
        format!("{}/{}/{}", FRAGMENT_BASE_URL, self.region, player.slug())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Upper bound for one fetch including every retry and its backoff.
    /// Saturates instead of overflowing on unvalidated values.
    pub fn fetch_deadline(&self) -> Duration {
        let attempts = self.fetch_retries.saturating_add(1);
        // Past 64 doublings the backoff alone exceeds any realistic bound
        let backoff = (0..self.fetch_retries.min(64))
            .map(|attempt| RETRY_BACKOFF.saturating_mul(2u32.saturating_pow(attempt)))
            .fold(Duration::ZERO, Duration::saturating_add);
        self.fetch_timeout()
            .saturating_mul(attempts)
            .saturating_add(backoff)
    }

    pub fn history_ttl(&self) -> TimeDelta {
        seconds_delta(self.history_ttl_secs)
    }

    pub fn not_found_cooldown(&self) -> TimeDelta {
        seconds_delta(self.not_found_cooldown_secs)
    }
}

/// Seconds as a `TimeDelta`, clamped to `TimeDelta::MAX`
fn seconds_delta(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}
