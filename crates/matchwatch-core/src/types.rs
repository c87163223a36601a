//! Core types for match observation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown when a field could not be read from the page
pub const UNKNOWN: &str = "Unknown";

/// Result of classifying one fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    /// The summoner does not exist on the status page
    NotFound,
    /// The live page is still rendering; the fragment endpoint must be fetched
    Loading,
    /// The summoner is in a live game
    Active,
    /// The summoner is not in a game
    Inactive,
    /// None of the known markers matched
    Unknown,
}

/// Queue type of a live game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    RankedSoloDuo,
    RankedFlex,
    Normal,
    Aram,
    Arena,
    Custom,
    Unknown,
}

const QUEUE_LABELS: &[(&str, QueueKind)] = &[
    ("ranked solo/duo", QueueKind::RankedSoloDuo),
    ("ranked flex", QueueKind::RankedFlex),
    ("normal (quickplay)", QueueKind::Normal),
    ("aram", QueueKind::Aram),
    ("arena", QueueKind::Arena),
    ("custom game", QueueKind::Custom),
];

impl QueueKind {
    /// Map the heading text of a live page to a queue. Unmapped text is `Unknown`.
    pub fn from_heading(text: &str) -> Self {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let normalized = normalized.to_lowercase();
        QUEUE_LABELS
            .iter()
            .find(|(label, _)| *label == normalized)
            .map(|(_, kind)| *kind)
            .unwrap_or(QueueKind::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueueKind::RankedSoloDuo => "RANKED SOLO/DUO",
            QueueKind::RankedFlex => "RANKED FLEX",
            QueueKind::Normal => "NORMAL",
            QueueKind::Aram => "ARAM",
            QueueKind::Arena => "ARENA",
            QueueKind::Custom => "CUSTOM",
            QueueKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for QueueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One live game observed for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: String,
    pub player: String,
    pub queue: QueueKind,
    pub champion: String,
    pub url: String,
    pub observed_at: DateTime<Utc>,
}

/// What a single player check produced in one poll cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlayerOutcome {
    /// A match not seen before for this player
    NewMatch(MatchRecord),
    /// The match is already in the player's history
    Duplicate { player: String, match_id: String },
    /// Summoner missing and the cooldown allows an alert
    NotFound { player: String },
    /// Summoner missing but alerted recently
    NotFoundSuppressed { player: String },
    Inactive { player: String },
    Unknown { player: String },
    /// Page looked active but the match id could not be read
    ExtractionFailed { player: String, reason: String },
    /// Fetch failed or timed out
    Failed { player: String, error: String },
}

impl PlayerOutcome {
    pub fn player(&self) -> &str {
        match self {
            PlayerOutcome::NewMatch(record) => &record.player,
            PlayerOutcome::Duplicate { player, .. }
            | PlayerOutcome::NotFound { player }
            | PlayerOutcome::NotFoundSuppressed { player }
            | PlayerOutcome::Inactive { player }
            | PlayerOutcome::Unknown { player }
            | PlayerOutcome::ExtractionFailed { player, .. }
            | PlayerOutcome::Failed { player, .. } => player,
        }
    }
}
