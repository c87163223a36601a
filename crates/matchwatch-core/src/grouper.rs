//! Turns one cycle's outcomes into one outbound message per category

use chrono::{DateTime, Local, Utc};
use std::collections::BTreeMap;
use tracing::warn;

use crate::config::{Category, TrackedPlayer, WatchConfig};
use crate::types::{MatchRecord, PlayerOutcome};

const PAIR_SEPARATOR: &str = " / ";
const SECTION_SEPARATOR: &str = "\n\n";

/// Everything one category receives at the end of a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub category: Category,
    pub content: String,
    /// Number of alert blocks joined into `content`
    pub sections: usize,
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Status line posted at the start of a cycle
pub fn render_status(now: DateTime<Utc>, players: usize) -> String {
    format!(
        "> **Watcher Status**\n> {}\n> Checking {} player(s).",
        format_timestamp(now),
        players
    )
}

/// Group outcomes by match id, split every group by category and batch the
/// rendered blocks per category.
///
/// Players sharing a match id land in the same block of their category.
/// Not-found players get one block per category. Failed checks are only
/// reported when `include_failures` is set. Everything else produces nothing.
pub fn build_dispatches(
    outcomes: &[PlayerOutcome],
    config: &WatchConfig,
    now: DateTime<Utc>,
    include_failures: bool,
) -> Vec<Dispatch> {
    let mut match_groups: BTreeMap<&str, Vec<&MatchRecord>> = BTreeMap::new();
    let mut not_found: BTreeMap<Category, Vec<&TrackedPlayer>> = BTreeMap::new();
    let mut failures: BTreeMap<Category, Vec<(&TrackedPlayer, &str)>> = BTreeMap::new();

    for outcome in outcomes {
        let Some(player) = config.player(outcome.player()) else {
            warn!(player = outcome.player(), "Outcome for untracked player dropped");
            continue;
        };
        match outcome {
            PlayerOutcome::NewMatch(record) => {
                match_groups
                    .entry(record.match_id.as_str())
                    .or_default()
                    .push(record);
            }
            PlayerOutcome::NotFound { .. } => {
                not_found.entry(player.category).or_default().push(player);
            }
            PlayerOutcome::Failed { error, .. } if include_failures => {
                failures
                    .entry(player.category)
                    .or_default()
                    .push((player, error.as_str()));
            }
            _ => {}
        }
    }

    let stamp = format_timestamp(now);
    let mut sections: BTreeMap<Category, Vec<String>> = BTreeMap::new();

    for (match_id, members) in &match_groups {
        let mut by_category: BTreeMap<Category, Vec<(&TrackedPlayer, &MatchRecord)>> =
            BTreeMap::new();
        for record in members.iter().copied() {
            if let Some(player) = config.player(&record.player) {
                by_category
                    .entry(player.category)
                    .or_default()
                    .push((player, record));
            }
        }
        for (category, entries) in by_category {
            sections
                .entry(category)
                .or_default()
                .push(render_match(&stamp, match_id, &entries));
        }
    }

    for (category, players) in not_found {
        sections
            .entry(category)
            .or_default()
            .push(render_not_found(&stamp, &players));
    }

    for (category, failed) in failures {
        sections
            .entry(category)
            .or_default()
            .push(render_failures(&stamp, &failed));
    }

    sections
        .into_iter()
        .map(|(category, blocks)| Dispatch {
            category,
            sections: blocks.len(),
            content: blocks.join(SECTION_SEPARATOR),
        })
        .collect()
}

fn render_match(stamp: &str, match_id: &str, entries: &[(&TrackedPlayer, &MatchRecord)]) -> String {
    // Every member shares queue and match; any one of them carries the metadata.
    let first = entries[0].1;
    let pairs = entries
        .iter()
        .map(|(player, record)| format!("`{}` : `{}`", player.display_name(), record.champion))
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR);

    format!(
        "> ***Match Found!***\n> {}\n> Players: {}\n> Queue: `{}`\n> Match ID: `{}`\n> {}",
        stamp, pairs, first.queue, match_id, first.url
    )
}

fn render_not_found(stamp: &str, players: &[&TrackedPlayer]) -> String {
    let names = players
        .iter()
        .map(|player| format!("`{}`", player.display_name()))
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR);

    format!("> ***Summoner Not Found***\n> {}\n> {}", stamp, names)
}

fn render_failures(stamp: &str, failed: &[(&TrackedPlayer, &str)]) -> String {
    let lines = failed
        .iter()
        .map(|(player, error)| format!("> `{}` : {}", player.display_name(), error))
        .collect::<Vec<_>>()
        .join("\n");

    format!("> ***Check Failed***\n> {}\n{}", stamp, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueueKind;

    fn config() -> WatchConfig {
        let players = vec![
            TrackedPlayer::new("a#1", Category::Friend),
            TrackedPlayer::new("b#1", Category::Smurf).with_nickname("Bee"),
            TrackedPlayer::new("c#1", Category::Friend),
        ];
        let channels = Category::ALL
            .iter()
            .map(|c| (*c, format!("https://discord.test/{}", c)))
            .collect();
        WatchConfig::new(players, channels)
    }

    fn new_match(player: &str, match_id: &str, champion: &str) -> PlayerOutcome {
        PlayerOutcome::NewMatch(MatchRecord {
            match_id: match_id.to_string(),
            player: player.to_string(),
            queue: QueueKind::RankedSoloDuo,
            champion: champion.to_string(),
            url: format!("https://porofessor.gg/live/jp/{}", player.replace('#', "-")),
            observed_at: Utc::now(),
        })
    }

    #[test]
    fn test_same_match_same_category_is_one_block() {
        let outcomes = vec![
            new_match("a#1", "m1", "Ahri"),
            new_match("c#1", "m1", "Zed"),
        ];
        let dispatches = build_dispatches(&outcomes, &config(), Utc::now(), false);

        assert_eq!(dispatches.len(), 1);
        let dispatch = &dispatches[0];
        assert_eq!(dispatch.category, Category::Friend);
        assert_eq!(dispatch.sections, 1);
        assert!(dispatch.content.contains("`a#1` : `Ahri` / `c#1` : `Zed`"));
        assert!(dispatch.content.contains("Queue: `RANKED SOLO/DUO`"));
        assert!(dispatch.content.contains("Match ID: `m1`"));
    }

    #[test]
    fn test_different_matches_are_separate_blocks() {
        let outcomes = vec![
            new_match("a#1", "m1", "Ahri"),
            new_match("c#1", "m2", "Zed"),
        ];
        let dispatches = build_dispatches(&outcomes, &config(), Utc::now(), false);

        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].sections, 2);
        let blocks: Vec<_> = dispatches[0].content.split(SECTION_SEPARATOR).collect();
        assert!(blocks[0].contains("a#1") && !blocks[0].contains("c#1"));
        assert!(blocks[1].contains("c#1") && !blocks[1].contains("a#1"));
    }

    #[test]
    fn test_nickname_in_pairs() {
        let outcomes = vec![new_match("b#1", "m9", "Lux")];
        let dispatches = build_dispatches(&outcomes, &config(), Utc::now(), false);
        assert!(dispatches[0].content.contains("`Bee (b#1)` : `Lux`"));
    }

    #[test]
    fn test_quiet_outcomes_produce_nothing() {
        let outcomes = vec![
            PlayerOutcome::Inactive {
                player: "a#1".to_string(),
            },
            PlayerOutcome::Unknown {
                player: "b#1".to_string(),
            },
            PlayerOutcome::Duplicate {
                player: "c#1".to_string(),
                match_id: "m1".to_string(),
            },
            PlayerOutcome::NotFoundSuppressed {
                player: "a#1".to_string(),
            },
            PlayerOutcome::Failed {
                player: "b#1".to_string(),
                error: "timeout".to_string(),
            },
        ];
        assert!(build_dispatches(&outcomes, &config(), Utc::now(), false).is_empty());
    }

    #[test]
    fn test_failures_reported_when_enabled() {
        let outcomes = vec![PlayerOutcome::Failed {
            player: "b#1".to_string(),
            error: "request timed out".to_string(),
        }];
        let dispatches = build_dispatches(&outcomes, &config(), Utc::now(), true);
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].category, Category::Smurf);
        assert!(dispatches[0].content.contains("Check Failed"));
        assert!(dispatches[0].content.contains("request timed out"));
    }

    #[test]
    fn test_untracked_player_is_dropped() {
        let outcomes = vec![new_match("stranger#1", "m1", "Ahri")];
        assert!(build_dispatches(&outcomes, &config(), Utc::now(), false).is_empty());
    }

    #[test]
    fn test_status_line() {
        let status = render_status(Utc::now(), 3);
        assert!(status.starts_with("> **Watcher Status**"));
        assert!(status.contains("Checking 3 player(s)."));
    }
}
