use matchwatch_core::{Category, WatchConfig};
use std::path::Path;

use super::load_config;

/// Roster per category. Webhook URLs are secrets and never printed.
fn describe(config: &WatchConfig) -> String {
    let mut lines = vec![
        format!("Region: {}", config.region),
        format!(
            "Poll interval: {}s, concurrency {}",
            config.poll_interval_secs, config.max_concurrency
        ),
        format!(
            "History: {} match(es) per player for {}s",
            config.history_capacity, config.history_ttl_secs
        ),
    ];

    for category in Category::ALL {
        let players: Vec<_> = config
            .players
            .iter()
            .filter(|player| player.category == category)
            .collect();
        let channel = if config.channel(category).is_some() {
            "channel configured"
        } else {
            "no channel"
        };
        lines.push(format!("{} ({}, {})", category, players.len(), channel));
        for player in players {
            lines.push(format!("  {}", player.display_name()));
        }
    }
    lines.join("\n")
}

pub fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    println!("{}", describe(&config));
    Ok(())
}
