use chrono::Utc;
use matchwatch_core::{Category, WatchConfig};
use std::path::Path;
use tracing::{info, warn};

use super::{build_watcher, load_config};

pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    log_roster(&config);

    let interval = config.poll_interval();
    let watcher = build_watcher(config)?;
    info!(interval_secs = interval.as_secs(), "Watcher started");

    loop {
        if watcher.config().announce_cycles {
            let delivered = watcher.announce(Utc::now()).await;
            if delivered == 0 {
                warn!("Status announcement reached no channel");
            }
        }

        let report = watcher.run_cycle().await;
        if report.failures == report.players && report.players > 0 {
            warn!(players = report.players, "Every player check failed this cycle");
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                return Ok(());
            }
        }
    }
}

fn log_roster(config: &WatchConfig) {
    info!(
        players = config.players.len(),
        region = %config.region,
        "Tracking players"
    );
    for category in Category::ALL {
        let names: Vec<String> = config
            .players
            .iter()
            .filter(|player| player.category == category)
            .map(|player| player.display_name())
            .collect();
        if !names.is_empty() {
            info!(category = %category, players = %names.join(", "), "Roster");
        }
    }
}
