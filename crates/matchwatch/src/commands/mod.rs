pub mod config;
pub mod history;
pub mod inspect;
pub mod once;
pub mod run;
pub mod version;

use matchwatch_core::WatchConfig;
use matchwatch_poller::{HttpFetcher, Watcher, WebhookNotifier};
use matchwatch_telemetry::Paths;
use std::path::Path;
use tracing::info;

/// Explicit path, then `~/.matchwatch/config.json`, then the legacy
/// `PLAYER_LIST` / `DISCORD_WEBHOOK_URL` variables. Always validated.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<WatchConfig> {
    let config = match explicit {
        Some(path) => WatchConfig::load(path)?,
        None => {
            let default = Paths::new()?.config_file();
            if default.exists() {
                WatchConfig::load(&default)?
            } else {
                info!("No config file, reading PLAYER_LIST and DISCORD_WEBHOOK_URL");
                WatchConfig::from_env()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

pub fn build_watcher(
    config: WatchConfig,
) -> anyhow::Result<Watcher<HttpFetcher, WebhookNotifier>> {
    let fetcher = HttpFetcher::new(config.fetch_timeout(), config.fetch_retries)?;
    let notifier = WebhookNotifier::new(config.fetch_timeout())?;
    let paths = Paths::new()?;
    Ok(Watcher::new(config, fetcher, notifier).with_paths(paths))
}
