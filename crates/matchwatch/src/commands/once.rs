use std::path::Path;

use super::{build_watcher, load_config};

pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let watcher = build_watcher(config)?;

    let report = watcher.run_cycle().await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
