use chrono::Utc;
use matchwatch_core::{
    classify, normalize_page, Category, Extractor, PageState, TrackedPlayer, WatchConfig,
};
use std::collections::BTreeMap;
use std::path::Path;

/// State and extraction result of one saved page, as printed JSON
fn inspect_page(content: &str, player_name: &str, region: &str) -> serde_json::Value {
    let player = TrackedPlayer::new(player_name, Category::Friend);
    let mut config = WatchConfig::new(vec![player.clone()], BTreeMap::new());
    config.region = region.to_string();

    let text = normalize_page(content);
    let state = classify(&text);
    let mut output = serde_json::json!({
        "player": player_name,
        "state": state,
    });

    if state == PageState::Active {
        let url = config.live_url(&player);
        match Extractor::new(region).extract(&text, &player, &url, Utc::now()) {
            Ok(record) => output["match"] = serde_json::json!(record),
            Err(err) => output["error"] = serde_json::json!(err.to_string()),
        }
    }
    output
}

pub fn run(file: &Path, player: &str, region: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;
    let output = inspect_page(&content, player, region);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
