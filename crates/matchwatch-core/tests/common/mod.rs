#![allow(dead_code)]

use matchwatch_core::{Category, TrackedPlayer, WatchConfig};
use std::collections::BTreeMap;

/// Live page in the shape porofessor serves, before normalization
pub fn live_page(match_id: &str, queue: &str, cards: &[(&str, &str)]) -> String {
    let mut page = String::from(
        "<html><head><title>Live Game</title></head><body>\n<div class=\"live-game-stats\">\n",
    );
    page.push_str(&format!(
        "<h2 class=\"left relative\">\n        {}\n        <span class=\"gameTimer\">12:04</span>\n</h2>\n",
        queue
    ));
    for (name, champion) in cards {
        page.push_str(&format!(
            "<div class=\"card card-5\" data-summonername=\"{name}\" data-spectator=\"0\">\n\
             <div class=\"box championBox blue\">\n\
             <div class=\"imgFlex\">\n\
             <div class=\"imgColumn-champion\">\n\
             <div class=\"relative requireTooltip\" tooltip=\"champion-tooltip\">\n\
             <img class=\"championImage\" src=\"/img/{champion}.png\" alt=\"{champion}\">\n\
             </div></div></div></div></div>\n"
        ));
    }
    page.push_str(&format!(
        "<table><tr><td class=\"resultTd\"><a href=\"https://www.leagueofgraphs.com/match/jp/{}#participant1\">Match</a></td></tr></table>\n",
        match_id
    ));
    page.push_str("</div></body></html>");
    page
}

pub fn loading_page() -> String {
    "<html><body><div id=\"loadMessage\">Damn, that's pretty slow to load...</div></body></html>"
        .to_string()
}

pub fn offline_page() -> String {
    "<html><body><h2>The summoner is not in-game</h2></body></html>".to_string()
}

pub fn not_found_page() -> String {
    "<html><body><div class=\"summoner-not-found\">Summoner not found</div></body></html>"
        .to_string()
}

pub fn sample_config() -> WatchConfig {
    let players = vec![
        TrackedPlayer::new("Alpha#JP1", Category::Friend),
        TrackedPlayer::new("Bravo#JP1", Category::Smurf).with_nickname("bravo alt"),
        TrackedPlayer::new("Charlie#JP1", Category::Friend),
        TrackedPlayer::new("Delta#JP1", Category::Streamer),
    ];
    let channels: BTreeMap<Category, String> = Category::ALL
        .iter()
        .map(|category| (*category, format!("https://discord.test/{}", category)))
        .collect();
    WatchConfig::new(players, channels)
}
