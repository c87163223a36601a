#![allow(dead_code)]

use matchwatch_poller::{FetchError, NotifyError, Notifier, PageFetcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Config file with one player per category, all on one webhook host
pub fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    let config = serde_json::json!({
        "region": "jp",
        "players": [
            {"name": "Alpha#JP1", "category": "friend"},
            {"name": "Bravo#JP1", "nickname": "main", "category": "streamer"},
            {"name": "Charlie#JP1", "category": "friend"}
        ],
        "channels": {
            "friend": "https://discord.test/friend",
            "streamer": "https://discord.test/streamer"
        },
        "notify_errors": true
    });
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

pub fn live_page(match_id: &str, cards: &[(&str, &str)]) -> String {
    let mut page = String::from(
        "<div class=\"live-game-stats\"><h2 class=\"left relative\">\n  ARAM\n</h2>\n",
    );
    for (name, champion) in cards {
        page.push_str(&format!(
            "<div class=\"card card-5\" data-summonername=\"{name}\">\
             <div class=\"box championBox\"><div class=\"imgFlex\"><div class=\"imgColumn-champion\">\
             <div class=\"relative requireTooltip\" tooltip=\"x\"><img alt=\"{champion}\"></div>\
             </div></div></div></div>\n"
        ));
    }
    page.push_str(&format!(
        "<td class=\"resultTd\"><a href=\"https://www.leagueofgraphs.com/match/jp/{match_id}#p\">x</a></td></div>"
    ));
    page
}

#[derive(Default)]
pub struct StaticFetcher {
    pub pages: HashMap<String, String>,
}

impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 502,
        })
    }
}

#[derive(Default)]
pub struct MemoryNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl Notifier for MemoryNotifier {
    async fn send(&self, routing_key: &str, content: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((routing_key.to_string(), content.to_string()));
        Ok(())
    }
}
