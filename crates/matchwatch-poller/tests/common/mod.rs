#![allow(dead_code)]

use matchwatch_core::{Category, TrackedPlayer, WatchConfig};
use matchwatch_poller::{FetchError, NotifyError, Notifier, PageFetcher};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// Canned answers keyed by URL; unknown URLs fail with a 503
#[derive(Default)]
pub struct FakeFetcher {
    pages: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn set_page(&self, url: impl Into<String>, page: impl Into<String>) {
        self.pages.lock().unwrap().insert(url.into(), page.into());
    }

    pub fn remove_page(&self, url: &str) {
        self.pages.lock().unwrap().remove(url);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        // Let other checks run between request and response, like real I/O
        tokio::task::yield_now().await;
        let page = self.pages.lock().unwrap().get(url).cloned();
        page.ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 503,
        })
    }
}

/// Records every message; channels listed in `failing` answer with a 500
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    failing: Vec<String>,
}

impl RecordingNotifier {
    pub fn failing_for(channel: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: vec![channel.to_string()],
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, channel: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(key, _)| key == channel)
            .map(|(_, content)| content)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, routing_key: &str, content: &str) -> Result<(), NotifyError> {
        if self.failing.iter().any(|channel| channel == routing_key) {
            return Err(NotifyError::Status { status: 500 });
        }
        self.sent
            .lock()
            .unwrap()
            .push((routing_key.to_string(), content.to_string()));
        Ok(())
    }
}

pub fn channel(category: Category) -> String {
    format!("https://discord.test/{}", category)
}

pub fn sample_config() -> WatchConfig {
    let players = vec![
        TrackedPlayer::new("Alpha#JP1", Category::Friend),
        TrackedPlayer::new("Bravo#JP1", Category::Smurf).with_nickname("bravo alt"),
        TrackedPlayer::new("Charlie#JP1", Category::Friend),
    ];
    let channels: BTreeMap<Category, String> = Category::ALL
        .iter()
        .map(|category| (*category, channel(*category)))
        .collect();
    WatchConfig::new(players, channels)
}

pub fn live_url(config: &WatchConfig, name: &str) -> String {
    config.live_url(config.player(name).unwrap())
}

pub fn fragment_url(config: &WatchConfig, name: &str) -> String {
    config.fragment_url(config.player(name).unwrap())
}

pub fn live_page(match_id: &str, queue: &str, cards: &[(&str, &str)]) -> String {
    let mut page = String::from("<html><body><div class=\"live-game-stats\">\n");
    page.push_str(&format!(
        "<h2 class=\"left relative\">\n        {}\n</h2>\n",
        queue
    ));
    for (name, champion) in cards {
        page.push_str(&format!(
            "<div class=\"card card-5\" data-summonername=\"{name}\">\n\
             <div class=\"box championBox\"><div class=\"imgFlex\"><div class=\"imgColumn-champion\">\n\
             <div class=\"relative requireTooltip\" tooltip=\"x\"><img alt=\"{champion}\"></div>\n\
             </div></div></div></div>\n"
        ));
    }
    page.push_str(&format!(
        "<td class=\"resultTd\"><a href=\"https://www.leagueofgraphs.com/match/jp/{}#p1\">Match</a></td>\n",
        match_id
    ));
    page.push_str("</div></body></html>");
    page
}

pub fn loading_page() -> String {
    "<div id=\"loadMessage\">Damn, that's pretty slow to load</div>".to_string()
}

pub fn offline_page() -> String {
    "<h2>The summoner is not in-game</h2>".to_string()
}

pub fn not_found_page() -> String {
    "<div class=\"summoner-not-found\">Summoner not found</div>".to_string()
}
