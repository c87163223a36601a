//! Page classification by literal markers

use crate::types::PageState;

struct StateMarkers {
    state: PageState,
    markers: &'static [&'static str],
}

/// Checked in order; the first state with a matching marker wins
const STATE_MARKERS: &[StateMarkers] = &[
    StateMarkers {
        state: PageState::NotFound,
        markers: &[
            "summoner not found",
            "404 - page not found",
            "summoner-not-found",
            "the summoner does not exist",
        ],
    },
    StateMarkers {
        state: PageState::Loading,
        markers: &["damn, that's pretty slow to load", "loadmessage", "spinner"],
    },
    StateMarkers {
        state: PageState::Active,
        markers: &[
            "live-game-stats",
            "team stats",
            "game-status-ingame",
            "live game",
            "spectate",
        ],
    },
    StateMarkers {
        state: PageState::Inactive,
        markers: &[
            "the summoner is not in-game",
            "summoner-offline",
            "not in-game",
            "please retry later",
            "must be on the loading screen",
        ],
    },
];

/// Lower-case raw page text; markers and anchors are all lower case
pub fn normalize_page(raw: &str) -> String {
    raw.to_lowercase()
}

/// Classify normalized page text
pub fn classify(text: &str) -> PageState {
    STATE_MARKERS
        .iter()
        .find(|entry| entry.markers.iter().any(|marker| text.contains(marker)))
        .map(|entry| entry.state)
        .unwrap_or(PageState::Unknown)
}

/// Classify the fragment fetched after a `Loading` page.
/// A fragment that is still loading is `Unknown`, never `Loading`.
pub fn classify_fragment(text: &str) -> PageState {
    match classify(text) {
        PageState::Loading => PageState::Unknown,
        state => state,
    }
}
