//! Match details from live-page markup.
//!
//! No HTML parser is involved. Each field is found by walking an ordered chain
//! of literal anchors through the normalized page text, and every search starts
//! where the previous anchor ended so an earlier unrelated occurrence is never
//! picked up. Renaming any anchor upstream silently degrades the field it feeds.

use chrono::{DateTime, Utc};

use crate::config::TrackedPlayer;
use crate::error::ExtractError;
use crate::types::{MatchRecord, QueueKind, UNKNOWN};

const RESULT_ANCHOR: &str = "class=\"resulttd\"";
const MATCH_ID_END: &str = "#";

const HEADING_START: &str = "<h2 class=\"left relative\">";
const HEADING_END: &str = "</h2>";

const CHAMPION_BOX_ANCHORS: &[&str] = &["<div class=\"box championbox", "class=\"championbox"];
const IMG_FLEX_ANCHOR: &str = "<div class=\"imgflex";
const IMG_COLUMN_ANCHOR: &str = "<div class=\"imgcolumn-champion";
const TOOLTIP_BOX_ANCHOR: &str = "<div class=\"relative requiretooltip";
const TOOLTIP_ATTR: &str = "tooltip=\"";
const ALT_ATTR: &str = "alt=\"";
const ATTR_END: &str = "\"";

/// Forward-only cursor over page text
struct AnchorChain<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> AnchorChain<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Move past the next occurrence of `anchor`
    fn seek(&mut self, anchor: &str) -> Option<()> {
        let found = self.text[self.pos..].find(anchor)?;
        self.pos += found + anchor.len();
        Some(())
    }

    /// Move past the first of `anchors` (in priority order) found after the cursor
    fn seek_any(&mut self, anchors: &[&str]) -> Option<()> {
        anchors.iter().find_map(|anchor| self.seek(anchor))
    }

    /// Text between the cursor and the next `delimiter`
    fn take_until(&mut self, delimiter: &str) -> Option<&'a str> {
        let rest = &self.text[self.pos..];
        let end = rest.find(delimiter)?;
        self.pos += end + delimiter.len();
        Some(&rest[..end])
    }
}

/// Extracts match records from normalized live-page text
#[derive(Debug, Clone)]
pub struct Extractor {
    match_link: String,
}

impl Extractor {
    /// Match links point at leagueofgraphs for the configured region
    pub fn new(region: &str) -> Self {
        Self {
            match_link: format!(
                "href=\"https://www.leagueofgraphs.com/match/{}/",
                region.to_lowercase()
            ),
        }
    }

    /// Build a record from a page classified `Active`.
    ///
    /// Only the match id is required. A missing queue heading or champion card
    /// yields `Unknown` for that field.
    pub fn extract(
        &self,
        text: &str,
        player: &TrackedPlayer,
        url: &str,
        observed_at: DateTime<Utc>,
    ) -> Result<MatchRecord, ExtractError> {
        let match_id = self.match_id(text)?;
        let queue = queue_kind(text);
        let champion = champion(text, &player.card_key())
            .map(|raw| display_champion(&raw))
            .unwrap_or_else(|| UNKNOWN.to_string());

        Ok(MatchRecord {
            match_id,
            player: player.name.clone(),
            queue,
            champion,
            url: url.to_string(),
            observed_at,
        })
    }

    pub fn match_id(&self, text: &str) -> Result<String, ExtractError> {
        let mut chain = AnchorChain::new(text);
        chain.seek(RESULT_ANCHOR).ok_or(ExtractError::MissingMatchId)?;
        chain
            .seek(&self.match_link)
            .ok_or(ExtractError::MissingMatchId)?;
        let id = chain
            .take_until(MATCH_ID_END)
            .ok_or(ExtractError::MissingMatchId)?
            .trim();

        if id.is_empty() {
            return Err(ExtractError::MissingMatchId);
        }
        Ok(id.to_string())
    }
}

/// Queue named on the second line of the page heading
pub fn queue_kind(text: &str) -> QueueKind {
    let mut chain = AnchorChain::new(text);
    let heading = chain
        .seek(HEADING_START)
        .and_then(|_| chain.take_until(HEADING_END));

    heading
        .and_then(|block| block.lines().nth(1))
        .map(QueueKind::from_heading)
        .unwrap_or(QueueKind::Unknown)
}

/// Raw champion name from the player's own card
pub fn champion(text: &str, card_key: &str) -> Option<String> {
    let card_anchor = format!("<div class=\"card card-5\" data-summonername=\"{}\"", card_key);

    let mut chain = AnchorChain::new(text);
    chain.seek(&card_anchor)?;
    chain.seek_any(CHAMPION_BOX_ANCHORS)?;
    chain.seek(IMG_FLEX_ANCHOR)?;
    chain.seek(IMG_COLUMN_ANCHOR)?;
    chain.seek(TOOLTIP_BOX_ANCHOR)?;
    chain.seek(TOOLTIP_ATTR)?;
    chain.seek(ALT_ATTR)?;
    let name = chain.take_until(ATTR_END)?.trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Capitalize each word: `miss fortune` -> `Miss Fortune`
pub fn display_champion(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
