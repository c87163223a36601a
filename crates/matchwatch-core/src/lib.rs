//! Match classification, deduplication and alert grouping for tracked players

mod classifier;
mod config;
mod error;
mod extractor;
mod grouper;
mod history;
mod throttle;
mod types;

pub use classifier::{classify, classify_fragment, normalize_page};
pub use config::{Category, TrackedPlayer, WatchConfig, RETRY_BACKOFF};
pub use error::{ConfigError, ExtractError};
pub use extractor::{display_champion, Extractor};
pub use grouper::{build_dispatches, format_timestamp, render_status, Dispatch};
pub use history::MatchHistory;
pub use throttle::NotFoundThrottle;
pub use types::{MatchRecord, PageState, PlayerOutcome, QueueKind, UNKNOWN};
