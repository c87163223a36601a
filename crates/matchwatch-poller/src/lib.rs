//! Fetching, notifying and the poll cycle

pub mod fetcher;
pub mod notifier;
pub mod watcher;

pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use notifier::{split_message, NotifyError, Notifier, WebhookNotifier, DISCORD_MESSAGE_LIMIT};
pub use watcher::{CycleReport, Watcher};
