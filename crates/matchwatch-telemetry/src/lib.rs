//! On-disk traces of the watcher: notification journal and raw response dumps

mod io;
mod journal;
mod paths;
mod responses;

pub use io::{append_jsonl, atomic_write, read_jsonl};
pub use journal::{CategoryStats, Journal, NotificationRecord};
pub use paths::Paths;
pub use responses::save_response;
