//! Raw response dumps for debugging upstream markup changes

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::io::atomic_write;

/// Write `content` with a small header into
/// `dir/response_<timestamp>_<player>_<label>.log`.
///
/// `player` is the player's URL slug and `label` the HTTP status or a short
/// marker such as `ERROR`. One cycle dumps at most once per player, so the
/// name stays unique within a cycle.
pub fn save_response(
    dir: &Path,
    player: &str,
    url: &str,
    label: &str,
    content: &str,
    now: DateTime<Utc>,
) -> std::io::Result<PathBuf> {
    let file_name = format!(
        "response_{}_{}_{}.log",
        now.format("%Y%m%d_%H%M%S_%3f"),
        file_safe(player),
        file_safe(label)
    );
    let path = dir.join(file_name);

    let rule = "=".repeat(50);
    let body = format!(
        "Timestamp: {}\nURL: {}\nStatus: {}\n{rule}\nResponse Content:\n{rule}\n{}",
        now.to_rfc3339(),
        url,
        label,
        content,
    );

    atomic_write(&path, body.as_bytes())?;
    Ok(path)
}

/// Keep ASCII letters, digits, `-` and `_`; everything else becomes `_`
fn file_safe(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
