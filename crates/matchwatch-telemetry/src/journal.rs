//! Journal of dispatched notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::io::{append_jsonl, read_jsonl};

/// One outbound message and how its delivery went
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub sent_at: DateTime<Utc>,
    pub category: String,
    /// Alert blocks batched into this message
    #[serde(default)]
    pub sections: usize,
    pub delivered: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub content: String,
}

/// Delivery totals for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub delivered: usize,
    pub failed: usize,
    pub sections: usize,
}

#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &NotificationRecord) -> std::io::Result<()> {
        append_jsonl(&self.path, record)
    }

    pub fn load(&self) -> std::io::Result<Vec<NotificationRecord>> {
        read_jsonl(&self.path)
    }

    pub fn stats(records: &[NotificationRecord]) -> BTreeMap<String, CategoryStats> {
        let mut stats: BTreeMap<String, CategoryStats> = BTreeMap::new();
        for record in records {
            let entry = stats.entry(record.category.clone()).or_default();
            if record.delivered {
                entry.delivered += 1;
            } else {
                entry.failed += 1;
            }
            entry.sections += record.sections;
        }
        stats
    }
}
