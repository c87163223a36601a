//! Path resolution for watcher files

use std::path::{Path, PathBuf};

const STATE_DIR: &str = ".matchwatch";

/// Resolves the standard file locations under one root directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
}

impl Paths {
    /// `~/.matchwatch`
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;
        Ok(Self::with_root(home.join(STATE_DIR)))
    }

    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Default config file
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Journal of every dispatched notification
    pub fn journal_file(&self) -> PathBuf {
        self.root.join("notifications.jsonl")
    }

    /// Raw page dumps of failed or unrecognized checks
    pub fn responses_dir(&self) -> PathBuf {
        self.root.join("responses")
    }
}
