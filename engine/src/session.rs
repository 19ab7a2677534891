//! Session persistence: remember where the reader left off.
//!
//! A tiny JSON file in the data directory. Corruption or absence degrades
//! to a fresh session; persistence failures are logged, never fatal.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Canonical path of the last open page, e.g. `/es/about`.
    pub last_path: Option<String>,
}

impl Session {
    /// Load a session file; `None` when absent or unreadable.
    #[must_use]
    pub fn load(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read session at {:?}: {}", path, err);
                }
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!("Discarding corrupt session at {:?}: {}", path, err);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        atomic_write(path, serialized.as_bytes())
    }
}

/// Write via a sibling temp file and rename, so readers never observe a
/// half-written file.
pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::Session;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = Session {
            last_path: Some("/es/about".to_string()),
        };
        session.save(&path).unwrap();
        assert_eq!(Session::load(&path), Some(session));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Session::load(&dir.path().join("session.json")), None);
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Session::load(&path), None);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("session.json");
        Session::default().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn overwrites_replace_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        Session {
            last_path: Some("/en/".to_string()),
        }
        .save(&path)
        .unwrap();
        Session {
            last_path: Some("/es/projects".to_string()),
        }
        .save(&path)
        .unwrap();
        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded.last_path.as_deref(), Some("/es/projects"));
    }
}
