//! Live reload for sites loaded from disk.
//!
//! A filesystem watcher marks the site dirty when page or manifest files
//! change; the app drains the flag on its frame tick and reloads. Events
//! for unrelated files (editor temp files, swap files) are ignored.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

pub struct SiteWatcher {
    rx: Receiver<notify::Result<notify::Event>>,
    // Held for its Drop; dropping it stops the watch threads.
    _watcher: RecommendedWatcher,
}

impl SiteWatcher {
    /// Watch `root` recursively.
    pub fn new(root: &Path) -> notify::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        tracing::debug!("Watching {:?} for changes", root);
        Ok(Self {
            rx,
            _watcher: watcher,
        })
    }

    /// Drain pending events; returns whether site content may have changed.
    pub fn drain_dirty(&self) -> bool {
        let mut dirty = false;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if event_is_relevant(&event) {
                        dirty = true;
                    }
                }
                Ok(Err(err)) => {
                    tracing::debug!("Watch error: {err}");
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        dirty
    }
}

impl std::fmt::Debug for SiteWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteWatcher").finish_non_exhaustive()
    }
}

fn event_is_relevant(event: &notify::Event) -> bool {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }
    event.paths.iter().any(|path| {
        matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("md" | "toml")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::SiteWatcher;
    use std::time::{Duration, Instant};

    #[test]
    fn reports_markdown_edits_as_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("index.md");
        std::fs::write(&page, "hello").unwrap();

        let watcher = SiteWatcher::new(dir.path()).unwrap();
        std::fs::write(&page, "hello again").unwrap();

        // Watch backends deliver asynchronously; poll briefly.
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut dirty = false;
        while Instant::now() < deadline {
            if watcher.drain_dirty() {
                dirty = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(25));
        }
        assert!(dirty);
    }

    #[test]
    fn ignores_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        let watcher = SiteWatcher::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("scratch.swp"), "x").unwrap();

        std::thread::sleep(Duration::from_millis(200));
        assert!(!watcher.drain_dirty());
    }
}
