use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// Watches a single file through its parent directory
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    file_name: Option<std::ffi::OsString>,
}

impl FileWatcher {
    pub fn new(file: &Path) -> notify::Result<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            file_name: file.file_name().map(|n| n.to_os_string()),
        })
    }

    /// Block until the watched file changes; `None` once the watcher stops
    pub fn next_change(&self) -> Option<Event> {
        loop {
            match self.receiver.recv() {
                Ok(Ok(event)) if self.is_our_file(&event) => return Some(event),
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => tracing::warn!("Watch error: {}", e),
                Err(_) => return None,
            }
        }
    }

    fn is_our_file(&self, event: &Event) -> bool {
        event
            .paths
            .iter()
            .any(|p| p.file_name().map(|n| Some(n.to_os_string()) == self.file_name).unwrap_or(false))
    }
}
