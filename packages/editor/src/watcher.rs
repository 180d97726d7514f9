use crate::storage::{FileStore, StorageError};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::ffi::OsString;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Reports writes to one record file made by other editor instances
///
/// Events arrive on a channel; the host drains it from its own loop and
/// then asks the session to reload the record.
pub struct StorageWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    file_name: OsString,
}

impl StorageWatcher {
    pub fn new(store: &FileStore, key: &str) -> Result<Self, StorageError> {
        std::fs::create_dir_all(store.dir())?;
        let file_name = store
            .path_for(key)
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();

        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        watcher.watch(store.dir(), RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            file_name,
        })
    }

    fn is_record_change(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event
                .paths
                .iter()
                .any(|path| path.file_name() == Some(self.file_name.as_os_str()))
    }

    /// Drain queued events; true if any touched the record
    pub fn try_changed(&self) -> bool {
        let mut changed = false;
        while let Ok(res) = self.receiver.try_recv() {
            if let Ok(event) = res {
                changed |= self.is_record_change(&event);
            }
        }
        changed
    }

    /// Block until the record changes or `timeout` passes
    pub fn wait_changed(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(Ok(event)) if self.is_record_change(&event) => return true,
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return false
                }
            }
        }
    }
}

impl std::fmt::Debug for StorageWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageWatcher")
            .field("file_name", &self.file_name)
            .finish()
    }
}
