use crate::{Res, error::Error};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use serde::Deserialize;
use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
    time::SystemTime,
};

/// Tells whether files changed since they were last looked at.
pub trait Watcher: Send {
    /// True on the first call for `path`, and afterwards whenever `path` changed
    /// since the previous call.
    fn changed(&mut self, path: &Path) -> Res<bool>;
}

/// Which [`Watcher`] the file status cache creates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatcherKind {
    #[default]
    Stat,
    Notify,
}

impl WatcherKind {
    pub fn create(self) -> Res<Box<dyn Watcher>> {
        log::debug!("Creating {:?} file watcher", self);
        Ok(match self {
            WatcherKind::Stat => Box::new(StatWatcher::default()),
            WatcherKind::Notify => Box::new(NotifyWatcher::new()?),
        })
    }
}

type Stamp = Option<(SystemTime, u64)>;

/// Compares modification time and size on every call.
#[derive(Debug, Default)]
pub struct StatWatcher {
    stamps: HashMap<PathBuf, Stamp>,
}

fn stamp(path: &Path) -> Res<Stamp> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some((
            meta.modified().map_err(Error::ReadFileMetadata)?,
            meta.len(),
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::ReadFileMetadata(e).into()),
    }
}

impl Watcher for StatWatcher {
    fn changed(&mut self, path: &Path) -> Res<bool> {
        let current = stamp(path)?;
        Ok(self.stamps.insert(path.to_path_buf(), current) != Some(current))
    }
}

/// Subscribes to filesystem events for each parent directory it's asked about.
pub struct NotifyWatcher {
    watcher: RecommendedWatcher,
    watched: HashSet<PathBuf>,
    changed: Arc<Mutex<HashSet<PathBuf>>>,
}

impl NotifyWatcher {
    pub fn new() -> Res<Self> {
        let changed = Arc::new(Mutex::new(HashSet::new()));
        let changed_w = changed.clone();

        let watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) if is_changed(&event) => {
                    let mut changed = changed_w.lock().unwrap_or_else(PoisonError::into_inner);
                    for path in event.paths {
                        log::debug!("File changed: {:?} ({:?})", path, event.kind);
                        changed.insert(path);
                    }
                }
                Ok(_) => (),
                Err(e) => log::error!("File watcher error: {:?}", e),
            }
        })
        .map_err(Error::FileWatcher)?;

        log::info!(
            "File watcher started (kind: {:?})",
            RecommendedWatcher::kind()
        );

        Ok(Self {
            watcher,
            watched: HashSet::new(),
            changed,
        })
    }

    /// False when the parent directory doesn't exist yet, e.g. before the
    /// working copy is checked out.
    fn watch(&mut self, path: &Path) -> Res<bool> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !dir.is_dir() {
            log::debug!("Not watching {:?} yet, {:?} is missing", path, dir);
            return Ok(false);
        }

        self.watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(Error::FileWatcher)?;
        Ok(true)
    }
}

impl Watcher for NotifyWatcher {
    fn changed(&mut self, path: &Path) -> Res<bool> {
        if !self.watched.contains(path) {
            // Unwatched paths count as changed until their directory shows up.
            if self.watch(path)? {
                self.watched.insert(path.to_path_buf());
            }
            return Ok(true);
        }

        Ok(self
            .changed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path))
    }
}

fn is_changed(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}
