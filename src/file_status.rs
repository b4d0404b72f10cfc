use crate::{
    Res,
    file_watcher::{Watcher, WatcherKind},
};
use cached::{Cached, UnboundCache};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

/// Which file to look up, and which files invalidate the cached answer.
#[derive(Debug, Clone, Copy)]
pub struct FileStatusRequest<'a> {
    pub directory: &'a Path,
    /// Any change to it invalidates every cached status.
    pub dirstate_file: Option<&'a Path>,
    /// Relative to `directory`, or absolute.
    pub file_path: &'a Path,
    /// Name of per-directory ignore files between `directory` and the file.
    pub ignore_file_name: Option<&'a OsStr>,
}

struct Inner<V> {
    statuses: UnboundCache<PathBuf, V>,
    watcher: Option<Box<dyn Watcher>>,
}

/// Per-file status cache. Lookups are serialized, so at most one query runs at a time.
pub struct FileStatusCache<V> {
    create_watcher: WatcherKind,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> FileStatusCache<V> {
    pub fn new(create_watcher: WatcherKind) -> Self {
        Self {
            create_watcher,
            inner: Mutex::new(Inner {
                statuses: UnboundCache::new(),
                watcher: None,
            }),
        }
    }

    /// Returns the cached status of the requested file, calling `get` with
    /// `(directory, file_path)` when there is none or when it went stale.
    pub fn get_file_status<F>(&self, request: &FileStatusRequest<'_>, get: F) -> Res<V>
    where
        F: FnOnce(&Path, &Path) -> Res<V>,
    {
        let key = request.directory.join(request.file_path);

        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let Inner { statuses, watcher } = &mut *inner;
        let watcher = match watcher {
            Some(watcher) => watcher,
            None => watcher.insert(self.create_watcher.create()?),
        };

        if let Some(dirstate_file) = request.dirstate_file {
            if watcher.changed(dirstate_file)? {
                log::debug!("{:?} changed, dropping cached statuses", dirstate_file);
                statuses.cache_clear();
            }
        }

        let mut stale = watcher.changed(&key)?;
        if let Some(ignore_file_name) = request.ignore_file_name {
            for dir in key
                .ancestors()
                .skip(1)
                .take_while(|dir| dir.starts_with(request.directory))
            {
                stale |= watcher.changed(&dir.join(ignore_file_name))?;
            }
        }

        if !stale {
            if let Some(status) = statuses.cache_get(&key) {
                log::debug!("Cached status for {:?}", key);
                return Ok(status.clone());
            }
        }

        log::debug!("Querying status for {:?}", key);
        let status = get(request.directory, request.file_path)?;
        statuses.cache_set(key, status.clone());
        Ok(status)
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .statuses
            .cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
