use crate::{
    Res,
    config::{BackendKind, SvnConfig},
    error::Error,
    file_status::{FileStatusCache, FileStatusRequest},
    file_watcher::WatcherKind,
    process::SvnCommand,
};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

pub(crate) mod branch;
pub(crate) mod native;
pub(crate) mod status;

pub use branch::Info;
pub use native::{NativeClient, XmlClient};
pub use status::{StatusCode, StatusEntry, StatusKind};

/// Cached file statuses of a working copy are dropped whenever this file changes.
const DIRSTATE_FILE: &str = "wc.db";
const ADMIN_DIR: &str = ".svn";

/// How a [`Repository`] talks to Subversion.
pub enum Backend {
    /// Plain text output of the `svn` executable.
    CommandLine(SvnCommand),
    /// Typed records from a structured client.
    Native(Box<dyn NativeClient>),
}

impl Backend {
    pub fn from_config(config: &SvnConfig) -> Res<Self> {
        let svn = SvnCommand::locate(&config.executable)?;

        Ok(match config.backend {
            BackendKind::Cli => Backend::CommandLine(svn),
            BackendKind::Xml => Backend::Native(Box::new(XmlClient::new(svn))),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusScope<'a> {
    /// The whole working copy, externals excluded.
    Tree,
    Path(&'a Path),
}

pub(crate) fn status_args<'a>(directory: &'a Path, scope: StatusScope<'a>) -> Vec<&'a OsStr> {
    let mut args = vec![OsStr::new("status"), OsStr::new("--non-interactive")];
    match scope {
        StatusScope::Tree => {
            args.extend(["--depth", "infinity", "--ignore-externals"].map(OsStr::new));
            args.push(directory.as_os_str());
        }
        StatusScope::Path(path) => args.push(path.as_os_str()),
    }
    args
}

pub(crate) fn info_args() -> Vec<&'static OsStr> {
    ["info", "--non-interactive", "--depth", "empty", "--xml"]
        .map(OsStr::new)
        .to_vec()
}

/// A Subversion working copy.
pub struct Repository {
    directory: PathBuf,
    create_watcher: WatcherKind,
    backend: Backend,
    file_statuses: FileStatusCache<Option<StatusCode>>,
}

impl Repository {
    pub fn new(
        directory: impl AsRef<Path>,
        create_watcher: WatcherKind,
        backend: Backend,
    ) -> Res<Self> {
        let directory = std::path::absolute(directory.as_ref()).map_err(Error::WorkingCopyPath)?;

        Ok(Self {
            directory,
            create_watcher,
            backend,
            file_statuses: FileStatusCache::new(create_watcher),
        })
    }

    /// Fails with [`Error::SvnUnavailable`] when the configured executable can't be found.
    pub fn open(directory: impl AsRef<Path>, config: &SvnConfig) -> Res<Self> {
        Self::new(directory, config.watcher, Backend::from_config(config)?)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn create_watcher(&self) -> WatcherKind {
        self.create_watcher
    }

    /// Status of one file (cached), or of the whole working copy when `path` is `None`.
    pub fn status(&self, path: Option<&Path>) -> Res<Option<StatusCode>> {
        self.do_status(&self.directory, path)
    }

    pub fn do_status(&self, directory: &Path, path: Option<&Path>) -> Res<Option<StatusCode>> {
        match path {
            Some(path) => self.file_status(path),
            None => self.query_status(directory, StatusScope::Tree),
        }
    }

    fn file_status(&self, path: &Path) -> Res<Option<StatusCode>> {
        let dirstate_file = self.directory.join(ADMIN_DIR).join(DIRSTATE_FILE);
        let request = FileStatusRequest {
            directory: &self.directory,
            dirstate_file: Some(&dirstate_file),
            file_path: path,
            ignore_file_name: None,
        };

        self.file_statuses
            .get_file_status(&request, |directory, path| {
                self.query_status(directory, StatusScope::Path(path))
            })
    }

    fn query_status(&self, directory: &Path, scope: StatusScope<'_>) -> Res<Option<StatusCode>> {
        let status = match &self.backend {
            Backend::CommandLine(svn) => {
                status::from_lines(svn.readlines(directory, &status_args(directory, scope))?)
            }
            Backend::Native(client) => status::from_kinds(
                client
                    .status(directory, scope)?
                    .into_iter()
                    .map(|entry| entry.kind),
            ),
        };

        log::debug!("Status of {:?} ({:?}): {:?}", directory, scope, status);
        Ok(status)
    }

    /// Short label of the branch or tag the working copy is on.
    pub fn branch(&self) -> Res<String> {
        let info = match &self.backend {
            Backend::CommandLine(svn) => {
                Info::from_xml_lines(svn.readlines(&self.directory, &info_args())?)
            }
            Backend::Native(client) => client.info(&self.directory)?.unwrap_or_default(),
        };

        let label = info.branch_label();
        log::debug!("Branch of {:?}: {} ({:?})", self.directory, label, info);
        Ok(label)
    }
}
