use std::{fmt::Display, io};

#[derive(Debug)]
pub enum Error {
    SvnUnavailable(String),
    SpawnCmd(io::Error),
    NoCmdStdout(String),
    WorkingCopyPath(io::Error),
    Config(Box<figment::Error>),
    FileWatcher(notify::Error),
    ReadFileMetadata(io::Error),
    OpenLogFile(io::Error),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SvnUnavailable(name) => {
                f.write_fmt(format_args!("{} executable is not available", name))
            }
            Error::SpawnCmd(e) => f.write_fmt(format_args!("Failed to spawn command: {}", e)),
            Error::NoCmdStdout(args) => {
                f.write_fmt(format_args!("No stdout for '{}' process", args))
            }
            Error::WorkingCopyPath(e) => {
                f.write_fmt(format_args!("Couldn't resolve working copy path: {}", e))
            }
            Error::Config(e) => f.write_fmt(format_args!("Configuration error: {}", e)),
            Error::FileWatcher(e) => f.write_fmt(format_args!("File watcher error: {}", e)),
            Error::ReadFileMetadata(e) => {
                f.write_fmt(format_args!("Couldn't read file metadata: {}", e))
            }
            Error::OpenLogFile(e) => f.write_fmt(format_args!("Couldn't open log file: {}", e)),
        }
    }
}

impl Error {
    pub fn is_svn_unavailable(err: &(dyn std::error::Error + 'static)) -> bool {
        matches!(err.downcast_ref::<Error>(), Some(Error::SvnUnavailable(_)))
    }
}
