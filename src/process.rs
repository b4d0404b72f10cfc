use crate::{Res, error::Error};
use itertools::Itertools;
use std::{
    borrow::Cow,
    ffi::OsStr,
    io::{BufRead, BufReader, Split},
    iter,
    path::{Path, PathBuf},
    process::{Child, ChildStdout, Command, Stdio},
};

/// A located `svn` executable.
#[derive(Debug, Clone)]
pub struct SvnCommand {
    program: PathBuf,
}

impl SvnCommand {
    /// Resolves `executable` on the search path, or as a path when it has separators.
    pub fn locate(executable: impl AsRef<OsStr>) -> Res<Self> {
        let executable = executable.as_ref();
        let program = which::which(executable).map_err(|e| {
            log::debug!("Couldn't locate {:?}: {}", executable, e);
            Error::SvnUnavailable(executable.to_string_lossy().into_owned())
        })?;

        log::debug!("Using svn at {:?}", program);
        Ok(Self { program })
    }

    pub(crate) fn readlines<S: AsRef<OsStr>>(
        &self,
        directory: &Path,
        args: &[S],
    ) -> Res<ReadLines> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        let args = command_args(&cmd);
        log::debug!("Running '{}' in {:?}", args, directory);

        let mut child = cmd.spawn().map_err(Error::SpawnCmd)?;
        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::NoCmdStdout(args.into_owned()).into());
        };

        Ok(ReadLines {
            child,
            lines: BufReader::new(stdout).split(b'\n'),
            args,
        })
    }

    pub(crate) fn read_to_string<S: AsRef<OsStr>>(
        &self,
        directory: &Path,
        args: &[S],
    ) -> Res<String> {
        Ok(self.readlines(directory, args)?.join("\n"))
    }
}

fn command_args(cmd: &Command) -> Cow<'static, str> {
    iter::once(cmd.get_program().to_string_lossy())
        .chain(cmd.get_args().map(|arg| arg.to_string_lossy()))
        .join(" ")
        .into()
}

/// Lazily yields the stdout lines of a running command.
///
/// Dropping it before the output is exhausted kills the process.
pub(crate) struct ReadLines {
    child: Child,
    lines: Split<BufReader<ChildStdout>>,
    args: Cow<'static, str>,
}

impl Iterator for ReadLines {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match self.lines.next()? {
            Ok(mut line) => {
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                Some(String::from_utf8_lossy(&line).into_owned())
            }
            Err(e) => {
                log::warn!("Couldn't read output of '{}': {}", self.args, e);
                None
            }
        }
    }
}

impl Drop for ReadLines {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }

        match self.child.wait() {
            Ok(status) if !status.success() => {
                log::debug!("'{}' exited with {:?}", self.args, status.code())
            }
            Ok(_) => (),
            Err(e) => log::warn!("Couldn't await '{}': {}", self.args, e),
        }
    }
}
