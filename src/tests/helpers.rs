use crate::{
    config::{BackendKind, SvnConfig},
    file_watcher::WatcherKind,
    process::SvnCommand,
    svn::Repository,
};
use std::{fs, os::unix::fs::PermissionsExt, path::PathBuf};
use temp_dir::TempDir;

/// Stands in for `svn`: prints `<subcommand>.out` (or `<subcommand>.xml` when
/// called with `--xml`) from its own directory and appends its arguments to `calls.log`.
const FAKE_SVN: &str = r#"#!/bin/sh
here="$(dirname "$0")"
echo "$*" >> "$here/calls.log"
case " $* " in
  *" --xml "*) ext=xml ;;
  *) ext=out ;;
esac
cat "$here/$1.$ext" 2>/dev/null
exit 0
"#;

pub struct FakeSvn {
    pub dir: TempDir,
}

impl FakeSvn {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.child("svn");
        fs::write(&path, FAKE_SVN).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    pub fn executable(&self) -> PathBuf {
        self.dir.child("svn")
    }

    pub fn command(&self) -> SvnCommand {
        SvnCommand::locate(self.executable()).unwrap()
    }

    /// `name` is e.g. `status.out` or `info.xml`.
    pub fn set_output(&self, name: &str, output: &str) {
        fs::write(self.dir.child(name), output).unwrap();
    }

    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.child("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn config(&self, backend: BackendKind) -> SvnConfig {
        SvnConfig {
            executable: self.executable(),
            backend,
            watcher: WatcherKind::Stat,
        }
    }
}

pub struct TestContext {
    /// The working copy.
    pub dir: TempDir,
    pub svn: FakeSvn,
}

impl TestContext {
    pub fn setup() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.child(".svn")).unwrap();
        fs::write(dir.child(".svn/wc.db"), "initial").unwrap();

        Self {
            dir,
            svn: FakeSvn::new(),
        }
    }

    pub fn open(&self, backend: BackendKind) -> Repository {
        Repository::open(self.dir.path(), &self.svn.config(backend)).unwrap()
    }

    pub fn write_config(&self, backend: &str) -> PathBuf {
        let path = self.svn.dir.child("config.toml");
        fs::write(
            &path,
            format!(
                "[svn]\nexecutable = {:?}\nbackend = {:?}\n",
                self.svn.executable().to_string_lossy(),
                backend
            ),
        )
        .unwrap();
        path
    }
}

pub fn info_xml(url: &str, root: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<info>
<entry
   kind="dir"
   path="."
   revision="12">
<url>{url}</url>
<relative-url>^/</relative-url>
<repository>
<root>{root}</root>
<uuid>7a1c2b3d-0000-0000-0000-000000000000</uuid>
</repository>
<wc-info>
<schedule>normal</schedule>
<depth>infinity</depth>
</wc-info>
</entry>
</info>
"#
    )
}
