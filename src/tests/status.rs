use super::*;
use crate::{
    config::{BackendKind, SvnConfig},
    error::Error,
    file_watcher::WatcherKind,
    svn::{Backend, Repository},
};
use pretty_assertions::assert_eq;
use std::{fs, path::Path};

fn code(status: Option<crate::StatusCode>) -> Option<String> {
    status.map(|s| s.to_string())
}

#[test]
fn tree_dirty_and_untracked() {
    let ctx = TestContext::setup();
    ctx.svn
        .set_output("status.out", "?       notes.txt\nM       src/main.c\n");
    let repo = ctx.open(BackendKind::Cli);

    let status = repo.status(None).unwrap().unwrap();
    assert!(status.is_dirty());
    assert!(status.has_untracked());
    assert_eq!(status.to_string(), "DU");
    assert_eq!(
        ctx.svn.calls(),
        vec![format!(
            "status --non-interactive --depth infinity --ignore-externals {}",
            repo.directory().display()
        )]
    );
}

#[test]
fn tree_dirty() {
    let ctx = TestContext::setup();
    ctx.svn
        .set_output("status.out", "!       gone.c\n        unchanged.c\n");
    let repo = ctx.open(BackendKind::Cli);

    assert_eq!(code(repo.status(None).unwrap()), Some("D ".to_string()));
}

#[test]
fn tree_untracked() {
    let ctx = TestContext::setup();
    ctx.svn.set_output("status.out", "?       notes.txt\n");
    let repo = ctx.open(BackendKind::Cli);

    let status = repo.status(None).unwrap().unwrap();
    assert!(!status.is_dirty());
    assert!(status.has_untracked());
    assert_eq!(status.to_string(), " U");
}

#[test]
fn clean_tree() {
    let ctx = TestContext::setup();
    ctx.svn.set_output("status.out", "");
    let repo = ctx.open(BackendKind::Cli);

    assert_eq!(repo.status(None).unwrap(), None);
}

#[test]
fn ignored_and_external_lines() {
    let ctx = TestContext::setup();
    ctx.svn.set_output(
        "status.out",
        "I       build\nX       vendor\n\nPerforming status on external item at 'vendor':\n",
    );
    let repo = ctx.open(BackendKind::Cli);

    assert_eq!(repo.status(None).unwrap(), None);
}

#[test]
fn status_is_idempotent() {
    let ctx = TestContext::setup();
    ctx.svn.set_output("status.out", "A       added.c\n");
    let repo = ctx.open(BackendKind::Cli);

    assert_eq!(repo.status(None).unwrap(), repo.status(None).unwrap());
}

#[test]
fn do_status_uses_given_directory() {
    let ctx = TestContext::setup();
    ctx.svn.set_output("status.out", "M       a.c\n");
    let repo = ctx.open(BackendKind::Cli);
    let other = ctx.dir.child("sub");
    fs::create_dir(&other).unwrap();

    assert_eq!(
        code(repo.do_status(&other, None).unwrap()),
        Some("D ".to_string())
    );
    assert_eq!(
        ctx.svn.calls(),
        vec![format!(
            "status --non-interactive --depth infinity --ignore-externals {}",
            other.display()
        )]
    );
}

#[test]
fn file_status_queries_single_path() {
    let ctx = TestContext::setup();
    fs::write(ctx.dir.child("a.txt"), "hello").unwrap();
    ctx.svn.set_output("status.out", "M       a.txt\n");
    let repo = ctx.open(BackendKind::Cli);

    assert_eq!(
        code(repo.status(Some(Path::new("a.txt"))).unwrap()),
        Some("D ".to_string())
    );
    assert_eq!(ctx.svn.calls(), vec!["status --non-interactive a.txt"]);
}

#[test]
fn file_status_is_cached() {
    let ctx = TestContext::setup();
    fs::write(ctx.dir.child("a.txt"), "hello").unwrap();
    ctx.svn.set_output("status.out", "?       a.txt\n");
    let repo = ctx.open(BackendKind::Cli);

    let first = repo.status(Some(Path::new("a.txt"))).unwrap();
    let second = repo.status(Some(Path::new("a.txt"))).unwrap();

    assert_eq!(first, second);
    assert_eq!(code(first), Some(" U".to_string()));
    assert_eq!(ctx.svn.calls().len(), 1);
}

#[test]
fn do_status_with_path_goes_through_cache() {
    let ctx = TestContext::setup();
    fs::write(ctx.dir.child("a.txt"), "hello").unwrap();
    ctx.svn.set_output("status.out", "M       a.txt\n");
    let repo = ctx.open(BackendKind::Cli);

    repo.status(Some(Path::new("a.txt"))).unwrap();
    repo.do_status(repo.directory(), Some(Path::new("a.txt")))
        .unwrap();

    assert_eq!(ctx.svn.calls().len(), 1);
}

#[test]
fn file_change_invalidates_cache() {
    let ctx = TestContext::setup();
    fs::write(ctx.dir.child("a.txt"), "hello").unwrap();
    ctx.svn.set_output("status.out", "");
    let repo = ctx.open(BackendKind::Cli);

    assert_eq!(repo.status(Some(Path::new("a.txt"))).unwrap(), None);

    fs::write(ctx.dir.child("a.txt"), "hello, world").unwrap();
    ctx.svn.set_output("status.out", "M       a.txt\n");

    assert_eq!(
        code(repo.status(Some(Path::new("a.txt"))).unwrap()),
        Some("D ".to_string())
    );
    assert_eq!(ctx.svn.calls().len(), 2);
}

#[test]
fn dirstate_change_invalidates_cache() {
    let ctx = TestContext::setup();
    fs::write(ctx.dir.child("a.txt"), "hello").unwrap();
    ctx.svn.set_output("status.out", "?       a.txt\n");
    let repo = ctx.open(BackendKind::Cli);

    assert_eq!(
        code(repo.status(Some(Path::new("a.txt"))).unwrap()),
        Some(" U".to_string())
    );

    // svn add
    fs::write(ctx.dir.child(".svn/wc.db"), "after svn add").unwrap();
    ctx.svn.set_output("status.out", "A       a.txt\n");

    assert_eq!(
        code(repo.status(Some(Path::new("a.txt"))).unwrap()),
        Some("D ".to_string())
    );
    assert_eq!(ctx.svn.calls().len(), 2);
}

#[test]
fn notify_cache_sees_file_in_new_directory() {
    let ctx = TestContext::setup();
    ctx.svn.set_output("status.out", "");
    let config = SvnConfig {
        watcher: WatcherKind::Notify,
        ..ctx.svn.config(BackendKind::Cli)
    };
    let repo = Repository::open(ctx.dir.path(), &config).unwrap();
    let path = Path::new("newdir/notes.txt");

    assert_eq!(repo.status(Some(path)).unwrap(), None);

    fs::create_dir(ctx.dir.child("newdir")).unwrap();
    fs::write(ctx.dir.child("newdir/notes.txt"), "todo").unwrap();
    ctx.svn.set_output("status.out", "?       newdir/notes.txt\n");

    assert_eq!(code(repo.status(Some(path)).unwrap()), Some(" U".to_string()));
    assert_eq!(ctx.svn.calls().len(), 2);
}

#[test]
fn missing_executable_fails_construction() {
    let ctx = TestContext::setup();
    let config = SvnConfig {
        executable: ctx.svn.dir.child("not-svn"),
        backend: BackendKind::Cli,
        watcher: WatcherKind::Stat,
    };

    let err = Repository::open(ctx.dir.path(), &config)
        .err()
        .expect("construction should fail");

    assert!(Error::is_svn_unavailable(&*err));
    assert_eq!(ctx.svn.calls(), Vec::<String>::new());
}

#[test]
fn relative_directory_is_made_absolute() {
    let ctx = TestContext::setup();
    let repo = ctx.open(BackendKind::Cli);
    assert!(repo.directory().is_absolute());

    let relative = Repository::new(
        "some/working-copy",
        WatcherKind::Stat,
        Backend::CommandLine(ctx.svn.command()),
    )
    .unwrap();
    assert!(relative.directory().is_absolute());
    assert!(relative.directory().ends_with("some/working-copy"));
    assert_eq!(relative.create_watcher(), WatcherKind::Stat);
}
