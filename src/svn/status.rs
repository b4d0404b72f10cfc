use std::{fmt::Display, path::PathBuf};
use strum::EnumString;

/// Two-character working copy summary: `D` for tracked changes, `U` for unversioned files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode {
    pub(crate) status_code: [char; 2],
}

impl StatusCode {
    pub fn is_dirty(&self) -> bool {
        self.status_code[0] == DIRTY
    }

    pub fn has_untracked(&self) -> bool {
        self.status_code[1] == UNTRACKED
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}{}",
            self.status_code[0], self.status_code[1]
        ))
    }
}

const CLEAN: char = ' ';
const DIRTY: char = 'D';
const UNTRACKED: char = 'U';

/// Leading characters of `svn status` lines that mean a tracked change.
const DIRTY_SYMBOLS: &[char] = &['A', 'D', 'R', 'M', 'C', '!', '~'];
const UNTRACKED_SYMBOL: char = '?';

/// Item kinds reported by the structured status backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    Added,
    Conflicted,
    Deleted,
    External,
    Ignored,
    Incomplete,
    Merged,
    Missing,
    Modified,
    None,
    Normal,
    Obstructed,
    Replaced,
    Unversioned,
}

impl StatusKind {
    fn is_dirty(self) -> bool {
        matches!(
            self,
            StatusKind::Added
                | StatusKind::Missing
                | StatusKind::Deleted
                | StatusKind::Replaced
                | StatusKind::Modified
                | StatusKind::Merged
                | StatusKind::Obstructed
                | StatusKind::Conflicted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: PathBuf,
    pub kind: StatusKind,
}

#[derive(Debug, Default)]
struct Accumulator {
    dirty: bool,
    untracked: bool,
}

impl Accumulator {
    fn is_saturated(&self) -> bool {
        self.dirty && self.untracked
    }

    /// Consumes records until both flags are set. No record past that point is pulled.
    fn scan<I, F>(mut self, records: I, classify: F) -> Self
    where
        I: IntoIterator,
        F: Fn(&I::Item) -> Option<Change>,
    {
        for record in records {
            match classify(&record) {
                Some(Change::Dirty) => self.dirty = true,
                Some(Change::Untracked) => self.untracked = true,
                None => (),
            }

            if self.is_saturated() {
                break;
            }
        }
        self
    }

    fn finish(self) -> Option<StatusCode> {
        if !self.dirty && !self.untracked {
            return None;
        }

        Some(StatusCode {
            status_code: [
                if self.dirty { DIRTY } else { CLEAN },
                if self.untracked { UNTRACKED } else { CLEAN },
            ],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Dirty,
    Untracked,
}

fn classify_line(line: &str) -> Option<Change> {
    let mut chars = line.chars();
    let first = chars.next()?;
    chars.next()?;

    if DIRTY_SYMBOLS.contains(&first) {
        Some(Change::Dirty)
    } else if first == UNTRACKED_SYMBOL {
        Some(Change::Untracked)
    } else {
        None
    }
}

fn classify_kind(kind: StatusKind) -> Option<Change> {
    if kind.is_dirty() {
        Some(Change::Dirty)
    } else if kind == StatusKind::Unversioned {
        Some(Change::Untracked)
    } else {
        None
    }
}

/// Reduces plain `svn status` output.
pub(crate) fn from_lines<I>(lines: I) -> Option<StatusCode>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Accumulator::default()
        .scan(lines, |line| classify_line(line.as_ref()))
        .finish()
}

/// Reduces structured status records.
pub(crate) fn from_kinds<I>(kinds: I) -> Option<StatusCode>
where
    I: IntoIterator<Item = StatusKind>,
{
    Accumulator::default()
        .scan(kinds, |kind| classify_kind(*kind))
        .finish()
}
