use super::{Info, StatusEntry, StatusKind, StatusScope, info_args, status_args};
use crate::{Res, process::SvnCommand};
use regex::Regex;
use std::{borrow::Cow, ffi::OsStr, path::Path, str::FromStr, sync::LazyLock};

/// Structured access to a working copy, as a native Subversion binding offers it.
pub trait NativeClient: Send + Sync {
    fn status(&self, directory: &Path, scope: StatusScope<'_>) -> Res<Vec<StatusEntry>>;

    /// `None` when there is nothing to report, for example outside a working copy.
    fn info(&self, directory: &Path) -> Res<Option<Info>>;
}

/// Structured client reading the `--xml` output of the `svn` executable.
#[derive(Debug, Clone)]
pub struct XmlClient {
    svn: SvnCommand,
}

impl XmlClient {
    pub fn new(svn: SvnCommand) -> Self {
        Self { svn }
    }
}

impl NativeClient for XmlClient {
    fn status(&self, directory: &Path, scope: StatusScope<'_>) -> Res<Vec<StatusEntry>> {
        let mut args = status_args(directory, scope);
        args.insert(1, OsStr::new("--xml"));

        Ok(parse_status_xml(&self.svn.read_to_string(directory, &args)?))
    }

    fn info(&self, directory: &Path) -> Res<Option<Info>> {
        Ok(parse_info_xml(&self.svn.read_to_string(directory, &info_args())?))
    }
}

static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<entry\s+path="([^"]*)"[^>]*>\s*<wc-status\s[^>]*?\bitem="([^"]*)""#).unwrap()
});
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<url>([^<]*)</url>").unwrap());
static ROOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<root>([^<]*)</root>").unwrap());

fn parse_status_xml(xml: &str) -> Vec<StatusEntry> {
    ENTRY_REGEX
        .captures_iter(xml)
        .filter_map(|caps| {
            let item = &caps[2];
            let Ok(kind) = StatusKind::from_str(item) else {
                log::debug!("Skipping unknown status item {:?}", item);
                return None;
            };

            Some(StatusEntry {
                path: unescape(&caps[1]).into_owned().into(),
                kind,
            })
        })
        .collect()
}

fn parse_info_xml(xml: &str) -> Option<Info> {
    let url = URL_REGEX.captures(xml).map(|caps| unescape(&caps[1]).into_owned());
    let root = ROOT_REGEX.captures(xml).map(|caps| unescape(&caps[1]).into_owned());

    if url.is_none() && root.is_none() {
        return None;
    }

    let default = Info::default();
    Some(Info {
        url: url.unwrap_or(default.url),
        root: root.unwrap_or(default.root),
    })
}

fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&"),
    )
}
