use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<url>(.+)</url>").unwrap());
static ROOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<root>(.+)</root>").unwrap());

const UNKNOWN_URL: &str = "<unknown>";

/// Repository location of a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub url: String,
    pub root: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            url: UNKNOWN_URL.to_string(),
            root: String::new(),
        }
    }
}

impl Info {
    /// Scans `svn info --xml` output one line at a time. The first `<url>` and the
    /// first `<root>` line win; lines matching the url pattern are not tried as root.
    pub(crate) fn from_xml_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = None;
        let mut root = None;

        for line in lines {
            let line = line.as_ref();
            if let Some(caps) = URL_REGEX.captures(line) {
                url.get_or_insert_with(|| caps[1].to_string());
            } else if let Some(caps) = ROOT_REGEX.captures(line) {
                root.get_or_insert_with(|| caps[1].to_string());
            }

            if url.is_some() && root.is_some() {
                break;
            }
        }

        let default = Info::default();
        Info {
            url: url.unwrap_or(default.url),
            root: root.unwrap_or(default.root),
        }
    }

    /// Path of the working copy relative to the repository root, with
    /// `branches/` shortened to `b/` and `tags/` to `t/`.
    ///
    /// The shortening is a plain substring replacement, so it also applies to
    /// names that merely contain `branches/` or `tags/`.
    pub fn branch_label(&self) -> String {
        let root_prefix = format!("{}/", self.root);
        let relative = self.url.strip_prefix(&root_prefix).unwrap_or(&self.url);

        relative.replace("branches/", "b/").replace("tags/", "t/")
    }
}
