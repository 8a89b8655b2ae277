//! Legacy toctree index to markdown outline.
//!
//! Older documentation trees list their pages in a toctree directive inside
//! an index file, either reStructuredText style or MyST fenced style:
//!
//! ```text
//! # Main Title
//!
//! .. toctree::
//!    :maxdepth: 2
//!
//!    chapter1/index
//!    Setup <chapter2/page1>
//!    chapter2/page2
//! ```
//!
//! ````text
//! # Main Title
//!
//! ```{toctree}
//! chapter1/index
//! chapter2/page1
//! ```
//! ````
//!
//! becomes
//!
//! ```text
//! # Main Title
//! ## Chapter One
//! * [chapter1/intro](chapter1/intro.md)
//! * [Setup](chapter2/page1.md)
//! * [chapter2/page2](chapter2/page2.md)
//! ```
//!
//! Entries ending in `index` are nested index files: their outline is
//! spliced in place with every heading pushed one level deeper. Links are
//! relative to a base directory and always end in `.md`.

use crate::scan;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static LABELED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*<([^<>]+)>$").expect("valid regex"));

#[derive(Error, Debug)]
pub enum ToctreeError {
    #[error("Cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No '#' title line in {}", .0.display())]
    MissingTitle(PathBuf),
    #[error("{} is outside the base directory {}", path.display(), base.display())]
    OutsideBase { path: PathBuf, base: PathBuf },
    #[error("Index files nested deeper than {max_depth} levels at {}", path.display())]
    DepthExceeded { path: PathBuf, max_depth: usize },
    #[error("Index {} includes itself", .0.display())]
    Cycle(PathBuf),
}

/// One line inside a toctree directive.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Explicit `Label <target>` label, if given
    pub label: Option<String>,
    pub target: String,
}

impl TocEntry {
    fn parse(line: &str) -> Self {
        if let Some(caps) = LABELED_ENTRY.captures(line) {
            let label = caps[1].trim();
            return Self {
                label: (!label.is_empty()).then(|| label.to_string()),
                target: caps[2].trim().to_string(),
            };
        }
        Self {
            label: None,
            target: line.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.target)
    }

    pub fn is_index(&self) -> bool {
        strip_doc_suffix(&self.target).ends_with("index")
    }

    pub fn is_external(&self) -> bool {
        self.target.starts_with("http://") || self.target.starts_with("https://")
    }
}

/// A parsed index file: its title and every toctree entry, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct TocIndex {
    pub title_level: usize,
    pub title: String,
    pub entries: Vec<TocEntry>,
}

#[derive(Clone, Copy, PartialEq)]
enum Directive {
    Rst,
    Myst,
}

/// Parse an index file's content. Returns `None` when it has no title line.
pub fn parse_index(content: &str) -> Option<TocIndex> {
    let title_line = content.lines().map(str::trim).find(|l| l.starts_with('#'))?;
    let title_level = title_line.chars().take_while(|&c| c == '#').count();
    let title = title_line[title_level..].trim().to_string();

    let mut entries = Vec::new();
    let mut directive: Option<Directive> = None;
    for line in content.lines() {
        let trimmed = line.trim();
        match directive {
            None => {
                if trimmed.starts_with(".. toctree::") {
                    directive = Some(Directive::Rst);
                } else if trimmed.starts_with("```{toctree}") || trimmed.starts_with(":::{toctree}") {
                    directive = Some(Directive::Myst);
                }
            }
            Some(style) => {
                if trimmed.is_empty() || trimmed.starts_with(':') && !trimmed.starts_with(":::") {
                    continue;
                }
                let closes_fence = trimmed.starts_with("```") || trimmed.starts_with(":::");
                let dedented = style == Directive::Rst && !line.starts_with([' ', '\t']);
                if (style == Directive::Myst && closes_fence) || dedented {
                    directive = None;
                    continue;
                }
                if trimmed == "self" {
                    continue;
                }
                entries.push(TocEntry::parse(trimmed));
            }
        }
    }

    Some(TocIndex {
        title_level,
        title,
        entries,
    })
}

/// Convert an index file into a markdown outline.
///
/// `index` may omit its `.md` suffix. Links are made relative to `base`.
pub fn toctree_to_summary(
    index: &Path,
    base: &Path,
    max_depth: usize,
) -> Result<String, ToctreeError> {
    let base = fs::canonicalize(base).map_err(|source| ToctreeError::UnreadableFile {
        path: base.to_path_buf(),
        source,
    })?;
    let mut stack = Vec::new();
    convert(&doc_path(index), &base, max_depth, &mut stack)
}

fn convert(
    index: &Path,
    base: &Path,
    max_depth: usize,
    stack: &mut Vec<PathBuf>,
) -> Result<String, ToctreeError> {
    let index = fs::canonicalize(index).map_err(|source| ToctreeError::UnreadableFile {
        path: index.to_path_buf(),
        source,
    })?;
    if stack.contains(&index) {
        return Err(ToctreeError::Cycle(index));
    }
    if stack.len() >= max_depth {
        return Err(ToctreeError::DepthExceeded {
            path: index,
            max_depth,
        });
    }

    let content = fs::read_to_string(&index).map_err(|source| ToctreeError::UnreadableFile {
        path: index.clone(),
        source,
    })?;
    let parsed = parse_index(&content).ok_or_else(|| ToctreeError::MissingTitle(index.clone()))?;
    tracing::debug!(
        "{}: {} toctree entries",
        index.display(),
        parsed.entries.len()
    );

    let dir = index.parent().unwrap_or(Path::new("")).to_path_buf();
    let level = (parsed.title_level + stack.len()).min(6);
    let mut out = format!("{} {}\n", "#".repeat(level), parsed.title);

    stack.push(index.clone());
    for entry in &parsed.entries {
        if entry.is_external() {
            out.push_str(&format!("* [{}]({})\n", entry.label(), entry.target));
        } else if entry.is_index() {
            let nested = dir.join(doc_path(Path::new(&entry.target)));
            out.push_str(&convert(&normalize(&nested), base, max_depth, stack)?);
        } else {
            let target = normalize(&dir.join(doc_path(Path::new(&entry.target))));
            let relative = target
                .strip_prefix(base)
                .map_err(|_| ToctreeError::OutsideBase {
                    path: target.clone(),
                    base: base.to_path_buf(),
                })?;
            out.push_str(&format!(
                "* [{}]({})\n",
                entry.label(),
                scan::forward_slashes(relative)
            ));
        }
    }
    stack.pop();

    Ok(out)
}

/// `target` with any `.md`/`.rst` suffix replaced by `.md`.
fn doc_path(target: &Path) -> PathBuf {
    let text = target.to_string_lossy();
    PathBuf::from(format!("{}.md", strip_doc_suffix(&text)))
}

fn strip_doc_suffix(target: &str) -> &str {
    let path = Path::new(target);
    if scan::has_extension(path, "md") || scan::has_extension(path, "rst") {
        &target[..target.len() - path.extension().map(|e| e.len() + 1).unwrap_or(0)]
    } else {
        target
    }
}

/// Resolve `.` and `..` lexically, without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_tree;
    use tempfile::TempDir;

    const ROOT_INDEX: &str = "# Main Title\n\
\n\
.. toctree::\n   :maxdepth: 2\n\n   chapter1/index\n   Setup <chapter2/page1>\n   chapter2/page2\n";

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("index.md", ROOT_INDEX),
                (
                    "chapter1/index.md",
                    "# Chapter One\n\n.. toctree::\n\n   intro\n   ../shared/glossary\n",
                ),
            ],
        );
        tmp
    }

    #[test]
    fn parse_rst_directive() {
        let index = parse_index(ROOT_INDEX).unwrap();
        assert_eq!(index.title, "Main Title");
        assert_eq!(index.title_level, 1);
        let targets: Vec<&str> = index.entries.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["chapter1/index", "chapter2/page1", "chapter2/page2"]);
        assert_eq!(index.entries[1].label(), "Setup");
        assert_eq!(index.entries[2].label(), "chapter2/page2");
    }

    #[test]
    fn parse_myst_directive() {
        let content = "## Guide\n\n```{toctree}\n:maxdepth: 1\n\ninstall\nusage\n```\n\nTrailing text\n";
        let index = parse_index(content).unwrap();
        assert_eq!(index.title_level, 2);
        assert_eq!(index.title, "Guide");
        let targets: Vec<&str> = index.entries.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["install", "usage"]);
    }

    #[test]
    fn rst_block_ends_at_dedent() {
        let content = "# T\n.. toctree::\n   a\n   b\nNot an entry\n   c\n";
        let index = parse_index(content).unwrap();
        assert_eq!(index.entries.len(), 2);
    }

    #[test]
    fn self_entries_are_skipped() {
        let index = parse_index("# T\n.. toctree::\n   self\n   page\n").unwrap();
        assert_eq!(index.entries, vec![TocEntry::parse("page")]);
    }

    #[test]
    fn missing_title_is_none() {
        assert!(parse_index(".. toctree::\n   page\n").is_none());
    }

    #[test]
    fn entry_classification() {
        assert!(TocEntry::parse("chapter/index").is_index());
        assert!(TocEntry::parse("chapter/index.md").is_index());
        assert!(!TocEntry::parse("chapter/indexing-basics").is_index());
        assert!(TocEntry::parse("Repo <https://example.com>").is_external());
    }

    #[test]
    fn converts_nested_indexes() {
        let tmp = fixture();
        let summary = toctree_to_summary(&tmp.path().join("index"), tmp.path(), 16).unwrap();
        assert_eq!(
            summary,
            "# Main Title\n\
## Chapter One\n\
* [intro](chapter1/intro.md)\n\
* [../shared/glossary](shared/glossary.md)\n\
* [Setup](chapter2/page1.md)\n\
* [chapter2/page2](chapter2/page2.md)\n"
        );
    }

    #[test]
    fn links_relative_to_base() {
        let tmp = fixture();
        let summary =
            toctree_to_summary(&tmp.path().join("chapter1/index.md"), tmp.path(), 16).unwrap();
        assert!(summary.starts_with("# Chapter One\n"));
        assert!(summary.contains("* [intro](chapter1/intro.md)\n"));
    }

    #[test]
    fn rst_suffix_is_replaced() {
        let tmp = fixture();
        let summary = toctree_to_summary(&tmp.path().join("index.rst"), tmp.path(), 16).unwrap();
        assert!(summary.starts_with("# Main Title\n"));
    }

    #[test]
    fn target_outside_base_is_error() {
        let tmp = fixture();
        let result = toctree_to_summary(
            &tmp.path().join("chapter1/index"),
            &tmp.path().join("chapter1"),
            16,
        );
        assert!(matches!(result, Err(ToctreeError::OutsideBase { .. })));
    }

    #[test]
    fn missing_nested_index_is_error() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[("index.md", "# Root\n.. toctree::\n   missing/index\n")],
        );
        let result = toctree_to_summary(&tmp.path().join("index"), tmp.path(), 16);
        assert!(matches!(result, Err(ToctreeError::UnreadableFile { .. })));
    }

    #[test]
    fn cycle_is_error() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("index.md", "# Root\n.. toctree::\n   a/index\n"),
                ("a/index.md", "# A\n.. toctree::\n   ../index\n"),
            ],
        );
        let result = toctree_to_summary(&tmp.path().join("index"), tmp.path(), 16);
        assert!(matches!(result, Err(ToctreeError::Cycle(_))));
    }

    #[test]
    fn depth_limit_is_error() {
        let tmp = fixture();
        let result = toctree_to_summary(&tmp.path().join("index"), tmp.path(), 1);
        assert!(matches!(
            result,
            Err(ToctreeError::DepthExceeded { max_depth: 1, .. })
        ));
    }

    #[test]
    fn external_links_pass_through() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[(
                "index.md",
                "# Root\n.. toctree::\n   Source <https://example.com/repo>\n",
            )],
        );
        let summary = toctree_to_summary(&tmp.path().join("index"), tmp.path(), 16).unwrap();
        assert_eq!(summary, "# Root\n* [Source](https://example.com/repo)\n");
    }

    #[test]
    fn normalize_resolves_parent_components() {
        assert_eq!(
            normalize(Path::new("/docs/a/../b/./c.md")),
            PathBuf::from("/docs/b/c.md")
        );
    }
}
