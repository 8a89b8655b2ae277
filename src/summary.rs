//! Documentation tree summarizer.
//!
//! Builds a `SUMMARY.md` outline from the front matter of a documentation
//! tree. The directory layout decides the structure; front matter decides
//! titles and order.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/
//! ├── README.md              # Root page (title: Docs)
//! ├── getting-started/       # Chapter: has README.md with front matter
//! │   ├── README.md          # title: Getting Started, nav_order: 1
//! │   ├── install.md         # title: Installation, nav_order: 2
//! │   └── quickstart.md      # title: Quickstart, nav_order: 1
//! └── guide/
//!     ├── README.md          # title: Guide, nav_order: 2
//!     └── configuration.md
//! ```
//!
//! ## Output
//!
//! ```text
//! # Summary
//!
//! ### Docs
//! * [Docs](./README.md)
//!
//! ### Getting Started
//! * [Quickstart](getting-started/quickstart.md)
//! * [Installation](getting-started/install.md)
//!
//!
//! ### Guide
//! * [Configuration](guide/configuration.md)
//! ```
//!
//! ## Rules
//!
//! - A directory is a page only if its `README.md` has front matter.
//!   Otherwise it becomes an empty, title-less placeholder chapter (or is
//!   left out when `missing_readme = "skip"`), and nothing below it is read.
//! - A `README.md` page's children are its subdirectories plus sibling
//!   `*.md` files that have front matter.
//! - Siblings are ordered by `nav_order`; pages without one go last. Ties
//!   keep file-name order.
//! - Only two levels render: root children are `###` chapters, their
//!   children are bullets. Anything deeper is never emitted.
//! - Any unreadable file or non-numeric `nav_order` fails the whole run.

use crate::config::{MissingReadme, SummaryConfig};
use crate::frontmatter::{self, FrontMatterError};
use crate::scan;
use crate::types::Page;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Directory nesting deeper than {max_depth} levels at {}", path.display())]
    DepthExceeded { path: PathBuf, max_depth: usize },
}

/// Build the page tree rooted at `root`.
///
/// The root itself is always returned, as a placeholder if its `README.md`
/// has no front matter.
pub fn build_tree(root: &Path, config: &SummaryConfig) -> Result<Page, SummaryError> {
    if !root.is_dir() {
        return Err(SummaryError::NotADirectory(root.to_path_buf()));
    }
    Ok(build_directory(root, config, 0)?.unwrap_or_else(Page::placeholder))
}

/// Resolve one directory to its `README.md` page with children attached.
///
/// `Ok(None)` means the directory has no readable front matter.
fn build_directory(
    dir: &Path,
    config: &SummaryConfig,
    depth: usize,
) -> Result<Option<Page>, SummaryError> {
    if depth > config.max_depth {
        return Err(SummaryError::DepthExceeded {
            path: dir.to_path_buf(),
            max_depth: config.max_depth,
        });
    }

    let readme_path = dir.join(&config.readme);
    // Only a README that is absent counts as no metadata. One that exists
    // but cannot be read (dangling link, no permission) fails the run.
    let readme = match fs::symlink_metadata(&readme_path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        _ => frontmatter::read_page(&readme_path)?,
    };
    let Some(mut readme) = readme else {
        tracing::debug!("No {} front matter in {}", config.readme, dir.display());
        return Ok(None);
    };

    for entry in scan::collect_entries(dir)? {
        if entry.is_dir() {
            match build_directory(&entry, config, depth + 1)? {
                Some(page) => readme.children.push(page),
                None => match config.missing_readme {
                    MissingReadme::Placeholder => readme.children.push(Page::placeholder()),
                    MissingReadme::Skip => {
                        tracing::debug!("Skipping {}", entry.display());
                    }
                },
            }
        } else if is_markdown(&entry) && !is_readme(&entry, config) {
            match frontmatter::read_page(&entry)? {
                Some(page) => readme.children.push(page),
                None => tracing::debug!("No front matter in {}, skipped", entry.display()),
            }
        }
    }

    readme.sort_children();
    Ok(Some(readme))
}

/// Exact `.md` suffix; `page.MD` is not a page.
fn is_markdown(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("md"))
}

fn is_readme(path: &Path, config: &SummaryConfig) -> bool {
    path.file_name()
        .map(|n| n == config.readme.as_str())
        .unwrap_or(false)
}

/// Render the two-level outline for a tree built from `root`.
///
/// Pure: performs no I/O. Pages without a title render with an empty one.
/// Chapter children without a path (placeholders) have nothing to link to
/// and are left out.
pub fn render_summary(tree: &Page, root: &Path, config: &SummaryConfig) -> String {
    let mut lines = vec!["# Summary".to_string()];
    lines.push(format!("\n### {}", tree.display_title()));
    lines.push(format!(
        "* [{}](./{})",
        tree.display_title(),
        config.readme
    ));

    for chapter in &tree.children {
        lines.push(format!("\n### {}", chapter.display_title()));
        for page in &chapter.children {
            let Some(path) = &page.path else {
                continue;
            };
            lines.push(format!(
                "* [{}]({})",
                page.display_title(),
                relative_link(path, root)
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// `path` relative to `root`, joined with forward slashes.
pub fn relative_link(path: &Path, root: &Path) -> String {
    scan::forward_slashes(path.strip_prefix(root).unwrap_or(path))
}

/// Build and render in one step. Nothing is returned unless the whole tree
/// parsed cleanly.
pub fn generate_summary(root: &Path, config: &SummaryConfig) -> Result<String, SummaryError> {
    let tree = build_tree(root, config)?;
    Ok(render_summary(&tree, root, config))
}
