//! Front matter parsing for markdown pages.
//!
//! A page's navigational metadata lives in a block at the very top of the
//! file, fenced by lines containing only `---`:
//!
//! ```text
//! ---
//! title: Getting Started
//! nav_order: 2
//! has_children: true
//! ---
//! # Getting Started
//! ```
//!
//! The block is a flat list of `key: value` lines, not full YAML. Only
//! three keys are recognized; everything else (`layout`, `parent`,
//! `permalink`, ...) is ignored:
//!
//! | Key | Type | Rule |
//! |-----|------|------|
//! | `title` | string | trimmed, kept verbatim (quotes included) |
//! | `nav_order` | float | must parse as a number, otherwise the run fails |
//! | `has_children` | bool | `true` in any case is true, anything else false |
//!
//! When `title` is missing, the first `# heading` anywhere in the file is
//! used instead. A file without the block contributes nothing to the
//! summary; this is `Ok(None)`, not an error.

use crate::types::Page;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("Cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("nav_order {value:?} in {} is not a number", path.display())]
    MalformedNavOrder { path: PathBuf, value: String },
}

/// The recognized front matter keys, typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub nav_order: Option<f64>,
    pub has_children: bool,
}

impl FrontMatter {
    /// Parse the front matter block at the top of `content`.
    ///
    /// Returns `Ok(None)` when the file has no block. An empty block
    /// (`---` immediately followed by `---`) is `Ok(Some(default))`.
    /// `path` is only used to label errors.
    pub fn parse(content: &str, path: &Path) -> Result<Option<Self>, FrontMatterError> {
        let Some(block) = front_matter_block(content) else {
            return Ok(None);
        };

        let mut front_matter = FrontMatter::default();
        for line in block {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "title" => front_matter.title = Some(value.to_string()),
                "nav_order" => {
                    let order = value.parse::<f64>().map_err(|_| {
                        FrontMatterError::MalformedNavOrder {
                            path: path.to_path_buf(),
                            value: value.to_string(),
                        }
                    })?;
                    front_matter.nav_order = Some(order);
                }
                "has_children" => front_matter.has_children = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }
        Ok(Some(front_matter))
    }
}

/// Lines between the opening and closing `---` delimiters.
///
/// The opening delimiter must be the first line of the file. An unclosed
/// block is treated as no block at all.
fn front_matter_block(content: &str) -> Option<Vec<&str>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();
    if !is_delimiter(lines.next()?) {
        return None;
    }

    let mut block = Vec::new();
    for line in lines {
        if is_delimiter(line) {
            return Some(block);
        }
        block.push(line);
    }
    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

/// First `# heading` in the raw file, front matter block included.
pub fn first_heading(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix("# "))
        .map(|rest| rest.trim().to_string())
}

/// Read a markdown file into a [`Page`] with no children.
///
/// Returns `Ok(None)` when the file has no front matter block.
pub fn read_page(path: &Path) -> Result<Option<Page>, FrontMatterError> {
    let content = fs::read_to_string(path).map_err(|source| FrontMatterError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(front_matter) = FrontMatter::parse(&content, path)? else {
        return Ok(None);
    };

    let title = front_matter.title.or_else(|| first_heading(&content));

    Ok(Some(Page {
        title,
        nav_order: front_matter.nav_order,
        has_children: front_matter.has_children,
        path: Some(path.to_path_buf()),
        children: Vec::new(),
    }))
}
