//! Shared test utilities for the docs-kit test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let tree = build_tree(tmp.path(), &SummaryConfig::default()).unwrap();
//! assert_eq!(chapter_titles(&tree), vec!["Getting Started", "Guide", ""]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/docs/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/docs");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `(relative path, content)` pairs under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
}

/// Front matter block with the given title and optional nav_order.
pub fn front_matter(title: &str, nav_order: Option<f64>) -> String {
    match nav_order {
        Some(order) => format!("---\ntitle: {title}\nnav_order: {order}\n---\n"),
        None => format!("---\ntitle: {title}\n---\n"),
    }
}

// =========================================================================
// Tree lookups
// =========================================================================

/// Titles of the root's direct children, placeholders as "".
pub fn chapter_titles(root: &Page) -> Vec<&str> {
    root.children.iter().map(Page::display_title).collect()
}

/// Find a chapter by title. Panics if not found.
pub fn find_chapter<'a>(root: &'a Page, title: &str) -> &'a Page {
    root.children
        .iter()
        .find(|c| c.title.as_deref() == Some(title))
        .unwrap_or_else(|| panic!("chapter '{title}' not found. Available: {:?}", chapter_titles(root)))
}
