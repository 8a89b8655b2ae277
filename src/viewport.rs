//! Pinch zoom for generated HTML.
//!
//! Some documentation themes ship `<meta name="viewport"
//! content="width=device-width, user-scalable=no">`, which blocks zooming on
//! phones. This rewrites `user-scalable=no` (or `=0`, with optional spaces
//! around `=`) to `user-scalable=yes` in every `*.html` file under a
//! directory.

use crate::scan;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static NO_USER_SCALING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)user-scalable\s*=\s*(?:no|0)\b").expect("valid regex")
});

#[derive(Error, Debug)]
pub enum ViewportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of patching every HTML file in a directory.
#[derive(Debug, Default)]
pub struct ZoomReport {
    pub scanned: usize,
    pub changed: Vec<PathBuf>,
}

/// Allow user scaling in one document. Borrowed when nothing changed.
pub fn enable_zoom(html: &str) -> Cow<'_, str> {
    NO_USER_SCALING.replace_all(html, "user-scalable=yes")
}

/// Patch every `*.html` file under `dir`, writing only changed files.
pub fn enable_finger_zoom(dir: &Path) -> Result<ZoomReport, ViewportError> {
    let files = scan::find_files(dir, "html")?;
    let mut report = ZoomReport {
        scanned: files.len(),
        ..ZoomReport::default()
    };

    for file in files {
        let content = fs::read_to_string(&file)?;
        if let Cow::Owned(updated) = enable_zoom(&content) {
            fs::write(&file, updated)?;
            tracing::debug!("Enabled zoom in {}", file.display());
            report.changed.push(file);
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_tree;
    use tempfile::TempDir;

    const PAGE: &str = r#"<head><meta name="viewport" content="width=device-width, initial-scale=1, user-scalable=no"></head>"#;

    #[test]
    fn rewrites_user_scalable_no() {
        assert_eq!(
            enable_zoom(PAGE),
            r#"<head><meta name="viewport" content="width=device-width, initial-scale=1, user-scalable=yes"></head>"#
        );
    }

    #[test]
    fn rewrites_spaced_and_numeric_forms() {
        assert_eq!(enable_zoom("user-scalable = no"), "user-scalable=yes");
        assert_eq!(enable_zoom("user-scalable=0,"), "user-scalable=yes,");
        assert_eq!(enable_zoom("User-Scalable=NO"), "user-scalable=yes");
    }

    #[test]
    fn leaves_other_values_alone() {
        assert!(matches!(enable_zoom("user-scalable=yes"), Cow::Borrowed(_)));
        assert!(matches!(enable_zoom("user-scalable=none-such"), Cow::Borrowed(_)));
    }

    #[test]
    fn directory_run_reports_changed_files() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("index.html", PAGE),
                ("book/chapter.html", "<p>no viewport</p>"),
                ("notes.md", "user-scalable=no"),
            ],
        );

        let report = enable_finger_zoom(tmp.path()).unwrap();
        assert_eq!(report.scanned, 2);
        assert_eq!(report.changed, vec![tmp.path().join("index.html")]);
        assert!(
            fs::read_to_string(tmp.path().join("index.html"))
                .unwrap()
                .contains("user-scalable=yes")
        );
        assert_eq!(
            fs::read_to_string(tmp.path().join("notes.md")).unwrap(),
            "user-scalable=no"
        );
    }
}
