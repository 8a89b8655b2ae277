//! CLI output formatting for every subcommand.
//!
//! Each subcommand has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! Paths are shown relative to the directory the user passed, so output
//! reads the same wherever the command runs:
//!
//! ```text
//! Renamed: chapter 1/page one.md -> chapter 1/page-one.md
//! Tagged code fences in 3 of 12 markdown files
//!     intro.md
//!     guide/setup.md
//!     guide/usage.md
//! ```

use crate::fences::FenceReport;
use crate::naming::Rename;
use crate::scan;
use crate::viewport::ZoomReport;
use std::path::{Path, PathBuf};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `root` when possible, forward slashes.
fn display_path(path: &Path, root: &Path) -> String {
    scan::forward_slashes(path.strip_prefix(root).unwrap_or(path))
}

/// Directory name as typed, or its last component.
fn dir_label(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn changed_files(changed: &[PathBuf], root: &Path) -> impl Iterator<Item = String> {
    changed
        .iter()
        .map(move |p| format!("{}{}", indent(1), display_path(p, root)))
}

// ============================================================================
// fences
// ============================================================================

pub fn format_fence_output(report: &FenceReport, dir: &Path) -> Vec<String> {
    if report.scanned == 0 {
        return vec![format!("No markdown files found in {}", dir.display())];
    }
    let mut lines = vec![format!(
        "Tagged code fences in {} of {} markdown files",
        report.changed.len(),
        report.scanned
    )];
    lines.extend(changed_files(&report.changed, dir));
    lines.push(format!("Code fence tagging on {} complete!", dir_label(dir)));
    lines
}

pub fn print_fence_output(report: &FenceReport, dir: &Path) {
    for line in format_fence_output(report, dir) {
        println!("{}", line);
    }
}

// ============================================================================
// notebooks
// ============================================================================

pub fn format_notebook_output(converted: &[(PathBuf, PathBuf)], input_dir: &Path) -> Vec<String> {
    if converted.is_empty() {
        return vec![format!("No notebooks found in {}", input_dir.display())];
    }
    let mut lines: Vec<String> = converted
        .iter()
        .map(|(notebook, markdown)| {
            let name = notebook
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("Converted {} → {}", name, markdown.display())
        })
        .collect();
    lines.push("Conversion complete!".to_string());
    lines
}

pub fn print_notebook_output(converted: &[(PathBuf, PathBuf)], input_dir: &Path) {
    for line in format_notebook_output(converted, input_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// dashes
// ============================================================================

pub fn format_rename_output(renames: &[Rename], dir: &Path) -> Vec<String> {
    if renames.is_empty() {
        return vec![format!("No file names with spaces in {}", dir.display())];
    }
    renames
        .iter()
        .map(|r| {
            format!(
                "Renamed: {} -> {}",
                display_path(&r.from, dir),
                display_path(&r.to, dir)
            )
        })
        .collect()
}

pub fn print_rename_output(renames: &[Rename], dir: &Path) {
    for line in format_rename_output(renames, dir) {
        println!("{}", line);
    }
}

// ============================================================================
// zoom
// ============================================================================

pub fn format_zoom_output(report: &ZoomReport, dir: &Path) -> Vec<String> {
    if report.scanned == 0 {
        return vec![format!("No HTML files found in {}", dir.display())];
    }
    let mut lines = vec![format!(
        "Enabled zoom in {} of {} HTML files",
        report.changed.len(),
        report.scanned
    )];
    lines.extend(changed_files(&report.changed, dir));
    lines.push(format!("Finger zoom on {} complete!", dir_label(dir)));
    lines
}

pub fn print_zoom_output(report: &ZoomReport, dir: &Path) {
    for line in format_zoom_output(report, dir) {
        println!("{}", line);
    }
}
