//! Directory walking shared by every subcommand.
//!
//! Two views of a tree are needed:
//!
//! - [`collect_entries`]: one directory level, for the summarizer, which
//!   decides per entry whether to recurse.
//! - [`find_files`]: every file with an extension, at any depth, for the
//!   bulk rewriters (fences, renames, viewport tags).
//!
//! Both return paths sorted, so repeated runs over the same tree see the
//! same order. Only the recursive walk skips hidden directories (`.git`,
//! `.obsidian`); a single-level listing reports every entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Direct children of `dir`, sorted by path. An entry that cannot be read
/// fails the whole listing.
pub fn collect_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;

    entries.sort();
    Ok(entries)
}

/// Every regular file under `root` whose extension matches `extension`
/// (case-insensitive), at any depth, sorted by path.
///
/// Hidden directories are not descended into. Unreadable subdirectories
/// fail the whole walk.
pub fn find_files(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Regular files directly inside `dir` with the given extension, sorted.
pub fn files_in_dir(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    Ok(collect_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file() && has_extension(p, extension))
        .collect())
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Join a path's components with `/`, whatever the platform separator.
pub fn forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
