//! Web-safe markdown file names.
//!
//! Spaces in file names turn into `%20` in published URLs and break
//! relative links written by hand. Every space in a markdown file's name is
//! replaced with a dash:
//!
//! - `page one.md` → `page-one.md`
//! - `Release  Notes.md` → `Release--Notes.md` (each space maps to one dash)
//! - `chapter 1/page one.md` → `chapter 1/page-one.md` (directories are kept)

use crate::scan;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot rename {} to {}: target already exists", from.display(), to.display())]
    RenameConflict { from: PathBuf, to: PathBuf },
}

/// A rename that was carried out.
#[derive(Debug, Clone, PartialEq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// File name with spaces replaced by dashes, or `None` if it has no spaces.
pub fn dashed_file_name(name: &str) -> Option<String> {
    name.contains(' ').then(|| name.replace(' ', "-"))
}

/// Rename every `*.md` file under `dir` whose name contains spaces.
///
/// Stops at the first rename whose target already exists; files renamed
/// before that point stay renamed.
pub fn replace_spaces_with_dashes(dir: &Path) -> Result<Vec<Rename>, RenameError> {
    let mut renames = Vec::new();
    for from in scan::find_files(dir, "md")? {
        let Some(name) = from.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let Some(dashed) = dashed_file_name(&name) else {
            continue;
        };

        let to = from.with_file_name(dashed);
        if to.exists() {
            return Err(RenameError::RenameConflict { from, to });
        }
        fs::rename(&from, &to)?;
        tracing::debug!("Renamed {} → {}", from.display(), to.display());
        renames.push(Rename { from, to });
    }
    Ok(renames)
}
