//! # docs-kit
//!
//! One-shot utilities for documentation source trees. Each subcommand is a
//! single synchronous pass over a directory of text files: nothing is
//! cached, nothing runs in the background, and running it twice on an
//! unchanged tree gives the same result.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`summary`] | Builds `SUMMARY.md` from front matter: directory tree → pages → two-level outline |
//! | [`frontmatter`] | Parses the `---` block at the top of a page into a typed [`frontmatter::FrontMatter`] |
//! | [`types`] | The [`types::Page`] tree shared by the summarizer and its tests |
//! | [`toctree`] | Converts a legacy toctree index into the same outline format |
//! | [`fences`] | Adds a language tag to bare markdown code fences |
//! | [`notebook`] | Converts `.ipynb` notebooks to markdown |
//! | [`naming`] | Renames markdown files so their names contain no spaces |
//! | [`viewport`] | Re-enables pinch zoom in HTML viewport tags |
//! | [`scan`] | Directory walking shared by all of the above |
//! | [`config`] | `docs-kit.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting, pure `format_*` plus `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## The Filesystem Decides Structure
//!
//! Directories are chapters, files are pages. Front matter only supplies
//! titles and ordering. `has_children` is read but never consulted: a
//! directory with pages has children whether or not it says so.
//!
//! ## All or Nothing
//!
//! A summary is built completely in memory before anything is printed or
//! written. A single unreadable file or a `nav_order` that is not a number
//! fails the run with no partial output. Fixing the file and re-running is
//! cheap.
//!
//! ## Two Levels, On Purpose
//!
//! The rendered outline has chapters and pages only. The page tree keeps
//! deeper levels (a chapter's sub-directories become pages with their own
//! children) but the renderer stops at two.

pub mod config;
pub mod fences;
pub mod frontmatter;
pub mod naming;
pub mod notebook;
pub mod output;
pub mod scan;
pub mod summary;
pub mod toctree;
pub mod types;
pub mod viewport;

#[cfg(test)]
pub(crate) mod test_helpers;
