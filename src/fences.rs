//! Language tags for markdown code fences.
//!
//! Notebook exports and hand-written pages often leave code fences bare
//! (```` ``` ````), which renders without highlighting. Per file:
//!
//! - If any fence already names a known language (`py`, `python`, `sh`,
//!   `bash`, `js`, `javascript` by default), the author tagged things on
//!   purpose. The only rewrite is `py` → `python`, and only when the file
//!   does not use `python` anywhere.
//! - Otherwise every bare fence gets the default language (`python`).
//!
//! Fences are found with `pulldown-cmark`, so only real opening fences are
//! touched: closing fences, fences inside lists or block quotes, and
//! backticks inside code stay as they are.

use crate::config::FencesConfig;
use crate::scan;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The info string of one opening fence and where it sits in the source.
#[derive(Debug, Clone, PartialEq)]
struct FenceInfo {
    info: String,
    /// Byte span from just after the fence run to the end of the line
    span: Range<usize>,
}

impl FenceInfo {
    fn language(&self) -> &str {
        self.info.split_whitespace().next().unwrap_or("")
    }
}

/// Outcome of tagging every markdown file in a directory.
#[derive(Debug, Default)]
pub struct FenceReport {
    pub scanned: usize,
    pub changed: Vec<PathBuf>,
}

fn opening_fences(content: &str) -> Vec<FenceInfo> {
    Parser::new(content)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                info_span(content, range.start).map(|span| FenceInfo {
                    info: info.to_string(),
                    span,
                })
            }
            _ => None,
        })
        .collect()
}

/// Locate the info string on the opening fence line starting at or after `start`.
fn info_span(content: &str, start: usize) -> Option<Range<usize>> {
    let rest = &content[start..];
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let line = rest[..line_len].trim_end_matches('\r');

    let fence_at = line.find(['`', '~'])?;
    let fence_char = line[fence_at..].chars().next()?;
    let run = line[fence_at..]
        .chars()
        .take_while(|&c| c == fence_char)
        .count();

    Some(start + fence_at + run..start + line.len())
}

/// Rewrite fence language tags in one document.
///
/// Returns `None` when nothing needs to change.
pub fn tag_fences(content: &str, config: &FencesConfig) -> Option<String> {
    let fences = opening_fences(content);
    let is_known = |f: &FenceInfo| config.known_languages.iter().any(|l| l == f.language());

    let edits: Vec<(Range<usize>, String)> = if fences.iter().any(is_known) {
        if fences.iter().any(|f| f.language() == "python") {
            return None;
        }
        fences
            .iter()
            .filter(|f| f.language() == "py")
            .map(|f| {
                let rest = f.info.trim_start().strip_prefix("py").unwrap_or("");
                (f.span.clone(), format!("python{rest}"))
            })
            .collect()
    } else {
        fences
            .iter()
            .filter(|f| f.info.trim().is_empty())
            .map(|f| (f.span.clone(), config.default_language.clone()))
            .collect()
    };

    if edits.is_empty() {
        return None;
    }

    let mut out = content.to_string();
    for (span, replacement) in edits.into_iter().rev() {
        out.replace_range(span, &replacement);
    }
    Some(out)
}

/// Tag fences in every `*.md` file under `dir`, writing only changed files.
pub fn tag_fences_in_dir(dir: &Path, config: &FencesConfig) -> Result<FenceReport, FenceError> {
    let files = scan::find_files(dir, "md")?;
    let mut report = FenceReport {
        scanned: files.len(),
        ..FenceReport::default()
    };

    for file in files {
        let content = fs::read_to_string(&file)?;
        if let Some(updated) = tag_fences(&content, config) {
            fs::write(&file, updated)?;
            tracing::debug!("Tagged code fences in {}", file.display());
            report.changed.push(file);
        }
    }
    Ok(report)
}
