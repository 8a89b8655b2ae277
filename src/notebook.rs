//! Jupyter notebook to markdown conversion.
//!
//! Notebooks are read directly as JSON; no Jupyter installation is needed.
//!
//! | Cell | Markdown |
//! |------|----------|
//! | markdown | source, verbatim |
//! | code | source in a fence tagged with the notebook language |
//! | code outputs | stream text, `text/plain` results and errors, each in a bare fence |
//! | raw | source, verbatim |
//!
//! Rich outputs (images, HTML) have no markdown form and are dropped.
//! The notebook language comes from `metadata.kernelspec.language`, then
//! `metadata.language_info.name`, then the configured fallback.

use crate::config::NotebooksConfig;
use crate::scan;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotebookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notebook {}: {source}", path.display())]
    InvalidNotebook {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Notebook text fields are either one string or a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Text {
    One(String),
    Lines(Vec<String>),
}

impl Default for Text {
    fn default() -> Self {
        Text::One(String::new())
    }
}

impl Text {
    fn joined(&self) -> String {
        match self {
            Text::One(s) => s.clone(),
            Text::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<Cell>,
    #[serde(default)]
    metadata: NotebookMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct NotebookMetadata {
    kernelspec: Option<KernelSpec>,
    language_info: Option<LanguageInfo>,
}

#[derive(Debug, Deserialize)]
struct KernelSpec {
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LanguageInfo {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
enum Cell {
    Markdown {
        #[serde(default)]
        source: Text,
    },
    Code {
        #[serde(default)]
        source: Text,
        #[serde(default)]
        outputs: Vec<Output>,
    },
    Raw {
        #[serde(default)]
        source: Text,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
enum Output {
    Stream {
        #[serde(default)]
        text: Text,
    },
    ExecuteResult {
        #[serde(default)]
        data: OutputData,
    },
    DisplayData {
        #[serde(default)]
        data: OutputData,
    },
    Error {
        #[serde(default)]
        ename: String,
        #[serde(default)]
        evalue: String,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Default, Deserialize)]
struct OutputData {
    #[serde(rename = "text/plain")]
    text_plain: Option<Text>,
}

impl Output {
    fn plain_text(&self) -> Option<String> {
        match self {
            Output::Stream { text } => Some(text.joined()),
            Output::ExecuteResult { data } | Output::DisplayData { data } => {
                data.text_plain.as_ref().map(Text::joined)
            }
            Output::Error { ename, evalue } => Some(format!("{ename}: {evalue}")),
            Output::Unknown => None,
        }
    }
}

impl Notebook {
    fn language<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.metadata
            .kernelspec
            .as_ref()
            .and_then(|k| k.language.as_deref())
            .or_else(|| {
                self.metadata
                    .language_info
                    .as_ref()
                    .and_then(|l| l.name.as_deref())
            })
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(fallback)
    }
}

fn fence(language: &str, body: &str) -> String {
    format!("```{language}\n{}\n```", body.trim_end_matches('\n'))
}

/// Render a notebook's JSON as markdown.
pub fn notebook_to_markdown(json: &str, fallback_language: &str) -> Result<String, serde_json::Error> {
    let notebook: Notebook = serde_json::from_str(json)?;
    let language = notebook.language(fallback_language);

    let mut blocks = Vec::new();
    for cell in &notebook.cells {
        match cell {
            Cell::Markdown { source } | Cell::Raw { source } => {
                let text = source.joined();
                let text = text.trim_end();
                if !text.is_empty() {
                    blocks.push(text.to_string());
                }
            }
            Cell::Code { source, outputs } => {
                let code = source.joined();
                if code.trim().is_empty() && outputs.is_empty() {
                    continue;
                }
                blocks.push(fence(language, &code));
                blocks.extend(
                    outputs
                        .iter()
                        .filter_map(Output::plain_text)
                        .filter(|t| !t.trim().is_empty())
                        .map(|t| fence("", &t)),
                );
            }
            Cell::Unknown => {}
        }
    }

    let mut markdown = blocks.join("\n\n");
    markdown.push('\n');
    Ok(markdown)
}

/// Convert every `*.ipynb` directly inside `input_dir` to `<stem>.md`.
///
/// Output goes to `output_dir` (created if missing), or next to the
/// notebooks when `None`. Returns `(notebook, markdown)` path pairs.
pub fn convert_notebooks(
    input_dir: &Path,
    output_dir: Option<&Path>,
    config: &NotebooksConfig,
) -> Result<Vec<(PathBuf, PathBuf)>, NotebookError> {
    let output_dir = output_dir.unwrap_or(input_dir);
    let notebooks = scan::files_in_dir(input_dir, "ipynb")?;
    if notebooks.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(output_dir)?;

    let mut converted = Vec::new();
    for notebook in notebooks {
        let json = fs::read_to_string(&notebook)?;
        let markdown = notebook_to_markdown(&json, &config.fallback_language).map_err(|source| {
            NotebookError::InvalidNotebook {
                path: notebook.clone(),
                source,
            }
        })?;

        let stem = notebook.file_stem().unwrap_or_default().to_string_lossy();
        let target = output_dir.join(format!("{stem}.md"));
        fs::write(&target, markdown)?;
        tracing::debug!("Converted {} → {}", notebook.display(), target.display());
        converted.push((notebook, target));
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_tree;
    use tempfile::TempDir;

    const NOTEBOOK: &str = r##"{
  "cells": [
    {"cell_type": "markdown", "metadata": {}, "source": ["# Analysis\n", "\n", "Some *notes*."]},
    {"cell_type": "code", "execution_count": 1, "metadata": {},
     "source": ["x = 1\n", "print(x)"],
     "outputs": [{"output_type": "stream", "name": "stdout", "text": ["1\n"]}]},
    {"cell_type": "code", "execution_count": 2, "metadata": {}, "source": "x + 1",
     "outputs": [{"output_type": "execute_result", "execution_count": 2,
                  "data": {"text/plain": ["2"], "text/html": ["<b>2</b>"]}, "metadata": {}}]},
    {"cell_type": "code", "metadata": {}, "source": [], "outputs": []},
    {"cell_type": "raw", "metadata": {}, "source": "raw text"}
  ],
  "metadata": {"kernelspec": {"name": "python3", "language": "python", "display_name": "Python 3"}},
  "nbformat": 4,
  "nbformat_minor": 5
}"##;

    fn convert(json: &str) -> String {
        notebook_to_markdown(json, "python").unwrap()
    }

    #[test]
    fn converts_cells_in_order() {
        let expected = "# Analysis\n\nSome *notes*.\n\n\
```python\nx = 1\nprint(x)\n```\n\n\
```\n1\n```\n\n\
```python\nx + 1\n```\n\n\
```\n2\n```\n\n\
raw text\n";
        assert_eq!(convert(NOTEBOOK), expected);
    }

    #[test]
    fn language_from_language_info() {
        let json = r#"{"cells": [{"cell_type": "code", "source": "1+1", "outputs": []}],
            "metadata": {"language_info": {"name": "julia"}}}"#;
        assert!(convert(json).starts_with("```julia\n"));
    }

    #[test]
    fn language_falls_back() {
        let json = r#"{"cells": [{"cell_type": "code", "source": "1+1"}], "metadata": {}}"#;
        assert_eq!(notebook_to_markdown(json, "r").unwrap(), "```r\n1+1\n```\n");
    }

    #[test]
    fn error_outputs_render_name_and_value() {
        let json = r#"{"cells": [{"cell_type": "code", "source": "1/0", "outputs": [
            {"output_type": "error", "ename": "ZeroDivisionError", "evalue": "division by zero", "traceback": []}
        ]}]}"#;
        assert!(convert(json).contains("```\nZeroDivisionError: division by zero\n```"));
    }

    #[test]
    fn rich_only_outputs_are_dropped() {
        let json = r#"{"cells": [{"cell_type": "code", "source": "plot()", "outputs": [
            {"output_type": "display_data", "data": {"image/png": "iVBOR"}, "metadata": {}}
        ]}]}"#;
        assert_eq!(convert(json), "```python\nplot()\n```\n");
    }

    #[test]
    fn unknown_cell_types_are_skipped() {
        let json = r#"{"cells": [{"cell_type": "heading", "source": "old"},
            {"cell_type": "markdown", "source": "kept"}]}"#;
        assert_eq!(convert(json), "kept\n");
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(notebook_to_markdown("{not json", "python").is_err());
    }

    #[test]
    fn converts_directory_into_output_dir() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("nb/analysis.ipynb", NOTEBOOK),
                ("nb/nested/skip.ipynb", NOTEBOOK),
                ("nb/readme.md", "# not a notebook"),
            ],
        );
        let out = tmp.path().join("out/md");

        let converted =
            convert_notebooks(&tmp.path().join("nb"), Some(&out), &NotebooksConfig::default())
                .unwrap();

        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].1, out.join("analysis.md"));
        let markdown = fs::read_to_string(out.join("analysis.md")).unwrap();
        assert!(markdown.starts_with("# Analysis"));
        assert!(!out.join("skip.md").exists());
    }

    #[test]
    fn converts_in_place_by_default() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("a.ipynb", NOTEBOOK)]);

        convert_notebooks(tmp.path(), None, &NotebooksConfig::default()).unwrap();
        assert!(tmp.path().join("a.md").exists());
    }

    #[test]
    fn empty_directory_converts_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("never-created");
        let converted = convert_notebooks(tmp.path(), Some(&out), &NotebooksConfig::default()).unwrap();
        assert!(converted.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn invalid_notebook_names_the_file() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("broken.ipynb", "{")]);

        let err = convert_notebooks(tmp.path(), None, &NotebooksConfig::default()).unwrap_err();
        match err {
            NotebookError::InvalidNotebook { path, .. } => {
                assert_eq!(path, tmp.path().join("broken.ipynb"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
