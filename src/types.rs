//! Shared types used by the summarizer and the output layer.

use std::cmp::Ordering;
use std::path::PathBuf;

/// One markdown document's navigational metadata.
///
/// Directory-root pages (`README.md`) carry their directory's entries as
/// `children`; leaf pages never do. A page with neither `title` nor `path`
/// is a placeholder for a directory whose `README.md` had no front matter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// From front matter `title`, or the first `# heading` as fallback
    pub title: Option<String>,
    /// Sort key among siblings; `None` sorts last
    pub nav_order: Option<f64>,
    /// Informational only, never changes tree shape
    pub has_children: bool,
    pub path: Option<PathBuf>,
    pub children: Vec<Page>,
}

impl Page {
    /// Empty stand-in for a directory without parseable front matter.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.title.is_none() && self.path.is_none() && self.children.is_empty()
    }

    /// Title as rendered: unset titles render as the empty string.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Stable-sort children by `nav_order`, absent values last.
    pub fn sort_children(&mut self) {
        self.children
            .sort_by(|a, b| compare_nav_order(a.nav_order, b.nav_order));
    }
}

/// Ascending order with `None` after every present value.
///
/// Uses `f64::total_cmp`, so `nav_order: nan` still sorts deterministically.
pub fn compare_nav_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, nav_order: Option<f64>) -> Page {
        Page {
            title: Some(title.to_string()),
            nav_order,
            ..Page::default()
        }
    }

    fn titles(page: &Page) -> Vec<&str> {
        page.children.iter().map(Page::display_title).collect()
    }

    #[test]
    fn present_values_sort_before_absent() {
        assert_eq!(compare_nav_order(Some(99.0), None), Ordering::Less);
        assert_eq!(compare_nav_order(None, Some(-1.0)), Ordering::Greater);
        assert_eq!(compare_nav_order(None, None), Ordering::Equal);
    }

    #[test]
    fn zero_sorts_first() {
        let mut root = Page::default();
        root.children = vec![page("b", Some(1.0)), page("a", Some(0.0))];
        root.sort_children();
        assert_eq!(titles(&root), vec!["a", "b"]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut root = Page::default();
        root.children = vec![
            page("first-unordered", None),
            page("tie-a", Some(2.0)),
            page("second-unordered", None),
            page("tie-b", Some(2.0)),
            page("one", Some(1.0)),
        ];
        root.sort_children();
        assert_eq!(
            titles(&root),
            vec![
                "one",
                "tie-a",
                "tie-b",
                "first-unordered",
                "second-unordered"
            ]
        );
    }

    #[test]
    fn placeholder_has_no_title_or_path() {
        let p = Page::placeholder();
        assert!(p.is_placeholder());
        assert_eq!(p.display_title(), "");
        assert!(!page("x", None).is_placeholder());
    }
}
