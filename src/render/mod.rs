//! Presentation of session state
//!
//! The controller knows nothing about output; front-ends implement
//! [`Presenter`] to draw a [`SessionView`].

pub mod snippet;

use crate::session::SessionView;
use std::fmt::Write;

/// Turns a session snapshot into output for one front-end
pub trait Presenter {
    fn render(&self, view: &SessionView) -> String;
}

/// "Showing X-Y of Z results" line, if there is anything to show
pub fn caption(view: &SessionView) -> Option<String> {
    let p = &view.pagination;
    if p.total_results == 0 {
        return None;
    }

    let mut line = format!(
        "Showing {}-{} of {} results",
        p.start(),
        p.end(),
        p.total_results
    );
    if let Some(elapsed) = view.search_time {
        let _ = write!(line, " ({:.2} seconds)", elapsed.as_secs_f64());
    }
    Some(line)
}

/// Plain-text presenter for terminals
#[derive(Debug, Clone)]
pub struct TextPresenter {
    /// Longest snippet printed before truncation, in characters
    pub snippet_width: usize,
}

impl Default for TextPresenter {
    fn default() -> Self {
        Self { snippet_width: 200 }
    }
}

impl TextPresenter {
    fn truncate(&self, text: String) -> String {
        if text.chars().count() <= self.snippet_width {
            return text;
        }
        let cut: String = text.chars().take(self.snippet_width).collect();
        format!("{}...", cut.trim_end())
    }
}

impl Presenter for TextPresenter {
    fn render(&self, view: &SessionView) -> String {
        let mut out = String::new();

        if view.suggestions_loading {
            out.push_str("  Loading suggestions...\n");
        }
        for (i, suggestion) in view.suggestions.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", i + 1, suggestion);
        }

        if view.loading {
            out.push_str("Searching...\n");
            return out;
        }

        if let Some(ref error) = view.error {
            let _ = writeln!(out, "! {}", error);
        }

        if let Some(line) = caption(view) {
            let _ = writeln!(out, "{}\n", line);
        } else if let Some(ref query) = view.searched_query {
            let _ = writeln!(out, "No results for \"{}\"", query);
        }

        for result in &view.results {
            let _ = writeln!(out, "{}\n  {}", result.title, result.url);
            let snippet = snippet::to_plain_text(&result.snippet);
            if !snippet.is_empty() {
                let _ = writeln!(out, "  {}", self.truncate(snippet));
            }
            out.push('\n');
        }

        let p = &view.pagination;
        if p.has_previous() || p.has_next() {
            let prev = if p.has_previous() { "[:p] Previous" } else { "" };
            let next = if p.has_next() { "[:n] Next" } else { "" };
            let _ = writeln!(out, "{}  Page {}  {}", prev, p.page + 1, next);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResultRecord;
    use crate::search::Pagination;
    use std::time::Duration;

    fn view(page: u32, total: u64) -> SessionView {
        SessionView {
            query: "cat".to_string(),
            suggestions: vec![],
            suggestions_loading: false,
            searched_query: Some("cat".to_string()),
            results: vec![ResultRecord::new("Cats", "http://a")
                .with_snippet("All about <b>cats</b>")
                .with_score(0.9)],
            pagination: Pagination {
                page,
                page_size: 10,
                total_results: total,
            },
            loading: false,
            error: None,
            search_time: Some(Duration::from_millis(120)),
        }
    }

    #[test]
    fn test_caption() {
        assert_eq!(
            caption(&view(0, 1)).as_deref(),
            Some("Showing 1-1 of 1 results (0.12 seconds)")
        );
        assert_eq!(
            caption(&view(2, 25)).as_deref(),
            Some("Showing 21-25 of 25 results (0.12 seconds)")
        );
        assert_eq!(caption(&view(0, 0)), None);
    }

    #[test]
    fn test_render_strips_snippet_markup() {
        let out = TextPresenter::default().render(&view(0, 1));
        assert!(out.contains("Cats\n  http://a"));
        assert!(out.contains("All about cats"));
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn test_render_navigation() {
        let out = TextPresenter::default().render(&view(1, 25));
        assert!(out.contains("[:p] Previous"));
        assert!(out.contains("Page 2"));
        assert!(out.contains("[:n] Next"));

        let out = TextPresenter::default().render(&view(2, 25));
        assert!(!out.contains("[:n] Next"));
    }

    #[test]
    fn test_render_error_and_suggestions() {
        let mut v = view(0, 0);
        v.results.clear();
        v.error = Some("Failed to fetch search results. Please try again.".to_string());
        v.suggestions = vec!["cats".to_string(), "cats near me".to_string()];

        let out = TextPresenter::default().render(&v);
        assert!(out.contains("  [2] cats near me"));
        assert!(out.contains("! Failed to fetch search results"));
        assert!(out.contains("No results for \"cat\""));
    }

    #[test]
    fn test_truncate() {
        let presenter = TextPresenter { snippet_width: 5 };
        assert_eq!(presenter.truncate("abcdefgh".to_string()), "abcde...");
        assert_eq!(presenter.truncate("abc".to_string()), "abc");
    }
}
