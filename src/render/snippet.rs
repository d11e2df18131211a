//! Snippet handling
//!
//! Snippets arrive from the server with inline markup that has not been
//! sanitized. They are parsed as HTML fragments and reduced to text here,
//! never echoed as-is.

use scraper::Html;

/// Text content of a snippet with markup removed and whitespace collapsed
pub fn to_plain_text(snippet: &str) -> String {
    if !snippet.contains('<') && !snippet.contains('&') {
        return collapse_whitespace(snippet);
    }

    let fragment = Html::parse_fragment(snippet);
    let text: String = fragment
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(|a| a.value().as_element())
                .any(|e| matches!(e.name(), "script" | "style"));
            (!hidden).then(|| String::from(&**text))
        })
        .collect();
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
