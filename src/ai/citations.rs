//! Markdown rendering of the sources attached to a grounded answer.

use crate::openai::Citation;

const CITATIONS_HEADING: &str = "📚 참고 자료";
const UNTITLED: &str = "(제목 없음)";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// A clickable link when the citation has a url, otherwise the title
/// labelled with its file. Untitled citations are labelled with their
/// url or file instead.
pub fn render_citation(citation: &Citation) -> String {
    let title = Some(citation.title.as_str()).filter(|t| !t.trim().is_empty());
    match (title, non_empty(&citation.url), non_empty(&citation.filepath)) {
        (Some(title), Some(url), _) => format!("[{}]({})", title, url),
        (None, Some(url), _) => format!("[{}]({})", url, url),
        (Some(title), None, Some(filepath)) => format!("{} (파일: {})", title, filepath),
        (None, None, Some(filepath)) => filepath.to_string(),
        (Some(title), None, None) => title.to_string(),
        (None, None, None) => String::from(UNTITLED),
    }
}

/// The citation section for an answer, or `None` when there is nothing
/// to show.
pub fn render_citations(citations: &[Citation]) -> Option<String> {
    if citations.is_empty() {
        return None;
    }

    let items = citations
        .iter()
        .map(|c| format!("- {}", render_citation(c)))
        .collect::<Vec<_>>()
        .join("\n");

    Some(format!("{}\n{}", CITATIONS_HEADING, items))
}
