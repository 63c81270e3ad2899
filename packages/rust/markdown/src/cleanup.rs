//! Content cleanup for display.
//!
//! The cleaned body keeps the full document text, minus rendering
//! annotations the dataset embeds for its own web frontend, with markdown
//! links flattened to plain text and a hard size bound against oversized
//! remote payloads.

use std::sync::LazyLock;

use regex::Regex;

/// Hard bound on cleaned content, in characters.
const MAX_CONTENT_CHARS: usize = 50_000;

/// Appended when content is cut at the bound.
const TRUNCATION_MARKER: &str = "\n\n... (content truncated)";

/// Matches `<!--rehype:...-->` annotation comments. `.` does not cross
/// lines, matching how the annotations are written.
static REHYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--rehype:.*?-->").expect("valid regex"));

/// Matches `[label](target)` markdown links.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

/// Strip rehype directives, flatten links to `label (target)`, and bound
/// the result to [`MAX_CONTENT_CHARS`] characters plus a truncation marker.
pub(crate) fn clean_content(text: &str) -> String {
    let stripped = REHYPE_RE.replace_all(text, "");
    let mut cleaned = LINK_RE.replace_all(&stripped, "${1} (${2})").into_owned();

    if let Some((idx, _)) = cleaned.char_indices().nth(MAX_CONTENT_CHARS) {
        cleaned.truncate(idx);
        cleaned.push_str(TRUNCATION_MARKER);
    }

    cleaned
}
