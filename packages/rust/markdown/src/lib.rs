//! Markdown-to-structured-record extraction for command reference documents.
//!
//! The remote reference documents are free-form markdown. [`extract`] turns
//! one into a [`CommandDetail`] via three independent linear scans:
//! description (first paragraph after the setext title underline), shell
//! examples (fenced blocks tagged shell/bash/sh), and content cleanup
//! (directive stripping, link flattening, size bound). Each scan is its own
//! small state machine so failure modes like an unterminated fence stay
//! isolated and testable per rule.

mod cleanup;

use cmdref_shared::CommandDetail;
use tracing::debug;

/// Maximum number of example snippets kept per document.
const MAX_EXAMPLES: usize = 10;

/// Fence openers that mark a code block as a runnable shell example.
/// Prefix-matched, as the documents tag fences inconsistently.
const SHELL_FENCE_OPENERS: [&str; 3] = ["```shell", "```bash", "```sh"];

/// Extract a structured record from one command's raw reference document.
///
/// Pure text processing: no network, no cache. `syntax` is a reserved field
/// and is never populated here.
pub fn extract(name: &str, text: &str) -> CommandDetail {
    let description = extract_description(text);
    let examples = extract_examples(text);
    let content = cleanup::clean_content(text);

    debug!(
        name,
        examples = examples.len(),
        content_len = content.len(),
        "document extracted"
    );

    CommandDetail {
        name: name.to_string(),
        description,
        content,
        syntax: None,
        examples,
    }
}

// ---------------------------------------------------------------------------
// Description scan
// ---------------------------------------------------------------------------

/// First non-blank, non-heading line after a setext title underline.
///
/// An underline is any trimmed line starting with `===` or `---` (longer
/// underlines count too). First match wins; no underline, or nothing after
/// one, leaves the description empty.
fn extract_description(text: &str) -> String {
    let mut title_seen = false;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("===") || trimmed.starts_with("---") {
            title_seen = true;
            continue;
        }

        if title_seen && !trimmed.is_empty() && !trimmed.starts_with('#') {
            return trimmed.to_string();
        }
    }

    String::new()
}

// ---------------------------------------------------------------------------
// Example scan
// ---------------------------------------------------------------------------

/// Collect the contents of shell-tagged fenced blocks, in document order.
///
/// Fence lines never enter the buffer; interior lines are kept verbatim.
/// A block left open at end of input contributes nothing. At most
/// [`MAX_EXAMPLES`] snippets are kept; later blocks are the ones dropped.
fn extract_examples(text: &str) -> Vec<String> {
    let mut examples: Vec<String> = Vec::new();
    let mut in_shell_block = false;
    let mut block = String::new();

    for line in text.lines() {
        // A shell opener also re-opens: it resets the buffer even when a
        // previous block was never closed.
        if SHELL_FENCE_OPENERS.iter().any(|f| line.starts_with(f)) {
            in_shell_block = true;
            block.clear();
            continue;
        }

        if line.starts_with("```") && in_shell_block {
            in_shell_block = false;
            let snippet = block.trim();
            if !snippet.is_empty() {
                examples.push(snippet.to_string());
            }
            block.clear();
            continue;
        }

        if in_shell_block {
            block.push_str(line);
            block.push('\n');
        }
    }

    examples.truncate(MAX_EXAMPLES);
    examples
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
