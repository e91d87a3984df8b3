//! Front-matter splitting for content documents.
//!
//! Documents open with a metadata block delimited by `---` lines. The block
//! is handed to the external document-metadata parser untouched; this module
//! only separates it from the body so plugins can look at its raw lines.

/// Front-matter delimiter line.
const DELIMITER: &str = "---";

/// Split a document into its metadata block and body.
///
/// Returns `None` when the document has no metadata block. The block is
/// returned with surrounding whitespace trimmed, the body with leading
/// whitespace trimmed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start();

    if !content.starts_with(DELIMITER) {
        return None;
    }

    let after_open = &content[DELIMITER.len()..];
    let closing_pos = after_open.find(DELIMITER)?;

    let block = after_open[..closing_pos].trim();
    let body = after_open[closing_pos + DELIMITER.len()..].trim_start();

    Some((block, body))
}
