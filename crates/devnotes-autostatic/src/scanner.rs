//! Metadata scanning for static references.
//!
//! Walks the lines of a document's metadata block and collects every
//! declared static reference. Each line yields at most one reference;
//! lines that declare nothing are skipped silently.

use devnotes_core::split_frontmatter;
use tracing::debug;

use crate::matcher::{match_reference, StaticReference};

/// Collect static references from metadata lines.
pub fn scan_lines<'a, I>(lines: I) -> Vec<StaticReference>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(match_reference).collect()
}

/// Collect static references from a whole document.
///
/// Splits the document's metadata block and scans its lines. Documents
/// without a metadata block declare no references.
pub fn scan_document(content: &str) -> Vec<StaticReference> {
    let Some((block, _body)) = split_frontmatter(content) else {
        return Vec::new();
    };

    let references = scan_lines(block.lines());
    debug!(count = references.len(), "scanned document metadata");
    references
}

impl StaticReference {
    /// Parse the trailing annotation into `key=value` directives.
    ///
    /// Directives are whitespace separated; a bare word becomes a directive
    /// with an empty value.
    pub fn options(&self) -> Vec<(String, String)> {
        let Some(extra) = self.extra.as_deref() else {
            return Vec::new();
        };

        extra
            .split_whitespace()
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (token.to_string(), String::new()),
            })
            .collect()
    }
}
