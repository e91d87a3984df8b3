//! Static-reference matching.
//!
//! A document declares the static files it depends on as metadata list
//! items of the form `- '{static 'images/foo.png'}'`. The inner
//! `{static '...'}` token doubles as a template placeholder, so the same
//! string is usable in the document body. This module decides whether a
//! single metadata line declares such a reference and extracts the asset
//! path plus an optional trailing annotation.

use std::sync::OnceLock;

use regex::Regex;

/// A reference to a static asset declared in a metadata line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticReference {
    /// Asset path, relative to the site's static content root.
    pub path: String,

    /// Optional trailing annotation (e.g. `width=200` or `output=...`).
    pub extra: Option<String>,
}

/// Line shape: `- '{static <sep><path>[<sep><extra>]}'`, where `<sep>` is
/// whitespace or `|` and the path is either quoted (`'...'` / `"..."`) or a
/// bare run containing no whitespace, `|`, or `}`.
const REFERENCE_PATTERN: &str = r#"^\s*- '\{static(?:\s+|\|)(?:"(?P<dq>[^"]+)"|'(?P<sq>[^']+)'|(?P<bare>[^\s|}]+))(?:(?:\s+|\|)(?P<extra>.+?))?\s*\}'\s*$"#;

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REFERENCE_PATTERN).expect("reference pattern compiles"))
}

/// Match a single metadata line against the static-reference syntax.
///
/// Returns `None` for any line that is not a reference declaration; this is
/// the expected outcome for ordinary metadata lines, not an error.
pub fn match_reference(line: &str) -> Option<StaticReference> {
    let caps = reference_regex().captures(line)?;

    let path = caps
        .name("dq")
        .or_else(|| caps.name("sq"))
        .or_else(|| caps.name("bare"))?
        .as_str()
        .to_string();

    let extra = caps.name("extra").map(|m| m.as_str().to_string());

    Some(StaticReference { path, extra })
}
