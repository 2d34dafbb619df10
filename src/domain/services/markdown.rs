// src/domain/services/markdown.rs
//
// Markdown-to-plain-text stripping. A sequence of independent text
// substitutions, not a real parser: malformed Markdown passes through
// partially unstripped.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#+ ?").expect("static regex compile"));

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("static regex compile"));

static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.+?)\*|_(.+?)_").expect("static regex compile"));

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[-*+]\s+").expect("static regex compile"));

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("static regex compile"));

static STRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[`>]").expect("static regex compile"));

/// Strip Markdown syntax, keeping the readable text. Heading markers,
/// emphasis delimiters, line-start bullets, link URLs and stray
/// backtick/quote characters are removed; link labels are kept.
pub fn strip_markdown(text: &str) -> String {
    let text = HEADING_RE.replace_all(text, "");
    let text = BOLD_RE.replace_all(&text, "${1}${2}");
    let text = ITALIC_RE.replace_all(&text, "${1}${2}");
    let text = BULLET_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "${1}");
    let text = STRAY_RE.replace_all(&text, "");
    text.trim().to_string()
}
