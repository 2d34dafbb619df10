// src/domain/services/summarizer.rs
//
// Extractive summarization: the first three sentences of the stripped
// text. Sentence boundaries are only recognized at `.`, `!` or `?`
// immediately followed by whitespace, so abbreviations false-split.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_SENTENCES: usize = 3;

/// Markdown remnants the stripper may have let through.
static LEFTOVER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#*_`-]").expect("static regex compile"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static regex compile"));

/// Summarize plain text to its first three sentences, space-joined.
/// Text without terminal punctuation is treated as a single sentence and
/// returned verbatim.
pub fn summarize(text: &str) -> String {
    let text = LEFTOVER_RE.replace_all(text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = text.trim();

    split_sentences(text)
        .into_iter()
        .take(MAX_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut after terminal punctuation followed by whitespace. The trailing
/// fragment, punctuated or not, is a sentence of its own.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(next_start, next)) = iter.peek() {
                if next.is_whitespace() {
                    sentences.push(text[start..i + c.len_utf8()].trim());
                    start = next_start;
                }
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
