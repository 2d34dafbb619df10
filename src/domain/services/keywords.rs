// src/domain/services/keywords.rs
//
// Frequency-ranked keyword extraction. No stemming or language detection;
// a fixed Portuguese stop-word set is the only filtering.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::Keyword;

const MAX_KEYWORDS: usize = 5;

/// Portuguese articles, prepositions and conjunctions excluded from
/// keyword counting.
const STOP_WORDS: &[&str] = &[
    "o", "a", "os", "as", "um", "uma", "uns", "umas", "de", "do", "da", "dos", "das", "em", "no",
    "na", "nos", "nas", "por", "para", "com", "sem", "que", "e", "é",
];

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("static regex compile"));

/// Extract up to five keywords from plain text, ranked by occurrence count
/// descending. Ties are broken by first occurrence in the text. Terms are
/// returned in lower-cased canonical form.
pub fn extract_keywords(text: &str) -> Vec<Keyword> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD_RE.replace_all(&lowered, "");

    let mut counts: HashMap<&str, (i64, usize)> = HashMap::new();
    for (position, token) in cleaned.split_whitespace().enumerate() {
        if STOP_WORDS.contains(&token) {
            continue;
        }
        counts.entry(token).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, (i64, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, pos_a)), (_, (count_b, pos_b))| {
        count_b.cmp(count_a).then(pos_a.cmp(pos_b))
    });

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(termo, (frequencia, _))| Keyword {
            termo: termo.to_string(),
            frequencia,
        })
        .collect()
}

/// Uppercase the first letter, leaving the rest unchanged.
pub fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
