// src/domain/entities/mod.rs
use serde::{Deserialize, Serialize};

/// A stored summary. `texto` is the generated summary text, not the
/// original Markdown input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub texto: String,
}

/// A ranked keyword. `termo` is the lower-cased canonical form shared
/// across summaries; `frequencia` is the occurrence count in the text the
/// keyword was extracted from.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub termo: String,
    pub frequencia: i64,
}
