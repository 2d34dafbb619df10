// src/domain/services/mod.rs
pub mod keywords;
pub mod markdown;
pub mod summarizer;
pub mod xml;
