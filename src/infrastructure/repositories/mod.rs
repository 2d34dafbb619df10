// src/infrastructure/repositories/mod.rs
pub mod sqlite_summary_repository;

pub use sqlite_summary_repository::SqliteSummaryRepository;
