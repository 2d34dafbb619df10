// src/application/storage/mod.rs
//
// Repository port. The application layer talks to persistence through
// this trait; the concrete adapter lives in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{Keyword, Summary};

#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),
    #[error("Query execution error: {0}")]
    QueryError(String),
    #[error("Transaction error: {0}")]
    TransactionError(String),
    #[error("Migration error: {0}")]
    MigrationError(String),
}

#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Persist a new summary with its keyword associations, in one
    /// transaction. Keyword terms are created lazily on first sight.
    async fn create(&self, texto: &str, keywords: &[Keyword]) -> Result<Summary, RepositoryError>;

    /// All stored summaries, unfiltered.
    async fn list(&self) -> Result<Vec<Summary>, RepositoryError>;

    /// Look a summary up by id.
    async fn get(&self, id: i64) -> Result<Option<Summary>, RepositoryError>;

    /// Keyword terms associated with a summary, with their per-pair
    /// frequency, ordered by frequency descending then term.
    async fn keywords_for(&self, id: i64) -> Result<Vec<Keyword>, RepositoryError>;

    /// Replace a summary's text and every prior keyword association, in
    /// one transaction. Returns `None` when the id is unknown.
    async fn update(
        &self,
        id: i64,
        texto: &str,
        keywords: &[Keyword],
    ) -> Result<Option<Summary>, RepositoryError>;

    /// Delete a summary and its association rows in one transaction.
    /// Returns `false` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
