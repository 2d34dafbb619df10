/*
SQLite Summary Repository Adapter

Concrete implementation of the SummaryRepository port over a SQLite
database. Owns the connection pool and runs its migrations on
construction.
*/

use std::str::FromStr;

use async_trait::async_trait;
use log::debug;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::application::storage::{RepositoryError, SummaryRepository};
use crate::domain::entities::{Keyword, Summary};

pub struct SqliteSummaryRepository {
    pool: SqlitePool,
}

impl SqliteSummaryRepository {
    /// Open (creating if missing) the database at `database_url` and run
    /// migrations.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::ConnectionError(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| {
                RepositoryError::ConnectionError(format!("Failed to connect to database: {}", e))
            })?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool (used by tests with `sqlite::memory:`) and
    /// run migrations.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, RepositoryError> {
        let repository = Self { pool };
        repository.migrate().await?;
        Ok(repository)
    }

    async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resumo (
                id    INTEGER PRIMARY KEY AUTOINCREMENT,
                texto TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::MigrationError(format!("resumo: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS palavrachave (
                id    INTEGER PRIMARY KEY AUTOINCREMENT,
                termo TEXT NOT NULL COLLATE NOCASE UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::MigrationError(format!("palavrachave: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resumopalavra (
                resumo_id  INTEGER NOT NULL REFERENCES resumo(id),
                palavra_id INTEGER NOT NULL REFERENCES palavrachave(id),
                frequencia INTEGER NOT NULL,
                PRIMARY KEY (resumo_id, palavra_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::MigrationError(format!("resumopalavra: {}", e)))?;

        Ok(())
    }

    /// Insert association rows for a summary, creating keyword terms
    /// lazily. Runs inside the caller's transaction.
    async fn insert_associations(
        tx: &mut Transaction<'_, Sqlite>,
        resumo_id: i64,
        keywords: &[Keyword],
    ) -> Result<(), RepositoryError> {
        for keyword in keywords {
            sqlx::query("INSERT INTO palavrachave (termo) VALUES (?1) ON CONFLICT(termo) DO NOTHING")
                .bind(&keyword.termo)
                .execute(&mut **tx)
                .await
                .map_err(|e| RepositoryError::QueryError(format!("insert term: {}", e)))?;

            let row = sqlx::query("SELECT id FROM palavrachave WHERE termo = ?1")
                .bind(&keyword.termo)
                .fetch_one(&mut **tx)
                .await
                .map_err(|e| RepositoryError::QueryError(format!("select term: {}", e)))?;
            let palavra_id: i64 = row
                .try_get("id")
                .map_err(|e| RepositoryError::QueryError(format!("term id: {}", e)))?;

            sqlx::query(
                "INSERT INTO resumopalavra (resumo_id, palavra_id, frequencia) VALUES (?1, ?2, ?3)",
            )
            .bind(resumo_id)
            .bind(palavra_id)
            .bind(keyword.frequencia)
            .execute(&mut **tx)
            .await
            .map_err(|e| RepositoryError::QueryError(format!("insert association: {}", e)))?;
        }
        Ok(())
    }

    fn row_to_summary(row: &sqlx::sqlite::SqliteRow) -> Result<Summary, RepositoryError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::QueryError(format!("Failed to get id: {}", e)))?;
        let texto: String = row
            .try_get("texto")
            .map_err(|e| RepositoryError::QueryError(format!("Failed to get texto: {}", e)))?;
        Ok(Summary { id, texto })
    }
}

#[async_trait]
impl SummaryRepository for SqliteSummaryRepository {
    async fn create(&self, texto: &str, keywords: &[Keyword]) -> Result<Summary, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;

        let result = sqlx::query("INSERT INTO resumo (texto) VALUES (?1)")
            .bind(texto)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::QueryError(format!("insert resumo: {}", e)))?;
        let id = result.last_insert_rowid();

        Self::insert_associations(&mut tx, id, keywords).await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;

        debug!("stored summary {} with {} keywords", id, keywords.len());
        Ok(Summary {
            id,
            texto: texto.to_string(),
        })
    }

    async fn list(&self) -> Result<Vec<Summary>, RepositoryError> {
        let rows = sqlx::query("SELECT id, texto FROM resumo ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryError(format!("list resumos: {}", e)))?;

        rows.iter().map(Self::row_to_summary).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Summary>, RepositoryError> {
        let row = sqlx::query("SELECT id, texto FROM resumo WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryError(format!("get resumo: {}", e)))?;

        row.as_ref().map(Self::row_to_summary).transpose()
    }

    async fn keywords_for(&self, id: i64) -> Result<Vec<Keyword>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT p.termo AS termo, rp.frequencia AS frequencia
            FROM palavrachave p
            JOIN resumopalavra rp ON rp.palavra_id = p.id
            WHERE rp.resumo_id = ?1
            ORDER BY rp.frequencia DESC, p.termo
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryError(format!("keywords for resumo: {}", e)))?;

        rows.iter()
            .map(|row| {
                let termo: String = row
                    .try_get("termo")
                    .map_err(|e| RepositoryError::QueryError(format!("Failed to get termo: {}", e)))?;
                let frequencia: i64 = row.try_get("frequencia").map_err(|e| {
                    RepositoryError::QueryError(format!("Failed to get frequencia: {}", e))
                })?;
                Ok(Keyword { termo, frequencia })
            })
            .collect()
    }

    async fn update(
        &self,
        id: i64,
        texto: &str,
        keywords: &[Keyword],
    ) -> Result<Option<Summary>, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;

        let result = sqlx::query("UPDATE resumo SET texto = ?1 WHERE id = ?2")
            .bind(texto)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::QueryError(format!("update resumo: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM resumopalavra WHERE resumo_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::QueryError(format!("delete associations: {}", e)))?;

        Self::insert_associations(&mut tx, id, keywords).await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;

        debug!("updated summary {} with {} keywords", id, keywords.len());
        Ok(Some(Summary {
            id,
            texto: texto.to_string(),
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;

        // explicit cascade, not left to the storage engine
        sqlx::query("DELETE FROM resumopalavra WHERE resumo_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::QueryError(format!("delete associations: {}", e)))?;

        let result = sqlx::query("DELETE FROM resumo WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::QueryError(format!("delete resumo: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
