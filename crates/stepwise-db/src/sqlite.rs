//! SQLite-backed solution store.

use async_trait::async_trait;
use stepwise_common::SolutionRecord;
use tracing::debug;
use uuid::Uuid;

use crate::database::Database;
use crate::error::Result;
use crate::schema::{record_to_row, row_to_record, SolutionRow, SOLUTION_COLUMNS};
use crate::store::SolutionStore;

/// Repository for solution records.
#[derive(Clone)]
pub struct SqliteSolutionStore {
    db: Database,
}

impl SqliteSolutionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SolutionStore for SqliteSolutionStore {
    async fn save(&self, record: SolutionRecord) -> Result<SolutionRecord> {
        let (id, problem_type, inputs, solution_html, created_at) = record_to_row(&record)?;

        sqlx::query(&format!(
            "INSERT INTO solutions ({}) VALUES (?, ?, ?, ?, ?)",
            SOLUTION_COLUMNS
        ))
        .bind(id)
        .bind(problem_type)
        .bind(inputs)
        .bind(solution_html)
        .bind(created_at)
        .execute(self.db.pool())
        .await?;

        debug!("Stored solution {}", record.id);
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<SolutionRecord>> {
        let rows: Vec<SolutionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM solutions ORDER BY seq DESC",
            SOLUTION_COLUMNS
        ))
        .fetch_all(self.db.pool())
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SolutionRecord>> {
        let row: Option<SolutionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM solutions WHERE id = ?",
            SOLUTION_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        row.map(row_to_record).transpose()
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM solutions")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count as u64)
    }
}
