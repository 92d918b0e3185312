//! The persistence gateway contract.

use std::sync::Arc;

use async_trait::async_trait;
use stepwise_common::SolutionRecord;
use uuid::Uuid;

use crate::error::Result;

/// Append-only store of solved problems.
#[async_trait]
pub trait SolutionStore: Send + Sync {
    /// Persist a new record and return it as stored.
    async fn save(&self, record: SolutionRecord) -> Result<SolutionRecord>;

    /// All records, newest first.
    async fn list_all(&self) -> Result<Vec<SolutionRecord>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SolutionRecord>>;

    async fn count(&self) -> Result<u64>;
}

pub type SharedStore = Arc<dyn SolutionStore>;
