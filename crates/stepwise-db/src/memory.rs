//! In-process solution store.

use async_trait::async_trait;
use stepwise_common::SolutionRecord;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::store::SolutionStore;

/// Keeps records in insertion order; nothing survives a restart.
#[derive(Default)]
pub struct MemorySolutionStore {
    records: RwLock<Vec<SolutionRecord>>,
}

impl MemorySolutionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SolutionStore for MemorySolutionStore {
    async fn save(&self, record: SolutionRecord) -> Result<SolutionRecord> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<SolutionRecord>> {
        Ok(self.records.read().await.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SolutionRecord>> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}
