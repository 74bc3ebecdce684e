//! In-process costing repository, used by tests and local demos

use std::collections::HashMap;

use async_trait::async_trait;
use shared::CostingRecord;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CostingRepository;
use crate::error::AppResult;

#[derive(Default)]
pub struct InMemoryCostingRepository {
    records: RwLock<HashMap<Uuid, CostingRecord>>,
}

impl InMemoryCostingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl CostingRepository for InMemoryCostingRepository {
    async fn insert(&self, record: &CostingRecord) -> AppResult<()> {
        self.records.write().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<CostingRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<CostingRecord>> {
        let records = self.records.read().await;
        let mut all: Vec<CostingRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn save(&self, record: &CostingRecord) -> AppResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.id) {
            Some(stored) => {
                *stored = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}
