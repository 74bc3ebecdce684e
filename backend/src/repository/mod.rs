//! Data access for costing records
//!
//! Repositories only move records in and out of storage. Every rule about
//! when a result must be recomputed lives in the service layer and in
//! `shared::costing`.

mod memory;
mod postgres;

pub use memory::InMemoryCostingRepository;
pub use postgres::PgCostingRepository;

use async_trait::async_trait;
use shared::CostingRecord;
use uuid::Uuid;

use crate::error::AppResult;

#[async_trait]
pub trait CostingRepository: Send + Sync {
    async fn insert(&self, record: &CostingRecord) -> AppResult<()>;

    async fn get(&self, id: Uuid) -> AppResult<Option<CostingRecord>>;

    /// Newest first
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<CostingRecord>>;

    /// Overwrite the whole stored record. There is no revision predicate, so
    /// of two concurrent saves the later one wins.
    ///
    /// Returns `false` when the record no longer exists.
    async fn save(&self, record: &CostingRecord) -> AppResult<bool>;

    /// Returns `false` when there was nothing to delete
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
