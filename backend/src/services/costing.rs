//! Costing record service
//!
//! The persistence path for the fabric costing engine. Every write goes
//! through `shared::costing`, so a stored result is always the result of
//! evaluating the stored input.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::{
    apply_record_changes, apply_record_update, assess_input, calculate_costing, create_record,
    is_stale, recalculate_record, replace_record_input, CostingAssessment, CostingChange,
    CostingInput, CostingRecord, CostingResult, CreateCostingRecordInput,
    ListCostingRecordsQuery, UpdateCostingRecordInput,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::repository::CostingRepository;

/// Costing service for evaluating and persisting costing records
#[derive(Clone)]
pub struct CostingService {
    repo: Arc<dyn CostingRepository>,
}

/// Evaluation returned by the preview endpoint; nothing is persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostingPreview {
    pub result: CostingResult,
    pub assessment: CostingAssessment,
}

/// Input for applying line-level edits to a stored record
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyChangesInput {
    pub changes: Vec<CostingChange>,
}

impl CostingService {
    /// Create a new CostingService instance
    pub fn new(repo: Arc<dyn CostingRepository>) -> Self {
        Self { repo }
    }

    /// Evaluate a recipe without touching storage
    pub fn preview(&self, input: &CostingInput) -> CostingPreview {
        let result = calculate_costing(input);
        let assessment = assess_input(input);
        tracing::debug!(
            production_cost = %result.production_cost_per_metre,
            complete = assessment.is_complete(),
            "Costing preview evaluated"
        );
        CostingPreview { result, assessment }
    }

    /// Create a costing record
    pub async fn create(&self, input: CreateCostingRecordInput) -> AppResult<CostingRecord> {
        input.validate()?;
        let order_ref = input.order_ref.trim().to_string();
        if order_ref.is_empty() {
            return Err(AppError::Validation {
                field: "order_ref".to_string(),
                message: "Order reference is required".to_string(),
            });
        }

        let record = create_record(
            CreateCostingRecordInput { order_ref, ..input },
            Utc::now(),
        );
        self.repo.insert(&record).await?;

        tracing::info!(
            record_id = %record.id,
            order_ref = %record.order_ref,
            production_cost = %record.result.production_cost_per_metre,
            "Costing record created"
        );
        Ok(record)
    }

    /// Get a costing record by ID.
    ///
    /// A stored result that no longer matches its input is recomputed and
    /// written back before being returned.
    pub async fn get(&self, id: Uuid) -> AppResult<CostingRecord> {
        let record = self.fetch(id).await?;
        if !is_stale(&record.input, &record.result) {
            return Ok(record);
        }

        tracing::warn!(record_id = %id, revision = record.revision, "Stale costing result, recomputing");
        let healed = recalculate_record(&record, Utc::now());
        self.persist(&healed).await?;
        Ok(healed)
    }

    /// List costing records, newest first
    pub async fn list(&self, query: &ListCostingRecordsQuery) -> AppResult<Vec<CostingRecord>> {
        self.repo.list(query.limit(), query.offset()).await
    }

    /// Replace the costing input wholesale
    pub async fn replace_input(&self, id: Uuid, input: CostingInput) -> AppResult<CostingRecord> {
        let record = self.fetch(id).await?;
        let next = replace_record_input(&record, input, Utc::now());
        self.persist(&next).await?;
        Ok(next)
    }

    /// Partially update a record, recomputing when costing fields change
    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateCostingRecordInput,
    ) -> AppResult<CostingRecord> {
        update.validate()?;
        let record = self.fetch(id).await?;
        let next = apply_record_update(&record, update, Utc::now());
        self.persist(&next).await?;
        Ok(next)
    }

    /// Apply line-level edits, all or nothing
    pub async fn apply_changes(
        &self,
        id: Uuid,
        changes: Vec<CostingChange>,
    ) -> AppResult<CostingRecord> {
        let record = self.fetch(id).await?;
        let next = apply_record_changes(&record, changes, Utc::now())?;
        self.persist(&next).await?;
        Ok(next)
    }

    /// Force a recompute from the stored input
    pub async fn recalculate(&self, id: Uuid) -> AppResult<CostingRecord> {
        let record = self.fetch(id).await?;
        let next = recalculate_record(&record, Utc::now());
        self.persist(&next).await?;
        Ok(next)
    }

    /// Delete a costing record
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Costing record".to_string()));
        }
        tracing::info!(record_id = %id, "Costing record deleted");
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> AppResult<CostingRecord> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Costing record".to_string()))
    }

    async fn persist(&self, record: &CostingRecord) -> AppResult<()> {
        if !self.repo.save(record).await? {
            return Err(AppError::NotFound("Costing record".to_string()));
        }
        tracing::info!(
            record_id = %record.id,
            revision = record.revision,
            production_cost = %record.result.production_cost_per_metre,
            "Costing record saved"
        );
        Ok(())
    }
}
