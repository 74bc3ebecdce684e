//! HTTP handlers for costing endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::{
    CostingInput, CostingRecord, CreateCostingRecordInput, ListCostingRecordsQuery,
    UpdateCostingRecordInput,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::PayloadJson;
use crate::services::costing::{ApplyChangesInput, CostingPreview, CostingService};
use crate::AppState;

/// Evaluate a recipe without persisting it
pub async fn preview_costing(
    State(state): State<AppState>,
    PayloadJson(input): PayloadJson<CostingInput>,
) -> AppResult<Json<CostingPreview>> {
    let service = CostingService::new(state.costing);
    Ok(Json(service.preview(&input)))
}

/// Create a new costing record
pub async fn create_costing(
    State(state): State<AppState>,
    PayloadJson(input): PayloadJson<CreateCostingRecordInput>,
) -> AppResult<(StatusCode, Json<CostingRecord>)> {
    let service = CostingService::new(state.costing);
    let record = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List costing records
pub async fn list_costings(
    State(state): State<AppState>,
    Query(query): Query<ListCostingRecordsQuery>,
) -> AppResult<Json<Vec<CostingRecord>>> {
    let service = CostingService::new(state.costing);
    let records = service.list(&query).await?;
    Ok(Json(records))
}

/// Get a costing record by ID
pub async fn get_costing(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> AppResult<Json<CostingRecord>> {
    let service = CostingService::new(state.costing);
    let record = service.get(record_id).await?;
    Ok(Json(record))
}

/// Replace a record's costing input
pub async fn replace_costing(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    PayloadJson(input): PayloadJson<CostingInput>,
) -> AppResult<Json<CostingRecord>> {
    let service = CostingService::new(state.costing);
    let record = service.replace_input(record_id, input).await?;
    Ok(Json(record))
}

/// Partially update a costing record
pub async fn update_costing(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    PayloadJson(input): PayloadJson<UpdateCostingRecordInput>,
) -> AppResult<Json<CostingRecord>> {
    let service = CostingService::new(state.costing);
    let record = service.update(record_id, input).await?;
    Ok(Json(record))
}

/// Apply line-level edits to a costing record
pub async fn apply_costing_changes(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    PayloadJson(input): PayloadJson<ApplyChangesInput>,
) -> AppResult<Json<CostingRecord>> {
    let service = CostingService::new(state.costing);
    let record = service.apply_changes(record_id, input.changes).await?;
    Ok(Json(record))
}

/// Recompute a record from its stored input
pub async fn recalculate_costing(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> AppResult<Json<CostingRecord>> {
    let service = CostingService::new(state.costing);
    let record = service.recalculate(record_id).await?;
    Ok(Json(record))
}

/// Delete a costing record
pub async fn delete_costing(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CostingService::new(state.costing);
    service.delete(record_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
