//! PostgreSQL costing repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{CostingInput, CostingRecord, CostingResult};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::CostingRepository;
use crate::error::AppResult;

#[derive(Clone)]
pub struct PgCostingRepository {
    db: PgPool,
}

impl PgCostingRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct CostingRecordRow {
    id: Uuid,
    order_ref: String,
    customer_name: Option<String>,
    notes: Option<String>,
    input: Json<CostingInput>,
    result: Json<CostingResult>,
    revision: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CostingRecordRow> for CostingRecord {
    fn from(row: CostingRecordRow) -> Self {
        CostingRecord {
            id: row.id,
            order_ref: row.order_ref,
            customer_name: row.customer_name,
            notes: row.notes,
            input: row.input.0,
            result: row.result.0,
            revision: row.revision,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, order_ref, customer_name, notes, input, result, revision, created_at, updated_at
    FROM costing_records
"#;

#[async_trait]
impl CostingRepository for PgCostingRepository {
    async fn insert(&self, record: &CostingRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO costing_records (
                id, order_ref, customer_name, notes, input, result,
                production_cost_per_metre, total_production_cost,
                revision, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(record.id)
        .bind(&record.order_ref)
        .bind(&record.customer_name)
        .bind(&record.notes)
        .bind(Json(&record.input))
        .bind(Json(&record.result))
        .bind(record.result.production_cost_per_metre)
        .bind(record.result.total_production_cost)
        .bind(record.revision)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<CostingRecord>> {
        let row = sqlx::query_as::<_, CostingRecordRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(CostingRecord::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<CostingRecord>> {
        let rows = sqlx::query_as::<_, CostingRecordRow>(&format!(
            "{} ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CostingRecord::from).collect())
    }

    async fn save(&self, record: &CostingRecord) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE costing_records
            SET order_ref = $2,
                customer_name = $3,
                notes = $4,
                input = $5,
                result = $6,
                production_cost_per_metre = $7,
                total_production_cost = $8,
                revision = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.order_ref)
        .bind(&record.customer_name)
        .bind(&record.notes)
        .bind(Json(&record.input))
        .bind(Json(&record.result))
        .bind(record.result.production_cost_per_metre)
        .bind(record.result.total_production_cost)
        .bind(record.revision)
        .bind(record.updated_at)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM costing_records WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
