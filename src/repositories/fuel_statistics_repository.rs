use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::fuel_statistics_dto::FuelStatisticsFilters;
use crate::models::{fuel_statistics::FuelStatistics, PeriodType};
use crate::services::ledger::PeriodSummary;
use crate::utils::errors::AppError;

pub struct FuelStatisticsRepository {
    pool: PgPool,
}

impl FuelStatisticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta o sobrescribe la fila `(vehicle_id, period, period_type)`
    pub async fn upsert(
        &self,
        vehicle_id: Uuid,
        period: NaiveDate,
        period_type: PeriodType,
        summary: &PeriodSummary,
    ) -> Result<FuelStatistics, AppError> {
        let total_distance = i32::try_from(summary.total_distance)
            .map_err(|_| AppError::Internal(format!("Total distance out of range: {}", summary.total_distance)))?;

        let statistics = sqlx::query_as::<_, FuelStatistics>(
            r#"
            INSERT INTO fuel_statistics (
                id, vehicle_id, period, period_type, total_distance, total_fuel,
                total_cost, avg_consumption, avg_price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (vehicle_id, period, period_type) DO UPDATE
            SET total_distance = EXCLUDED.total_distance,
                total_fuel = EXCLUDED.total_fuel,
                total_cost = EXCLUDED.total_cost,
                avg_consumption = EXCLUDED.avg_consumption,
                avg_price = EXCLUDED.avg_price,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(period)
        .bind(period_type)
        .bind(total_distance)
        .bind(summary.total_fuel)
        .bind(summary.total_cost)
        .bind(summary.avg_consumption)
        .bind(summary.avg_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(statistics)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FuelStatistics>, AppError> {
        let statistics = sqlx::query_as::<_, FuelStatistics>("SELECT * FROM fuel_statistics WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(statistics)
    }

    pub async fn list(
        &self,
        filters: &FuelStatisticsFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FuelStatistics>, AppError> {
        let statistics = sqlx::query_as::<_, FuelStatistics>(
            r#"
            SELECT * FROM fuel_statistics
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
                AND ($2::period_type IS NULL OR period_type = $2)
            ORDER BY period DESC, vehicle_id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.vehicle_id)
        .bind(filters.period_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(statistics)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM fuel_statistics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
