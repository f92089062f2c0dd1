//! Estadísticas de consumo
//!
//! Agrega los repostajes de un periodo y guarda el resultado en
//! `fuel_statistics`. La tabla es una caché: se reconstruye bajo demanda.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{fuel_statistics::FuelStatistics, PeriodType};
use crate::repositories::{
    fuel_statistics_repository::FuelStatisticsRepository, refueling_repository::RefuelingRepository,
};
use crate::services::ledger::PeriodSummary;
use crate::utils::errors::AppError;

/// Agregado de un periodo calculado al vuelo
#[derive(Debug, Clone)]
pub struct PeriodReport {
    pub period_type: PeriodType,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub summary: PeriodSummary,
}

pub struct StatisticsService {
    refuelings: RefuelingRepository,
    statistics: FuelStatisticsRepository,
}

impl StatisticsService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            refuelings: RefuelingRepository::new(pool.clone()),
            statistics: FuelStatisticsRepository::new(pool),
        }
    }

    /// Agrega el periodo que contiene `date` (hoy si no se indica)
    pub async fn period_report(
        &self,
        vehicle_id: Uuid,
        period_type: PeriodType,
        date: Option<NaiveDate>,
    ) -> Result<PeriodReport, AppError> {
        let reference = date.unwrap_or_else(|| Utc::now().date_naive());
        let (start, end) = period_type
            .bounds(reference)
            .ok_or_else(|| AppError::BadRequest(format!("Date out of range: {}", reference)))?;

        let records = self.refuelings.list_in_period(vehicle_id, start, end).await?;

        Ok(PeriodReport {
            period_type,
            start,
            end,
            summary: PeriodSummary::aggregate(&records),
        })
    }

    /// Recalcula y guarda la estadística del periodo
    pub async fn rebuild(
        &self,
        vehicle_id: Uuid,
        period_type: PeriodType,
        date: Option<NaiveDate>,
    ) -> Result<FuelStatistics, AppError> {
        let report = self.period_report(vehicle_id, period_type, date).await?;
        let statistics = self
            .statistics
            .upsert(vehicle_id, report.start, period_type, &report.summary)
            .await?;

        info!(
            "📊 Statistics rebuilt for vehicle {} ({:?} from {}): {} refuelings",
            vehicle_id, period_type, report.start, report.summary.refuel_count
        );

        Ok(statistics)
    }
}
