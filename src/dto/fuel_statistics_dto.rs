use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::PeriodType;

// Reconstruir la estadística del periodo que contiene `date` (hoy por defecto)
#[derive(Debug, Deserialize)]
pub struct RebuildStatisticsRequest {
    pub vehicle_id: Uuid,
    #[serde(default)]
    pub period_type: PeriodType,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FuelStatisticsFilters {
    pub vehicle_id: Option<Uuid>,
    pub period_type: Option<PeriodType>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
