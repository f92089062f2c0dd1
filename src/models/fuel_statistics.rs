//! Modelo de FuelStatistics
//!
//! Caché de informes por vehículo y periodo. No se actualiza en la misma
//! transacción que los repostajes; se reconstruye bajo demanda.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::PeriodType;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FuelStatistics {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    /// Primer día del periodo
    pub period: NaiveDate,
    pub period_type: PeriodType,
    pub total_distance: i32,
    pub total_fuel: Decimal,
    pub total_cost: Decimal,
    pub avg_consumption: Decimal,
    pub avg_price: Decimal,
    pub updated_at: DateTime<Utc>,
}
