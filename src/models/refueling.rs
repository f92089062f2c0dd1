//! Modelo de Refueling
//!
//! Un repostaje de un vehículo. El odómetro no se guarda: se deriva del
//! libro completo del vehículo (ver `services::ledger`).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::FuelType;
use crate::services::ledger;

/// Refueling - mapea exactamente a la tabla refuelings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Refueling {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub gas_station_id: Option<Uuid>,
    pub date: NaiveDate,
    pub month: Option<i32>,
    pub quarter: Option<i32>,
    /// Kilómetros desde el repostaje anterior
    pub mileage: i32,
    pub fuel_quantity: Decimal,
    pub price_per_liter: Decimal,
    pub total_cost: Option<Decimal>,
    pub discount: Decimal,
    pub fuel_type: Option<FuelType>,
    pub is_full_tank: bool,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Refueling {
    pub fn effective_cost(&self) -> Decimal {
        ledger::effective_cost(self.total_cost, Some(self.discount))
    }

    pub fn fuel_consumption(&self) -> Decimal {
        ledger::fuel_consumption(self.fuel_quantity, self.mileage)
    }
}
