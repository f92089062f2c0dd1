//! Modelo de FuelPrice
//!
//! `(date, fuel_type, gas_station_id)` identifica un precio; una estación
//! NULL cuenta como valor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::FuelType;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FuelPrice {
    pub id: Uuid,
    pub date: NaiveDate,
    pub fuel_type: FuelType,
    pub price: Decimal,
    pub gas_station_id: Option<Uuid>,
}
