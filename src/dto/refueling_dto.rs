use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{refueling::Refueling, FuelType};

// Request para registrar un repostaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRefuelingRequest {
    pub vehicle_id: Uuid,
    pub gas_station_id: Option<Uuid>,
    pub date: NaiveDate,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<i32>,
    #[validate(range(min = 1, max = 4))]
    pub quarter: Option<i32>,
    #[validate(range(
        min = 1,
        max = 100000,
        message = "Mileage since the previous refueling must be between 1 and 100000 km"
    ))]
    pub mileage: i32,
    #[validate(custom = "crate::utils::validation::validate_unit_amount")]
    pub fuel_quantity: Decimal,
    #[validate(custom = "crate::utils::validation::validate_unit_amount")]
    pub price_per_liter: Decimal,
    #[validate(custom = "crate::utils::validation::validate_cost")]
    pub total_cost: Option<Decimal>,
    #[validate(custom = "crate::utils::validation::validate_cost")]
    pub discount: Option<Decimal>,
    pub fuel_type: Option<FuelType>,
    pub is_full_tank: Option<bool>,
    pub comment: Option<String>,
}

// Request para editar un repostaje. Es la única vía para corregir fechas
// anteriores al último repostaje.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRefuelingRequest {
    pub vehicle_id: Option<Uuid>,
    pub gas_station_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<i32>,
    #[validate(range(min = 1, max = 4))]
    pub quarter: Option<i32>,
    #[validate(range(min = 0, max = 100000))]
    pub mileage: Option<i32>,
    #[validate(custom = "crate::utils::validation::validate_unit_amount")]
    pub fuel_quantity: Option<Decimal>,
    #[validate(custom = "crate::utils::validation::validate_unit_amount")]
    pub price_per_liter: Option<Decimal>,
    #[validate(custom = "crate::utils::validation::validate_cost")]
    pub total_cost: Option<Decimal>,
    #[validate(custom = "crate::utils::validation::validate_cost")]
    pub discount: Option<Decimal>,
    pub fuel_type: Option<FuelType>,
    pub is_full_tank: Option<bool>,
    pub comment: Option<String>,
}

// Response de repostaje con los valores derivados
#[derive(Debug, Serialize)]
pub struct RefuelingResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub gas_station_id: Option<Uuid>,
    pub date: NaiveDate,
    pub month: Option<i32>,
    pub quarter: Option<i32>,
    pub mileage: i32,
    pub odometer: i64,
    pub fuel_quantity: Decimal,
    pub price_per_liter: Decimal,
    pub total_cost: Option<Decimal>,
    pub discount: Decimal,
    pub effective_cost: Decimal,
    pub fuel_consumption: Decimal,
    pub fuel_type: Option<FuelType>,
    pub is_full_tank: bool,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefuelingResponse {
    pub fn new(refueling: Refueling, odometer: i64) -> Self {
        Self {
            effective_cost: refueling.effective_cost(),
            fuel_consumption: refueling.fuel_consumption().round_dp(2),
            id: refueling.id,
            vehicle_id: refueling.vehicle_id,
            gas_station_id: refueling.gas_station_id,
            date: refueling.date,
            month: refueling.month,
            quarter: refueling.quarter,
            mileage: refueling.mileage,
            odometer,
            fuel_quantity: refueling.fuel_quantity,
            price_per_liter: refueling.price_per_liter,
            total_cost: refueling.total_cost,
            discount: refueling.discount,
            fuel_type: refueling.fuel_type,
            is_full_tank: refueling.is_full_tank,
            comment: refueling.comment,
            created_at: refueling.created_at,
            updated_at: refueling.updated_at,
        }
    }
}

/// Filtros para búsqueda de repostajes
#[derive(Debug, Default, Deserialize)]
pub struct RefuelingFilters {
    pub vehicle_id: Option<Uuid>,
    pub gas_station_id: Option<Uuid>,
    pub fuel_type: Option<FuelType>,
    pub month: Option<i32>,
    pub quarter: Option<i32>,
    pub is_full_tank: Option<bool>,
    pub mileage: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
