use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{fuel_price::FuelPrice, FuelType};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFuelPriceRequest {
    pub date: NaiveDate,
    pub fuel_type: FuelType,
    #[validate(custom = "crate::utils::validation::validate_unit_amount")]
    pub price: Decimal,
    pub gas_station_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFuelPriceRequest {
    pub date: Option<NaiveDate>,
    pub fuel_type: Option<FuelType>,
    #[validate(custom = "crate::utils::validation::validate_unit_amount")]
    pub price: Option<Decimal>,
    pub gas_station_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct FuelPriceResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub fuel_type: FuelType,
    pub fuel_type_label: &'static str,
    pub price: Decimal,
    pub gas_station_id: Option<Uuid>,
}

impl From<FuelPrice> for FuelPriceResponse {
    fn from(price: FuelPrice) -> Self {
        Self {
            id: price.id,
            date: price.date,
            fuel_type: price.fuel_type,
            fuel_type_label: price.fuel_type.label(),
            price: price.price,
            gas_station_id: price.gas_station_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FuelPriceFilters {
    pub fuel_type: Option<FuelType>,
    pub gas_station_id: Option<Uuid>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
