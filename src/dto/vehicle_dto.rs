use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{vehicle::Vehicle, PeriodType};
use crate::services::ledger::PeriodSummary;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100), custom = "crate::utils::validation::validate_not_empty")]
    pub name: String,
    #[validate(length(max = 50))]
    pub brand: Option<String>,
    #[validate(length(max = 50))]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(max = 20), custom = "crate::utils::validation::validate_license_plate")]
    pub license_plate: Option<String>,
    #[validate(range(min = 0, max = 10000000))]
    pub initial_odometer: Option<i32>,
    pub is_active: Option<bool>,
}

// Request para actualizar un vehículo. `current_odometer` no se acepta:
// sólo lo escribe el libro de repostajes.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100), custom = "crate::utils::validation::validate_not_empty")]
    pub name: Option<String>,
    #[validate(length(max = 50))]
    pub brand: Option<String>,
    #[validate(length(max = 50))]
    pub model: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(max = 20), custom = "crate::utils::validation::validate_license_plate")]
    pub license_plate: Option<String>,
    #[validate(range(min = 0, max = 10000000))]
    pub initial_odometer: Option<i32>,
    pub is_active: Option<bool>,
}

// Response de vehículo. La matrícula no se expone en la API.
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub initial_odometer: i32,
    pub current_odometer: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            initial_odometer: vehicle.initial_odometer,
            current_odometer: vehicle.current_odometer,
            is_active: vehicle.is_active,
            created_at: vehicle.created_at,
        }
    }
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query del resumen por periodo: por defecto el mes en curso
#[derive(Debug, Default, Deserialize)]
pub struct VehicleSummaryQuery {
    pub period: Option<PeriodType>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct VehicleSummaryResponse {
    pub vehicle_id: Uuid,
    pub period_type: PeriodType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(flatten)]
    pub summary: PeriodSummary,
}
