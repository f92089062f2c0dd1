use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::gas_station::GasStation;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGasStationRequest {
    #[validate(length(min = 1, max = 255), custom = "crate::utils::validation::validate_not_empty")]
    pub name: String,
    #[validate(length(max = 50))]
    pub number: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub company: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGasStationRequest {
    #[validate(length(min = 1, max = 255), custom = "crate::utils::validation::validate_not_empty")]
    pub name: Option<String>,
    #[validate(length(max = 50))]
    pub number: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GasStationResponse {
    pub id: Uuid,
    pub name: String,
    pub number: String,
    pub address: String,
    pub company: String,
    pub display_name: String,
}

impl From<GasStation> for GasStationResponse {
    fn from(station: GasStation) -> Self {
        Self {
            display_name: station.display_name(),
            id: station.id,
            name: station.name,
            number: station.number,
            address: station.address,
            company: station.company,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GasStationFilters {
    pub name: Option<String>,
    pub company: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
