use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_dto::{page, ApiResponse};
use crate::dto::fuel_price_dto::{
    CreateFuelPriceRequest, FuelPriceFilters, FuelPriceResponse, UpdateFuelPriceRequest,
};
use crate::repositories::{
    fuel_price_repository::FuelPriceRepository, gas_station_repository::GasStationRepository,
};
use crate::utils::errors::{field_error, not_found_error, AppError};

const DUPLICATE_PRICE: &str = "A price for this date, fuel type and gas station already exists";

pub struct FuelPriceController {
    repository: FuelPriceRepository,
    gas_stations: GasStationRepository,
}

impl FuelPriceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FuelPriceRepository::new(pool.clone()),
            gas_stations: GasStationRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateFuelPriceRequest,
    ) -> Result<ApiResponse<FuelPriceResponse>, AppError> {
        request.validate()?;
        self.ensure_gas_station(request.gas_station_id).await?;

        if self
            .repository
            .exists_for_point(request.date, request.fuel_type, request.gas_station_id, None)
            .await?
        {
            return Err(AppError::Conflict(DUPLICATE_PRICE.to_string()));
        }

        let price = self
            .repository
            .create(request.date, request.fuel_type, request.price, request.gas_station_id)
            .await?;

        Ok(ApiResponse::success_with_message(price.into(), "Fuel price created"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<FuelPriceResponse, AppError> {
        let price = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fuel price", id))?;

        Ok(price.into())
    }

    pub async fn list(&self, filters: FuelPriceFilters) -> Result<Vec<FuelPriceResponse>, AppError> {
        let (limit, offset) = page(filters.limit, filters.offset);
        let prices = self.repository.list(&filters, limit, offset).await?;

        Ok(prices.into_iter().map(FuelPriceResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateFuelPriceRequest,
    ) -> Result<ApiResponse<FuelPriceResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fuel price", id))?;

        let date = request.date.unwrap_or(current.date);
        let fuel_type = request.fuel_type.unwrap_or(current.fuel_type);
        let gas_station_id = request.gas_station_id.or(current.gas_station_id);
        self.ensure_gas_station(request.gas_station_id).await?;

        if self
            .repository
            .exists_for_point(date, fuel_type, gas_station_id, Some(id))
            .await?
        {
            return Err(AppError::Conflict(DUPLICATE_PRICE.to_string()));
        }

        let price = self
            .repository
            .update(id, date, fuel_type, request.price.unwrap_or(current.price), gas_station_id)
            .await?
            .ok_or_else(|| not_found_error("Fuel price", id))?;

        Ok(ApiResponse::success_with_message(price.into(), "Fuel price updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Fuel price", id));
        }
        Ok(())
    }

    async fn ensure_gas_station(&self, station_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(id) = station_id {
            if !self.gas_stations.exists(id).await? {
                return Err(field_error("gas_station_id", "not_found", "Gas station does not exist"));
            }
        }
        Ok(())
    }
}
