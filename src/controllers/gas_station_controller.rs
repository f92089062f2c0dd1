use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_dto::{page, ApiResponse};
use crate::dto::gas_station_dto::{
    CreateGasStationRequest, GasStationFilters, GasStationResponse, UpdateGasStationRequest,
};
use crate::repositories::gas_station_repository::GasStationRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct GasStationController {
    repository: GasStationRepository,
}

impl GasStationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: GasStationRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateGasStationRequest,
    ) -> Result<ApiResponse<GasStationResponse>, AppError> {
        request.validate()?;

        let station = self.repository.create(request).await?;
        info!("⛽ Gas station created: {}", station.display_name());

        Ok(ApiResponse::success_with_message(station.into(), "Gas station created"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<GasStationResponse, AppError> {
        let station = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Gas station", id))?;

        Ok(station.into())
    }

    pub async fn list(&self, filters: GasStationFilters) -> Result<Vec<GasStationResponse>, AppError> {
        let (limit, offset) = page(filters.limit, filters.offset);
        let stations = self.repository.list(&filters, limit, offset).await?;

        Ok(stations.into_iter().map(GasStationResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateGasStationRequest,
    ) -> Result<ApiResponse<GasStationResponse>, AppError> {
        request.validate()?;

        let station = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Gas station", id))?;

        Ok(ApiResponse::success_with_message(station.into(), "Gas station updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Gas station", id));
        }

        info!("🗑️ Gas station {} deleted", id);
        Ok(())
    }
}
