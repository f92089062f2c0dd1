use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::api_dto::{page, ApiResponse};
use crate::dto::fuel_statistics_dto::{FuelStatisticsFilters, RebuildStatisticsRequest};
use crate::models::fuel_statistics::FuelStatistics;
use crate::repositories::{
    fuel_statistics_repository::FuelStatisticsRepository, vehicle_repository::VehicleRepository,
};
use crate::services::statistics_service::StatisticsService;
use crate::utils::errors::{field_error, not_found_error, AppError};

pub struct FuelStatisticsController {
    repository: FuelStatisticsRepository,
    vehicles: VehicleRepository,
    service: StatisticsService,
}

impl FuelStatisticsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FuelStatisticsRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            service: StatisticsService::new(pool),
        }
    }

    pub async fn list(&self, filters: FuelStatisticsFilters) -> Result<Vec<FuelStatistics>, AppError> {
        let (limit, offset) = page(filters.limit, filters.offset);
        self.repository.list(&filters, limit, offset).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<FuelStatistics, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fuel statistics", id))
    }

    pub async fn rebuild(
        &self,
        request: RebuildStatisticsRequest,
    ) -> Result<ApiResponse<FuelStatistics>, AppError> {
        if !self.vehicles.exists(request.vehicle_id).await? {
            return Err(field_error("vehicle_id", "not_found", "Vehicle does not exist"));
        }

        let statistics = self
            .service
            .rebuild(request.vehicle_id, request.period_type, request.date)
            .await?;

        Ok(ApiResponse::success_with_message(statistics, "Statistics rebuilt"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Fuel statistics", id));
        }
        Ok(())
    }
}
