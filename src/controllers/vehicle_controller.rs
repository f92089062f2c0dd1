use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_dto::{page, ApiResponse};
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters, VehicleResponse, VehicleSummaryQuery,
    VehicleSummaryResponse,
};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::statistics_service::StatisticsService;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
    statistics: StatisticsService,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            statistics: StatisticsService::new(pool),
        }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self.repository.create(request).await?;
        info!("🚗 Vehicle {} created ({})", vehicle.id, vehicle.name);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehicle created",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<VehicleResponse>, AppError> {
        let (limit, offset) = page(filters.limit, filters.offset);
        let vehicles = self.repository.list(&filters, limit, offset).await?;

        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        info!("✏️ Vehicle {} updated (odometer {})", vehicle.id, vehicle.current_odometer);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehicle updated",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", id));
        }

        info!("🗑️ Vehicle {} deleted with its refuelings", id);
        Ok(())
    }

    /// Agregado en vivo del periodo pedido (mes en curso por defecto)
    pub async fn summary(&self, id: Uuid, query: VehicleSummaryQuery) -> Result<VehicleSummaryResponse, AppError> {
        if !self.repository.exists(id).await? {
            return Err(not_found_error("Vehicle", id));
        }

        let report = self
            .statistics
            .period_report(id, query.period.unwrap_or_default(), query.date)
            .await?;

        Ok(VehicleSummaryResponse {
            vehicle_id: id,
            period_type: report.period_type,
            period_start: report.start,
            period_end: report.end,
            summary: report.summary,
        })
    }
}
