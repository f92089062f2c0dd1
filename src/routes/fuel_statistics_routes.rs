use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::fuel_statistics_controller::FuelStatisticsController;
use crate::dto::api_dto::ApiResponse;
use crate::dto::fuel_statistics_dto::{FuelStatisticsFilters, RebuildStatisticsRequest};
use crate::models::fuel_statistics::FuelStatistics;
use crate::routes::deleted;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fuel_statistics_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_statistics))
        .route("/rebuild", post(rebuild_statistics))
        .route("/:id", get(get_statistics).delete(delete_statistics))
}

async fn list_statistics(
    State(state): State<AppState>,
    Query(filters): Query<FuelStatisticsFilters>,
) -> Result<Json<Vec<FuelStatistics>>, AppError> {
    let controller = FuelStatisticsController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_statistics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FuelStatistics>, AppError> {
    let controller = FuelStatisticsController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn rebuild_statistics(
    State(state): State<AppState>,
    Json(request): Json<RebuildStatisticsRequest>,
) -> Result<Json<ApiResponse<FuelStatistics>>, AppError> {
    let controller = FuelStatisticsController::new(state.pool.clone());
    let response = controller.rebuild(request).await?;
    Ok(Json(response))
}

async fn delete_statistics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let controller = FuelStatisticsController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(deleted("Fuel statistics deleted"))
}
