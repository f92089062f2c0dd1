use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::gas_station_controller::GasStationController;
use crate::dto::api_dto::ApiResponse;
use crate::dto::gas_station_dto::{
    CreateGasStationRequest, GasStationFilters, GasStationResponse, UpdateGasStationRequest,
};
use crate::routes::deleted;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_gas_station_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_gas_stations).post(create_gas_station))
        .route("/:id", get(get_gas_station).put(update_gas_station).delete(delete_gas_station))
}

async fn create_gas_station(
    State(state): State<AppState>,
    Json(request): Json<CreateGasStationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GasStationResponse>>), AppError> {
    let controller = GasStationController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_gas_stations(
    State(state): State<AppState>,
    Query(filters): Query<GasStationFilters>,
) -> Result<Json<Vec<GasStationResponse>>, AppError> {
    let controller = GasStationController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_gas_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GasStationResponse>, AppError> {
    let controller = GasStationController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_gas_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateGasStationRequest>,
) -> Result<Json<ApiResponse<GasStationResponse>>, AppError> {
    let controller = GasStationController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_gas_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let controller = GasStationController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(deleted("Gas station deleted"))
}
