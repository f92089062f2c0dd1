use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::fuel_price_controller::FuelPriceController;
use crate::dto::api_dto::ApiResponse;
use crate::dto::fuel_price_dto::{
    CreateFuelPriceRequest, FuelPriceFilters, FuelPriceResponse, UpdateFuelPriceRequest,
};
use crate::routes::deleted;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fuel_price_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fuel_prices).post(create_fuel_price))
        .route("/:id", get(get_fuel_price).put(update_fuel_price).delete(delete_fuel_price))
}

async fn create_fuel_price(
    State(state): State<AppState>,
    Json(request): Json<CreateFuelPriceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FuelPriceResponse>>), AppError> {
    let controller = FuelPriceController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_fuel_prices(
    State(state): State<AppState>,
    Query(filters): Query<FuelPriceFilters>,
) -> Result<Json<Vec<FuelPriceResponse>>, AppError> {
    let controller = FuelPriceController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_fuel_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FuelPriceResponse>, AppError> {
    let controller = FuelPriceController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_fuel_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFuelPriceRequest>,
) -> Result<Json<ApiResponse<FuelPriceResponse>>, AppError> {
    let controller = FuelPriceController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_fuel_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let controller = FuelPriceController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(deleted("Fuel price deleted"))
}
