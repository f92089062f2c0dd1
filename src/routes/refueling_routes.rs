use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::refueling_controller::RefuelingController;
use crate::dto::api_dto::ApiResponse;
use crate::dto::refueling_dto::{
    CreateRefuelingRequest, RefuelingFilters, RefuelingResponse, UpdateRefuelingRequest,
};
use crate::routes::deleted;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_refueling_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_refuelings).post(create_refueling))
        .route("/:id", get(get_refueling).put(update_refueling).delete(delete_refueling))
}

async fn create_refueling(
    State(state): State<AppState>,
    Json(request): Json<CreateRefuelingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RefuelingResponse>>), AppError> {
    let controller = RefuelingController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_refuelings(
    State(state): State<AppState>,
    Query(filters): Query<RefuelingFilters>,
) -> Result<Json<Vec<RefuelingResponse>>, AppError> {
    let controller = RefuelingController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_refueling(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RefuelingResponse>, AppError> {
    let controller = RefuelingController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_refueling(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRefuelingRequest>,
) -> Result<Json<ApiResponse<RefuelingResponse>>, AppError> {
    let controller = RefuelingController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_refueling(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let controller = RefuelingController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(deleted("Refueling deleted"))
}
