use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::{
    payment_template_controller::PaymentTemplateController,
    recurring_payment_controller::RecurringPaymentController, utility_controller::UtilityController,
};
use crate::dto::api_dto::{ApiResponse, Pagination};
use crate::dto::utility_dto::{
    ApplyTemplateRequest, CompanyResponse, CreateCompanyRequest, CreatePaymentRequest,
    CreateRecurringPaymentRequest, CreateTemplateRequest, PaymentFilters, PaymentResponse,
    RecurringPaymentFilters, RecurringPaymentResponse, SummaryQuery, TemplateResponse, UpdateCompanyRequest,
    UpdatePaymentRequest, UpdateRecurringPaymentRequest, UpdateTemplateRequest,
};
use crate::models::utility::MonthlySummary;
use crate::routes::deleted;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_utility_company_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route("/:id", get(get_company).put(update_company).delete(delete_company))
}

pub fn create_utility_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/summary", get(monthly_summary))
        .route("/:id", get(get_payment).put(update_payment).delete(delete_payment))
}

pub fn create_recurring_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recurring).post(create_recurring))
        .route("/generate", post(generate_payments))
        .route("/:id", get(get_recurring).put(update_recurring).delete(delete_recurring))
}

pub fn create_payment_template_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates).post(create_template))
        .route("/:id", get(get_template).put(update_template).delete(delete_template))
        .route("/:id/apply", post(apply_template))
}

// Compañías

async fn create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyResponse>>), AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller.create_company(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_companies(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller
        .list_companies(pagination.limit, pagination.offset)
        .await?;
    Ok(Json(response))
}

async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyResponse>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller.get_company(id).await?;
    Ok(Json(response))
}

async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller.update_company(id, request).await?;
    Ok(Json(response))
}

async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    controller.delete_company(id).await?;
    Ok(deleted("Company deleted"))
}

// Pagos

async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller.create_payment(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_payments(
    State(state): State<AppState>,
    Query(filters): Query<PaymentFilters>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller.list_payments(filters).await?;
    Ok(Json(response))
}

async fn monthly_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<MonthlySummary>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller.monthly_summary(query).await?;
    Ok(Json(response))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller.get_payment(id).await?;
    Ok(Json(response))
}

async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<PaymentResponse>>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    let response = controller.update_payment(id, request).await?;
    Ok(Json(response))
}

async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let controller = UtilityController::new(state.pool.clone());
    controller.delete_payment(id).await?;
    Ok(deleted("Payment deleted"))
}

// Pagos regulares

async fn create_recurring(
    State(state): State<AppState>,
    Json(request): Json<CreateRecurringPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RecurringPaymentResponse>>), AppError> {
    let controller = RecurringPaymentController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_recurring(
    State(state): State<AppState>,
    Query(filters): Query<RecurringPaymentFilters>,
) -> Result<Json<Vec<RecurringPaymentResponse>>, AppError> {
    let controller = RecurringPaymentController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_recurring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecurringPaymentResponse>, AppError> {
    let controller = RecurringPaymentController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_recurring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecurringPaymentRequest>,
) -> Result<Json<ApiResponse<RecurringPaymentResponse>>, AppError> {
    let controller = RecurringPaymentController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_recurring(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let controller = RecurringPaymentController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(deleted("Recurring payment deleted"))
}

async fn generate_payments(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<Vec<PaymentResponse>>>, AppError> {
    let controller = RecurringPaymentController::new(state.pool.clone());
    let response = controller.generate(query).await?;
    Ok(Json(response))
}

// Plantillas

async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TemplateResponse>>), AppError> {
    let controller = PaymentTemplateController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_templates(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<TemplateResponse>>, AppError> {
    let controller = PaymentTemplateController::new(state.pool.clone());
    let response = controller.list(pagination.limit, pagination.offset).await?;
    Ok(Json(response))
}

async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TemplateResponse>, AppError> {
    let controller = PaymentTemplateController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<ApiResponse<TemplateResponse>>, AppError> {
    let controller = PaymentTemplateController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let controller = PaymentTemplateController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(deleted("Template deleted"))
}

async fn apply_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApplyTemplateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), AppError> {
    let controller = PaymentTemplateController::new(state.pool.clone());
    let response = controller.apply(id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
