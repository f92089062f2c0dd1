use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::utility_controller::UtilityController;
use crate::dto::api_dto::{page, ApiResponse};
use crate::dto::utility_dto::{
    ApplyTemplateRequest, CreatePaymentRequest, CreateTemplateRequest, PaymentResponse, TemplateResponse,
    UpdateTemplateRequest,
};
use crate::repositories::payment_template_repository::PaymentTemplateRepository;
use crate::utils::errors::{field_error, not_found_error, AppError};

pub struct PaymentTemplateController {
    repository: PaymentTemplateRepository,
    payments: UtilityController,
}

impl PaymentTemplateController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PaymentTemplateRepository::new(pool.clone()),
            payments: UtilityController::new(pool),
        }
    }

    pub async fn create(&self, request: CreateTemplateRequest) -> Result<ApiResponse<TemplateResponse>, AppError> {
        request.validate()?;
        let template = self.repository.create(request).await?;
        Ok(ApiResponse::success_with_message(template.into(), "Template created"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TemplateResponse, AppError> {
        let template = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Template", id))?;

        Ok(template.into())
    }

    pub async fn list(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<TemplateResponse>, AppError> {
        let (limit, offset) = page(limit, offset);
        let templates = self.repository.list(limit, offset).await?;
        Ok(templates.into_iter().map(TemplateResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTemplateRequest,
    ) -> Result<ApiResponse<TemplateResponse>, AppError> {
        request.validate()?;

        let template = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Template", id))?;

        Ok(ApiResponse::success_with_message(template.into(), "Template updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Template", id));
        }
        Ok(())
    }

    /// Registra un pago con los datos de la plantilla
    pub async fn apply(
        &self,
        id: Uuid,
        request: ApplyTemplateRequest,
    ) -> Result<ApiResponse<PaymentResponse>, AppError> {
        request.validate()?;

        let template = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Template", id))?;

        let price = request.price.or(template.default_amount).ok_or_else(|| {
            field_error("price", "required", "The template has no default amount; price is required")
        })?;

        info!("📋 Applying template {} ({})", template.id, template.name);

        self.payments
            .create_payment(CreatePaymentRequest {
                date: request.date,
                month: None,
                quarter: None,
                company_id: request.company_id,
                company_name: Some(template.company_name),
                description: template.description,
                price,
                is_paid: request.is_paid,
                billing_statement: None,
                bank: request.bank.or(template.default_bank),
                needs_payment: request.needs_payment,
                is_reported: None,
                comment: request.comment,
            })
            .await
    }
}
