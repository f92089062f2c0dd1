use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::utility_controller::month_range;
use crate::dto::api_dto::{page, ApiResponse};
use crate::dto::utility_dto::{
    CreateRecurringPaymentRequest, PaymentResponse, RecurringPaymentFilters, RecurringPaymentResponse,
    SummaryQuery, UpdateRecurringPaymentRequest,
};
use crate::repositories::{
    recurring_payment_repository::RecurringPaymentRepository,
    utility_repository::{PaymentRecord, UtilityRepository},
};
use crate::services::ledger::month_and_quarter;
use crate::utils::errors::{field_error, not_found_error, AppError};

pub struct RecurringPaymentController {
    repository: RecurringPaymentRepository,
    utilities: UtilityRepository,
}

impl RecurringPaymentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RecurringPaymentRepository::new(pool.clone()),
            utilities: UtilityRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateRecurringPaymentRequest,
    ) -> Result<ApiResponse<RecurringPaymentResponse>, AppError> {
        request.validate()?;
        self.ensure_company(request.company_id).await?;

        let recurring = self.repository.create(request).await?;
        info!(
            "🔁 Recurring payment {} created (day {}, {})",
            recurring.id, recurring.due_day, recurring.amount
        );

        Ok(ApiResponse::success_with_message(
            recurring.into(),
            "Recurring payment created",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RecurringPaymentResponse, AppError> {
        let recurring = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Recurring payment", id))?;

        Ok(recurring.into())
    }

    pub async fn list(&self, filters: RecurringPaymentFilters) -> Result<Vec<RecurringPaymentResponse>, AppError> {
        let (limit, offset) = page(filters.limit, filters.offset);
        let recurring = self.repository.list(&filters, limit, offset).await?;
        Ok(recurring.into_iter().map(RecurringPaymentResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateRecurringPaymentRequest,
    ) -> Result<ApiResponse<RecurringPaymentResponse>, AppError> {
        request.validate()?;
        if let Some(company_id) = request.company_id {
            self.ensure_company(company_id).await?;
        }

        let recurring = self
            .repository
            .update(id, request)
            .await?
            .ok_or_else(|| not_found_error("Recurring payment", id))?;

        Ok(ApiResponse::success_with_message(
            recurring.into(),
            "Recurring payment updated",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Recurring payment", id));
        }
        Ok(())
    }

    /// Crea los pagos del mes para los regulares activos con `auto_create`.
    /// Los que ya tienen pago ese mes se saltan, así que repetir es inocuo.
    pub async fn generate(&self, query: SummaryQuery) -> Result<ApiResponse<Vec<PaymentResponse>>, AppError> {
        let (year, month, start, end) = month_range(&query)?;
        let mut created = Vec::new();

        for recurring in self.repository.list_auto_create().await? {
            let Some(company) = self.utilities.find_company(recurring.company_id).await? else {
                continue;
            };
            let date = recurring
                .due_date(year, month)
                .ok_or_else(|| field_error("month", "range", "Month must be between 1 and 12"))?;
            let (payment_month, payment_quarter) = month_and_quarter(date);

            let record = PaymentRecord {
                date,
                month: payment_month,
                quarter: payment_quarter,
                company_id: Some(company.id),
                company_name: company.name,
                description: recurring.description,
                price: recurring.amount,
                is_paid: false,
                billing_statement: String::new(),
                bank: recurring.bank,
                needs_payment: true,
                is_reported: false,
                comment: None,
            };

            if let Some(payment) = self.utilities.create_payment_if_absent(record, start, end).await? {
                created.push(PaymentResponse::from(payment));
            }
        }

        info!("🔁 {} payments generated for {}-{:02}", created.len(), year, month);

        let message = format!("{} payments generated", created.len());
        Ok(ApiResponse::success_with_message(created, message))
    }

    async fn ensure_company(&self, company_id: Uuid) -> Result<(), AppError> {
        match self.utilities.find_company(company_id).await? {
            Some(_) => Ok(()),
            None => Err(field_error("company_id", "not_found", "Company does not exist")),
        }
    }
}
