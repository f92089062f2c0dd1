use chrono::{Datelike, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_dto::{page, ApiResponse};
use crate::dto::utility_dto::{
    CompanyResponse, CreateCompanyRequest, CreatePaymentRequest, PaymentFilters, PaymentResponse,
    SummaryQuery, UpdateCompanyRequest, UpdatePaymentRequest,
};
use crate::models::{utility::MonthlySummary, PeriodType};
use crate::repositories::utility_repository::{PaymentRecord, UtilityRepository};
use crate::services::ledger::month_and_quarter;
use crate::utils::errors::{field_error, not_found_error, AppError};

pub struct UtilityController {
    repository: UtilityRepository,
}

impl UtilityController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UtilityRepository::new(pool),
        }
    }

    // Compañías

    pub async fn create_company(
        &self,
        request: CreateCompanyRequest,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        request.validate()?;
        let company = self.repository.create_company(request).await?;
        Ok(ApiResponse::success_with_message(company.into(), "Company created"))
    }

    pub async fn get_company(&self, id: Uuid) -> Result<CompanyResponse, AppError> {
        let company = self
            .repository
            .find_company(id)
            .await?
            .ok_or_else(|| not_found_error("Company", id))?;

        Ok(company.into())
    }

    pub async fn list_companies(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<CompanyResponse>, AppError> {
        let (limit, offset) = page(limit, offset);
        let companies = self.repository.list_companies(limit, offset).await?;
        Ok(companies.into_iter().map(CompanyResponse::from).collect())
    }

    pub async fn update_company(
        &self,
        id: Uuid,
        request: UpdateCompanyRequest,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        request.validate()?;

        let company = self
            .repository
            .update_company(id, request)
            .await?
            .ok_or_else(|| not_found_error("Company", id))?;

        Ok(ApiResponse::success_with_message(company.into(), "Company updated"))
    }

    pub async fn delete_company(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete_company(id).await? {
            return Err(not_found_error("Company", id));
        }
        Ok(())
    }

    // Pagos

    pub async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, AppError> {
        request.validate()?;

        let company_name = self
            .resolve_company_name(request.company_id, request.company_name)
            .await?;
        let (month, quarter) = month_and_quarter(request.date);

        let record = PaymentRecord {
            date: request.date,
            month: request.month.unwrap_or(month),
            quarter: request.quarter.unwrap_or(quarter),
            company_id: request.company_id,
            company_name,
            description: request.description,
            price: request.price,
            is_paid: request.is_paid.unwrap_or(false),
            billing_statement: request.billing_statement.unwrap_or_default(),
            bank: request.bank,
            needs_payment: request.needs_payment.unwrap_or(false),
            is_reported: request.is_reported.unwrap_or(false),
            comment: request.comment,
        };

        let payment = self.repository.create_payment(record).await?;
        info!("💡 Payment {} recorded: {} {}", payment.id, payment.company_name, payment.price);

        Ok(ApiResponse::success_with_message(payment.into(), "Payment created"))
    }

    pub async fn get_payment(&self, id: Uuid) -> Result<PaymentResponse, AppError> {
        let payment = self
            .repository
            .find_payment(id)
            .await?
            .ok_or_else(|| not_found_error("Payment", id))?;

        Ok(payment.into())
    }

    pub async fn list_payments(&self, filters: PaymentFilters) -> Result<Vec<PaymentResponse>, AppError> {
        let (limit, offset) = page(filters.limit, filters.offset);
        let payments = self.repository.list_payments(&filters, limit, offset).await?;
        Ok(payments.into_iter().map(PaymentResponse::from).collect())
    }

    pub async fn update_payment(
        &self,
        id: Uuid,
        request: UpdatePaymentRequest,
    ) -> Result<ApiResponse<PaymentResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_payment(id)
            .await?
            .ok_or_else(|| not_found_error("Payment", id))?;

        let company_id = request.company_id.or(current.company_id);
        let company_name = match (request.company_id, request.company_name) {
            (None, None) => current.company_name,
            (_, name) => self.resolve_company_name(company_id, name).await?,
        };

        let date = request.date.unwrap_or(current.date);
        let (month, quarter) = if date != current.date {
            month_and_quarter(date)
        } else {
            (current.month, current.quarter)
        };

        let record = PaymentRecord {
            date,
            month: request.month.unwrap_or(month),
            quarter: request.quarter.unwrap_or(quarter),
            company_id,
            company_name,
            description: request.description.unwrap_or(current.description),
            price: request.price.unwrap_or(current.price),
            is_paid: request.is_paid.unwrap_or(current.is_paid),
            billing_statement: request.billing_statement.unwrap_or(current.billing_statement),
            bank: request.bank.or(current.bank),
            needs_payment: request.needs_payment.unwrap_or(current.needs_payment),
            is_reported: request.is_reported.unwrap_or(current.is_reported),
            comment: request.comment.or(current.comment),
        };

        let payment = self
            .repository
            .update_payment(id, record)
            .await?
            .ok_or_else(|| not_found_error("Payment", id))?;

        Ok(ApiResponse::success_with_message(payment.into(), "Payment updated"))
    }

    pub async fn delete_payment(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete_payment(id).await? {
            return Err(not_found_error("Payment", id));
        }
        Ok(())
    }

    /// Resumen de un mes, calculado sobre los pagos con fecha en ese mes
    pub async fn monthly_summary(&self, query: SummaryQuery) -> Result<MonthlySummary, AppError> {
        let (year, month, start, end) = month_range(&query)?;
        let payments = self.repository.payments_between(start, end).await?;
        Ok(MonthlySummary::from_payments(year, month as i32, &payments))
    }

    /// Nombre de la compañía del pago: el indicado, o el de la compañía
    /// referenciada si no se indica ninguno
    async fn resolve_company_name(
        &self,
        company_id: Option<Uuid>,
        company_name: Option<String>,
    ) -> Result<String, AppError> {
        let supplied = company_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let company = match company_id {
            Some(id) => Some(
                self.repository
                    .find_company(id)
                    .await?
                    .ok_or_else(|| field_error("company_id", "not_found", "Company does not exist"))?,
            ),
            None => None,
        };

        match (supplied, company) {
            (Some(name), _) => Ok(name),
            (None, Some(company)) => Ok(company.name),
            (None, None) => Err(field_error(
                "company_name",
                "required",
                "Either company_name or company_id is required",
            )),
        }
    }
}

/// Año, mes y rango `[inicio, fin)` del mes pedido (el actual por defecto)
pub(crate) fn month_range(query: &SummaryQuery) -> Result<(i32, u32, NaiveDate, NaiveDate), AppError> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| field_error("month", "range", "Month must be between 1 and 12"))?;
    let (start, end) = PeriodType::Month
        .bounds(first_day)
        .ok_or_else(|| AppError::BadRequest(format!("Date out of range: {}", first_day)))?;

    Ok((year, month, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_range() {
        let query = SummaryQuery {
            year: Some(2024),
            month: Some(12),
        };
        let (year, month, start, end) = month_range(&query).unwrap();
        assert_eq!((year, month), (2024, 12));
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_month_range_rejects_invalid_month() {
        let query = SummaryQuery {
            year: Some(2024),
            month: Some(13),
        };
        assert!(matches!(month_range(&query), Err(AppError::Validation(_))));
    }
}
