use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::utility_dto::{CreateCompanyRequest, PaymentFilters, UpdateCompanyRequest};
use crate::models::{
    utility::{UtilityCompany, UtilityPayment},
    Bank,
};
use crate::utils::errors::AppError;

/// Valores ya resueltos de un pago
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub date: NaiveDate,
    pub month: i32,
    pub quarter: i32,
    pub company_id: Option<Uuid>,
    pub company_name: String,
    pub description: String,
    pub price: Decimal,
    pub is_paid: bool,
    pub billing_statement: String,
    pub bank: Option<Bank>,
    pub needs_payment: bool,
    pub is_reported: bool,
    pub comment: Option<String>,
}

pub struct UtilityRepository {
    pool: PgPool,
}

impl UtilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Compañías

    pub async fn create_company(&self, request: CreateCompanyRequest) -> Result<UtilityCompany, AppError> {
        let company = sqlx::query_as::<_, UtilityCompany>(
            r#"
            INSERT INTO utility_companies (id, name, category_name, account_number)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(request.category_name)
        .bind(request.account_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(company)
    }

    pub async fn find_company(&self, id: Uuid) -> Result<Option<UtilityCompany>, AppError> {
        let company = sqlx::query_as::<_, UtilityCompany>("SELECT * FROM utility_companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    pub async fn list_companies(&self, limit: i64, offset: i64) -> Result<Vec<UtilityCompany>, AppError> {
        let companies = sqlx::query_as::<_, UtilityCompany>(
            "SELECT * FROM utility_companies ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    pub async fn update_company(
        &self,
        id: Uuid,
        request: UpdateCompanyRequest,
    ) -> Result<Option<UtilityCompany>, AppError> {
        let Some(current) = self.find_company(id).await? else {
            return Ok(None);
        };

        let company = sqlx::query_as::<_, UtilityCompany>(
            r#"
            UPDATE utility_companies
            SET name = $2, category_name = $3, account_number = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim).unwrap_or(&current.name))
        .bind(request.category_name.or(current.category_name))
        .bind(request.account_number.or(current.account_number))
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    /// Los pagos de la compañía conservan `company_name` y pierden la referencia
    pub async fn delete_company(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM utility_companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Pagos

    pub async fn create_payment(&self, record: PaymentRecord) -> Result<UtilityPayment, AppError> {
        let payment = sqlx::query_as::<_, UtilityPayment>(
            r#"
            INSERT INTO utility_payments (
                id, date, month, quarter, company_id, company_name, description, price,
                is_paid, billing_statement, bank, needs_payment, is_reported, comment
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.date)
        .bind(record.month)
        .bind(record.quarter)
        .bind(record.company_id)
        .bind(record.company_name)
        .bind(record.description)
        .bind(record.price)
        .bind(record.is_paid)
        .bind(record.billing_statement)
        .bind(record.bank)
        .bind(record.needs_payment)
        .bind(record.is_reported)
        .bind(record.comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Inserta el pago salvo que ya exista uno de la misma compañía y
    /// descripción con fecha en `[start, end)`
    pub async fn create_payment_if_absent(
        &self,
        record: PaymentRecord,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<UtilityPayment>, AppError> {
        let payment = sqlx::query_as::<_, UtilityPayment>(
            r#"
            INSERT INTO utility_payments (
                id, date, month, quarter, company_id, company_name, description, price,
                is_paid, billing_statement, bank, needs_payment, is_reported, comment
            )
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14
            WHERE NOT EXISTS (
                SELECT 1 FROM utility_payments
                WHERE company_id IS NOT DISTINCT FROM $5
                    AND description = $7
                    AND date >= $15 AND date < $16
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.date)
        .bind(record.month)
        .bind(record.quarter)
        .bind(record.company_id)
        .bind(record.company_name)
        .bind(record.description)
        .bind(record.price)
        .bind(record.is_paid)
        .bind(record.billing_statement)
        .bind(record.bank)
        .bind(record.needs_payment)
        .bind(record.is_reported)
        .bind(record.comment)
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn find_payment(&self, id: Uuid) -> Result<Option<UtilityPayment>, AppError> {
        let payment = sqlx::query_as::<_, UtilityPayment>("SELECT * FROM utility_payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    pub async fn list_payments(
        &self,
        filters: &PaymentFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UtilityPayment>, AppError> {
        let payments = sqlx::query_as::<_, UtilityPayment>(
            r#"
            SELECT * FROM utility_payments
            WHERE ($1::int IS NULL OR EXTRACT(YEAR FROM date)::int = $1)
                AND ($2::int IS NULL OR month = $2)
                AND ($3::int IS NULL OR quarter = $3)
                AND ($4::boolean IS NULL OR is_paid = $4)
                AND ($5::boolean IS NULL OR needs_payment = $5)
                AND ($6::bank IS NULL OR bank = $6)
                AND ($7::text IS NULL OR company_name ILIKE '%' || $7 || '%')
            ORDER BY date DESC, company_name
            LIMIT $8 OFFSET $9
            "#,
        )
        .bind(filters.year)
        .bind(filters.month)
        .bind(filters.quarter)
        .bind(filters.is_paid)
        .bind(filters.needs_payment)
        .bind(filters.bank)
        .bind(filters.company_name.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Pagos con fecha en `[start, end)`
    pub async fn payments_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<UtilityPayment>, AppError> {
        let payments = sqlx::query_as::<_, UtilityPayment>(
            "SELECT * FROM utility_payments WHERE date >= $1 AND date < $2 ORDER BY date, company_name",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn update_payment(&self, id: Uuid, record: PaymentRecord) -> Result<Option<UtilityPayment>, AppError> {
        let payment = sqlx::query_as::<_, UtilityPayment>(
            r#"
            UPDATE utility_payments
            SET date = $2, month = $3, quarter = $4, company_id = $5, company_name = $6,
                description = $7, price = $8, is_paid = $9, billing_statement = $10,
                bank = $11, needs_payment = $12, is_reported = $13, comment = $14,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(record.date)
        .bind(record.month)
        .bind(record.quarter)
        .bind(record.company_id)
        .bind(record.company_name)
        .bind(record.description)
        .bind(record.price)
        .bind(record.is_paid)
        .bind(record.billing_statement)
        .bind(record.bank)
        .bind(record.needs_payment)
        .bind(record.is_reported)
        .bind(record.comment)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn delete_payment(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM utility_payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
