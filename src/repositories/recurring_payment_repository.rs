use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::utility_dto::{
    CreateRecurringPaymentRequest, RecurringPaymentFilters, UpdateRecurringPaymentRequest,
};
use crate::models::utility::RecurringPayment;
use crate::utils::errors::AppError;

pub struct RecurringPaymentRepository {
    pool: PgPool,
}

impl RecurringPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateRecurringPaymentRequest) -> Result<RecurringPayment, AppError> {
        let recurring = sqlx::query_as::<_, RecurringPayment>(
            r#"
            INSERT INTO recurring_payments (id, company_id, description, amount, due_day, bank, is_active, auto_create)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.company_id)
        .bind(request.description.trim())
        .bind(request.amount)
        .bind(request.due_day)
        .bind(request.bank)
        .bind(request.is_active.unwrap_or(true))
        .bind(request.auto_create.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(recurring)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RecurringPayment>, AppError> {
        let recurring = sqlx::query_as::<_, RecurringPayment>("SELECT * FROM recurring_payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(recurring)
    }

    /// Ordenados por día de vencimiento y compañía
    pub async fn list(
        &self,
        filters: &RecurringPaymentFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecurringPayment>, AppError> {
        let recurring = sqlx::query_as::<_, RecurringPayment>(
            r#"
            SELECT r.* FROM recurring_payments r
            JOIN utility_companies c ON c.id = r.company_id
            WHERE ($1::uuid IS NULL OR r.company_id = $1)
                AND ($2::boolean IS NULL OR r.is_active = $2)
            ORDER BY r.due_day, c.name, r.id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.company_id)
        .bind(filters.is_active)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(recurring)
    }

    /// Activos con generación automática, en el orden de vencimiento
    pub async fn list_auto_create(&self) -> Result<Vec<RecurringPayment>, AppError> {
        let recurring = sqlx::query_as::<_, RecurringPayment>(
            r#"
            SELECT * FROM recurring_payments
            WHERE is_active AND auto_create
            ORDER BY due_day, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(recurring)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateRecurringPaymentRequest,
    ) -> Result<Option<RecurringPayment>, AppError> {
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let recurring = sqlx::query_as::<_, RecurringPayment>(
            r#"
            UPDATE recurring_payments
            SET company_id = $2, description = $3, amount = $4, due_day = $5, bank = $6,
                is_active = $7, auto_create = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.company_id.unwrap_or(current.company_id))
        .bind(request.description.as_deref().map(str::trim).unwrap_or(&current.description))
        .bind(request.amount.unwrap_or(current.amount))
        .bind(request.due_day.unwrap_or(current.due_day))
        .bind(request.bank.or(current.bank))
        .bind(request.is_active.unwrap_or(current.is_active))
        .bind(request.auto_create.unwrap_or(current.auto_create))
        .fetch_optional(&self.pool)
        .await?;

        Ok(recurring)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recurring_payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
