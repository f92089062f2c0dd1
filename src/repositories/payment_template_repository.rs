use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::utility_dto::{CreateTemplateRequest, UpdateTemplateRequest};
use crate::models::utility::PaymentTemplate;
use crate::utils::errors::AppError;

pub struct PaymentTemplateRepository {
    pool: PgPool,
}

impl PaymentTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateTemplateRequest) -> Result<PaymentTemplate, AppError> {
        let template = sqlx::query_as::<_, PaymentTemplate>(
            r#"
            INSERT INTO payment_templates (id, name, company_name, description, default_amount, default_bank)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(request.company_name.trim())
        .bind(request.description.trim())
        .bind(request.default_amount)
        .bind(request.default_bank)
        .fetch_one(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentTemplate>, AppError> {
        let template = sqlx::query_as::<_, PaymentTemplate>("SELECT * FROM payment_templates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(template)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PaymentTemplate>, AppError> {
        let templates = sqlx::query_as::<_, PaymentTemplate>(
            "SELECT * FROM payment_templates ORDER BY name, id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    pub async fn update(&self, id: Uuid, request: UpdateTemplateRequest) -> Result<Option<PaymentTemplate>, AppError> {
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let template = sqlx::query_as::<_, PaymentTemplate>(
            r#"
            UPDATE payment_templates
            SET name = $2, company_name = $3, description = $4, default_amount = $5, default_bank = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim).unwrap_or(&current.name))
        .bind(request.company_name.as_deref().map(str::trim).unwrap_or(&current.company_name))
        .bind(request.description.as_deref().map(str::trim).unwrap_or(&current.description))
        .bind(request.default_amount.or(current.default_amount))
        .bind(request.default_bank.or(current.default_bank))
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM payment_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
