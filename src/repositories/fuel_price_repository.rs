use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::fuel_price_dto::FuelPriceFilters;
use crate::models::{fuel_price::FuelPrice, FuelType};
use crate::utils::errors::AppError;

pub struct FuelPriceRepository {
    pool: PgPool,
}

impl FuelPriceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        date: NaiveDate,
        fuel_type: FuelType,
        price: Decimal,
        gas_station_id: Option<Uuid>,
    ) -> Result<FuelPrice, AppError> {
        let fuel_price = sqlx::query_as::<_, FuelPrice>(
            r#"
            INSERT INTO fuel_prices (id, date, fuel_type, price, gas_station_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(date)
        .bind(fuel_type)
        .bind(price)
        .bind(gas_station_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(fuel_price)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FuelPrice>, AppError> {
        let fuel_price = sqlx::query_as::<_, FuelPrice>("SELECT * FROM fuel_prices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(fuel_price)
    }

    /// ¿Existe ya un precio para `(date, fuel_type, gas_station_id)`?
    /// Una estación NULL coincide con otra NULL.
    pub async fn exists_for_point(
        &self,
        date: NaiveDate,
        fuel_type: FuelType,
        gas_station_id: Option<Uuid>,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM fuel_prices
                WHERE date = $1
                    AND fuel_type = $2
                    AND gas_station_id IS NOT DISTINCT FROM $3
                    AND ($4::uuid IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(date)
        .bind(fuel_type)
        .bind(gas_station_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn list(&self, filters: &FuelPriceFilters, limit: i64, offset: i64) -> Result<Vec<FuelPrice>, AppError> {
        let prices = sqlx::query_as::<_, FuelPrice>(
            r#"
            SELECT * FROM fuel_prices
            WHERE ($1::fuel_type IS NULL OR fuel_type = $1)
                AND ($2::uuid IS NULL OR gas_station_id = $2)
                AND ($3::date IS NULL OR date >= $3)
                AND ($4::date IS NULL OR date <= $4)
            ORDER BY date DESC, fuel_type
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filters.fuel_type)
        .bind(filters.gas_station_id)
        .bind(filters.date_from)
        .bind(filters.date_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(prices)
    }

    pub async fn update(
        &self,
        id: Uuid,
        date: NaiveDate,
        fuel_type: FuelType,
        price: Decimal,
        gas_station_id: Option<Uuid>,
    ) -> Result<Option<FuelPrice>, AppError> {
        let fuel_price = sqlx::query_as::<_, FuelPrice>(
            r#"
            UPDATE fuel_prices
            SET date = $2, fuel_type = $3, price = $4, gas_station_id = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(date)
        .bind(fuel_type)
        .bind(price)
        .bind(gas_station_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(fuel_price)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM fuel_prices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
