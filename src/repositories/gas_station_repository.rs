use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::gas_station_dto::{CreateGasStationRequest, GasStationFilters, UpdateGasStationRequest};
use crate::models::gas_station::GasStation;
use crate::utils::errors::AppError;

pub struct GasStationRepository {
    pool: PgPool,
}

impl GasStationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateGasStationRequest) -> Result<GasStation, AppError> {
        let station = sqlx::query_as::<_, GasStation>(
            r#"
            INSERT INTO gas_stations (id, name, number, address, company)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(request.number.unwrap_or_default())
        .bind(request.address.unwrap_or_default())
        .bind(request.company.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        Ok(station)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GasStation>, AppError> {
        let station = sqlx::query_as::<_, GasStation>("SELECT * FROM gas_stations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(station)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM gas_stations WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn list(&self, filters: &GasStationFilters, limit: i64, offset: i64) -> Result<Vec<GasStation>, AppError> {
        let stations = sqlx::query_as::<_, GasStation>(
            r#"
            SELECT * FROM gas_stations
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
                AND ($2::text IS NULL OR company ILIKE '%' || $2 || '%')
            ORDER BY company, name, number
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.name.as_deref())
        .bind(filters.company.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(stations)
    }

    pub async fn update(&self, id: Uuid, request: UpdateGasStationRequest) -> Result<Option<GasStation>, AppError> {
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let station = sqlx::query_as::<_, GasStation>(
            r#"
            UPDATE gas_stations
            SET name = $2, number = $3, address = $4, company = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim).unwrap_or(&current.name))
        .bind(request.number.unwrap_or(current.number))
        .bind(request.address.unwrap_or(current.address))
        .bind(request.company.unwrap_or(current.company))
        .fetch_optional(&self.pool)
        .await?;

        Ok(station)
    }

    /// Los repostajes pierden la referencia y los precios de la estación se borran
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM gas_stations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
