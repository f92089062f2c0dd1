use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::refueling_dto::RefuelingFilters;
use crate::models::{refueling::Refueling, FuelType};
use crate::repositories::vehicle_repository::recompute_current_odometer;
use crate::services::ledger::{self, LedgerEntry};
use crate::utils::errors::{field_error, AppError};

/// Valores ya resueltos de un repostaje, listos para escribir
#[derive(Debug, Clone)]
pub struct RefuelingRecord {
    pub vehicle_id: Uuid,
    pub gas_station_id: Option<Uuid>,
    pub date: NaiveDate,
    pub month: i32,
    pub quarter: i32,
    pub mileage: i32,
    pub fuel_quantity: Decimal,
    pub price_per_liter: Decimal,
    pub total_cost: Decimal,
    pub discount: Decimal,
    pub fuel_type: Option<FuelType>,
    pub is_full_tank: bool,
    pub comment: String,
}

pub struct RefuelingRepository {
    pool: PgPool,
}

impl RefuelingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta un repostaje al final del libro del vehículo.
    ///
    /// Bloquea la fila del vehículo, comprueba que no haya repostajes con
    /// fecha posterior, inserta y recalcula `current_odometer` en una única
    /// transacción.
    pub async fn create(&self, record: RefuelingRecord) -> Result<Refueling, AppError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(record.vehicle_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            return Err(field_error("vehicle_id", "not_found", "Vehicle does not exist"));
        }

        let latest = latest_date(&mut tx, record.vehicle_id).await?;
        ledger::ensure_chronological(latest, record.date)?;

        let refueling = sqlx::query_as::<_, Refueling>(
            r#"
            INSERT INTO refuelings (
                id, vehicle_id, gas_station_id, date, month, quarter, mileage,
                fuel_quantity, price_per_liter, total_cost, discount, fuel_type,
                is_full_tank, comment
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.vehicle_id)
        .bind(record.gas_station_id)
        .bind(record.date)
        .bind(record.month)
        .bind(record.quarter)
        .bind(record.mileage)
        .bind(record.fuel_quantity)
        .bind(record.price_per_liter)
        .bind(record.total_cost)
        .bind(record.discount)
        .bind(record.fuel_type)
        .bind(record.is_full_tank)
        .bind(record.comment)
        .fetch_one(&mut *tx)
        .await?;

        recompute_current_odometer(&mut tx, refueling.vehicle_id).await?;
        tx.commit().await?;

        Ok(refueling)
    }

    /// Reescribe un repostaje. No comprueba el orden: editar es la vía para
    /// corregir el histórico.
    pub async fn update(&self, id: Uuid, record: RefuelingRecord) -> Result<Option<Refueling>, AppError> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<(Uuid,)> = sqlx::query_as("SELECT vehicle_id FROM refuelings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some((previous_vehicle_id,)) = previous else {
            return Ok(None);
        };

        let refueling = sqlx::query_as::<_, Refueling>(
            r#"
            UPDATE refuelings
            SET vehicle_id = $2, gas_station_id = $3, date = $4, month = $5, quarter = $6,
                mileage = $7, fuel_quantity = $8, price_per_liter = $9, total_cost = $10,
                discount = $11, fuel_type = $12, is_full_tank = $13, comment = $14,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(record.vehicle_id)
        .bind(record.gas_station_id)
        .bind(record.date)
        .bind(record.month)
        .bind(record.quarter)
        .bind(record.mileage)
        .bind(record.fuel_quantity)
        .bind(record.price_per_liter)
        .bind(record.total_cost)
        .bind(record.discount)
        .bind(record.fuel_type)
        .bind(record.is_full_tank)
        .bind(record.comment)
        .fetch_one(&mut *tx)
        .await?;

        for vehicle_id in vehicles_to_recompute(previous_vehicle_id, refueling.vehicle_id) {
            recompute_current_odometer(&mut tx, vehicle_id).await?;
        }

        tx.commit().await?;

        Ok(Some(refueling))
    }

    /// Borra un repostaje y devuelve el vehículo al que pertenecía
    pub async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<(Uuid,)> = sqlx::query_as("DELETE FROM refuelings WHERE id = $1 RETURNING vehicle_id")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some((vehicle_id,)) = deleted else {
            return Ok(None);
        };

        recompute_current_odometer(&mut tx, vehicle_id).await?;
        tx.commit().await?;

        Ok(Some(vehicle_id))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Refueling>, AppError> {
        let refueling = sqlx::query_as::<_, Refueling>("SELECT * FROM refuelings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(refueling)
    }

    pub async fn list(&self, filters: &RefuelingFilters, limit: i64, offset: i64) -> Result<Vec<Refueling>, AppError> {
        let refuelings = sqlx::query_as::<_, Refueling>(
            r#"
            SELECT * FROM refuelings
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
                AND ($2::uuid IS NULL OR gas_station_id = $2)
                AND ($3::fuel_type IS NULL OR fuel_type = $3)
                AND ($4::int IS NULL OR month = $4)
                AND ($5::int IS NULL OR quarter = $5)
                AND ($6::boolean IS NULL OR is_full_tank = $6)
                AND ($7::int IS NULL OR mileage = $7)
                AND ($8::date IS NULL OR date >= $8)
                AND ($9::date IS NULL OR date <= $9)
            ORDER BY date DESC, created_at DESC, id DESC
            LIMIT $10 OFFSET $11
            "#,
        )
        .bind(filters.vehicle_id)
        .bind(filters.gas_station_id)
        .bind(filters.fuel_type)
        .bind(filters.month)
        .bind(filters.quarter)
        .bind(filters.is_full_tank)
        .bind(filters.mileage)
        .bind(filters.date_from)
        .bind(filters.date_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(refuelings)
    }

    /// Libro completo de un vehículo en orden cronológico
    pub async fn list_for_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Refueling>, AppError> {
        let refuelings = sqlx::query_as::<_, Refueling>(
            "SELECT * FROM refuelings WHERE vehicle_id = $1 ORDER BY date, created_at, id",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(refuelings)
    }

    /// Repostajes de un vehículo en `[start, end)`
    pub async fn list_in_period(
        &self,
        vehicle_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Refueling>, AppError> {
        let refuelings = sqlx::query_as::<_, Refueling>(
            r#"
            SELECT * FROM refuelings
            WHERE vehicle_id = $1 AND date >= $2 AND date < $3
            ORDER BY date, created_at, id
            "#,
        )
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(refuelings)
    }

    /// Entradas mínimas del libro de varios vehículos, para calcular odómetros
    pub async fn ledger_entries(&self, vehicle_ids: &[Uuid]) -> Result<Vec<LedgerEntry>, AppError> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, vehicle_id, date, created_at, mileage
            FROM refuelings
            WHERE vehicle_id = ANY($1)
            ORDER BY vehicle_id, date, created_at, id
            "#,
        )
        .bind(vehicle_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

async fn latest_date(conn: &mut PgConnection, vehicle_id: Uuid) -> Result<Option<NaiveDate>, AppError> {
    let latest: (Option<NaiveDate>,) = sqlx::query_as("SELECT MAX(date) FROM refuelings WHERE vehicle_id = $1")
        .bind(vehicle_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(latest.0)
}

/// Vehículos afectados por mover un repostaje, en orden de id para que dos
/// traslados cruzados bloqueen las filas en el mismo orden
fn vehicles_to_recompute(previous: Uuid, current: Uuid) -> Vec<Uuid> {
    let mut ids = vec![previous, current];
    ids.sort();
    ids.dedup();
    ids
}
