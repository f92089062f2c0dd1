use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{field_error, AppError};

/// Recalcula la caché `current_odometer` como inicial + Σ kilometraje.
/// Se ejecuta dentro de la transacción de la escritura que la invalida y
/// bloquea la fila del vehículo hasta el commit.
pub async fn recompute_current_odometer(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
) -> Result<Option<i32>, AppError> {
    let initial: Option<(i32,)> = sqlx::query_as("SELECT initial_odometer FROM vehicles WHERE id = $1 FOR UPDATE")
        .bind(vehicle_id)
        .fetch_optional(&mut *conn)
        .await?;

    let Some((initial_odometer,)) = initial else {
        return Ok(None);
    };

    // Suma leída después de tomar el bloqueo del vehículo
    let (mileage,): (i64,) =
        sqlx::query_as("SELECT COALESCE(SUM(mileage), 0)::bigint FROM refuelings WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(&mut *conn)
            .await?;

    let odometer = i32::try_from(i64::from(initial_odometer) + mileage)
        .map_err(|_| field_error("mileage", "range", "Odometer would exceed the supported maximum"))?;

    sqlx::query("UPDATE vehicles SET current_odometer = $2 WHERE id = $1")
        .bind(vehicle_id)
        .bind(odometer)
        .execute(&mut *conn)
        .await?;

    Ok(Some(odometer))
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let initial_odometer = request.initial_odometer.unwrap_or(0);

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, name, brand, model, year, license_plate, initial_odometer, current_odometer, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(request.brand)
        .bind(request.model)
        .bind(request.year)
        .bind(request.license_plate.unwrap_or_default())
        .bind(initial_odometer)
        .bind(request.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn list(&self, filters: &VehicleFilters, limit: i64, offset: i64) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
                AND ($2::text IS NULL OR brand ILIKE '%' || $2 || '%')
                AND ($3::text IS NULL OR model ILIKE '%' || $3 || '%')
                AND ($4::int IS NULL OR year = $4)
                AND ($5::boolean IS NULL OR is_active = $5)
            ORDER BY name, created_at
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(filters.name.as_deref())
        .bind(filters.brand.as_deref())
        .bind(filters.model.as_deref())
        .bind(filters.year)
        .bind(filters.is_active)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// `initial_odometer` de varios vehículos a la vez
    pub async fn initial_odometers(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, i32)>, AppError> {
        let rows: Vec<(Uuid, i32)> =
            sqlx::query_as("SELECT id, initial_odometer FROM vehicles WHERE id = ANY($1)")
                .bind(ids.to_vec())
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }

    /// Actualización parcial. Si cambia el odómetro inicial se recalcula
    /// `current_odometer` en la misma transacción.
    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<Option<Vehicle>, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        let initial_changed = request
            .initial_odometer
            .map_or(false, |value| value != current.initial_odometer);

        let mut vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, brand = $3, model = $4, year = $5, license_plate = $6,
                initial_odometer = $7, is_active = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim).unwrap_or(&current.name))
        .bind(request.brand.or(current.brand))
        .bind(request.model.or(current.model))
        .bind(request.year.or(current.year))
        .bind(request.license_plate.unwrap_or(current.license_plate))
        .bind(request.initial_odometer.unwrap_or(current.initial_odometer))
        .bind(request.is_active.unwrap_or(current.is_active))
        .fetch_one(&mut *tx)
        .await?;

        if initial_changed {
            if let Some(odometer) = recompute_current_odometer(&mut tx, id).await? {
                vehicle.current_odometer = odometer;
            }
        }

        tx.commit().await?;

        Ok(Some(vehicle))
    }

    /// Borra el vehículo; sus repostajes y estadísticas caen en cascada
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
