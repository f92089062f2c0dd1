use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_dto::{page, ApiResponse};
use crate::dto::refueling_dto::{
    CreateRefuelingRequest, RefuelingFilters, RefuelingResponse, UpdateRefuelingRequest,
};
use crate::models::refueling::Refueling;
use crate::repositories::{
    gas_station_repository::GasStationRepository,
    refueling_repository::{RefuelingRecord, RefuelingRepository},
    vehicle_repository::VehicleRepository,
};
use crate::services::ledger::{self, running_odometers, LedgerEntry};
use crate::utils::errors::{field_error, not_found_error, AppError};

pub struct RefuelingController {
    repository: RefuelingRepository,
    vehicles: VehicleRepository,
    gas_stations: GasStationRepository,
}

impl RefuelingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RefuelingRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            gas_stations: GasStationRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateRefuelingRequest,
    ) -> Result<ApiResponse<RefuelingResponse>, AppError> {
        request.validate()?;

        if let Some(station_id) = request.gas_station_id {
            self.ensure_gas_station(station_id).await?;
        }

        let (month, quarter) = ledger::month_and_quarter(request.date);
        let record = RefuelingRecord {
            vehicle_id: request.vehicle_id,
            gas_station_id: request.gas_station_id,
            date: request.date,
            month: request.month.unwrap_or(month),
            quarter: request.quarter.unwrap_or(quarter),
            mileage: request.mileage,
            fuel_quantity: request.fuel_quantity,
            price_per_liter: request.price_per_liter,
            total_cost: ledger::resolve_total_cost(
                request.total_cost,
                request.fuel_quantity,
                request.price_per_liter,
            )?,
            discount: request.discount.unwrap_or_default(),
            fuel_type: request.fuel_type,
            is_full_tank: request.is_full_tank.unwrap_or(false),
            comment: request.comment.unwrap_or_default(),
        };

        let refueling = self.repository.create(record).await?;
        info!(
            "⛽ Refueling {} recorded for vehicle {} ({} km)",
            refueling.id, refueling.vehicle_id, refueling.mileage
        );

        let response = self.with_odometer(refueling).await?;
        Ok(ApiResponse::success_with_message(response, "Refueling recorded"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RefuelingResponse, AppError> {
        let refueling = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Refueling", id))?;

        self.with_odometer(refueling).await
    }

    pub async fn list(&self, filters: RefuelingFilters) -> Result<Vec<RefuelingResponse>, AppError> {
        let (limit, offset) = page(filters.limit, filters.offset);
        let refuelings = self.repository.list(&filters, limit, offset).await?;
        self.with_odometers(refuelings).await
    }

    /// Libro completo de un vehículo, del más antiguo al más reciente
    pub async fn list_for_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<RefuelingResponse>, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;

        let refuelings = self.repository.list_for_vehicle(vehicle_id).await?;
        let entries: Vec<LedgerEntry> = refuelings.iter().map(LedgerEntry::from).collect();
        let odometers = running_odometers(vehicle.initial_odometer, &entries);

        Ok(refuelings
            .into_iter()
            .map(|r| {
                let odometer = odometers.get(&r.id).copied().unwrap_or_default();
                RefuelingResponse::new(r, odometer)
            })
            .collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateRefuelingRequest,
    ) -> Result<ApiResponse<RefuelingResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Refueling", id))?;

        if let Some(vehicle_id) = request.vehicle_id {
            if !self.vehicles.exists(vehicle_id).await? {
                return Err(field_error("vehicle_id", "not_found", "Vehicle does not exist"));
            }
        }
        if let Some(station_id) = request.gas_station_id {
            self.ensure_gas_station(station_id).await?;
        }

        let record = merge_update(current, request)?;
        let refueling = self
            .repository
            .update(id, record)
            .await?
            .ok_or_else(|| not_found_error("Refueling", id))?;

        info!("✏️ Refueling {} updated", refueling.id);

        let response = self.with_odometer(refueling).await?;
        Ok(ApiResponse::success_with_message(response, "Refueling updated"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let vehicle_id = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| not_found_error("Refueling", id))?;

        info!("🗑️ Refueling {} deleted from vehicle {}", id, vehicle_id);
        Ok(())
    }

    async fn ensure_gas_station(&self, station_id: Uuid) -> Result<(), AppError> {
        if self.gas_stations.exists(station_id).await? {
            Ok(())
        } else {
            Err(field_error("gas_station_id", "not_found", "Gas station does not exist"))
        }
    }

    async fn with_odometer(&self, refueling: Refueling) -> Result<RefuelingResponse, AppError> {
        let mut responses = self.with_odometers(vec![refueling]).await?;
        responses
            .pop()
            .ok_or_else(|| AppError::Internal("Refueling lost while computing odometer".to_string()))
    }

    /// Añade el odómetro a cada repostaje recorriendo una vez el libro de
    /// cada vehículo implicado
    async fn with_odometers(&self, refuelings: Vec<Refueling>) -> Result<Vec<RefuelingResponse>, AppError> {
        let vehicle_ids: Vec<Uuid> = refuelings
            .iter()
            .map(|r| r.vehicle_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if vehicle_ids.is_empty() {
            return Ok(Vec::new());
        }

        let initial: HashMap<Uuid, i32> = self.vehicles.initial_odometers(&vehicle_ids).await?.into_iter().collect();

        let mut by_vehicle: HashMap<Uuid, Vec<LedgerEntry>> = HashMap::new();
        for entry in self.repository.ledger_entries(&vehicle_ids).await? {
            by_vehicle.entry(entry.vehicle_id).or_default().push(entry);
        }

        let mut odometers = HashMap::new();
        for (vehicle_id, entries) in &by_vehicle {
            let start = initial.get(vehicle_id).copied().unwrap_or_default();
            odometers.extend(running_odometers(start, entries));
        }

        Ok(refuelings
            .into_iter()
            .map(|r| {
                let odometer = odometers.get(&r.id).copied().unwrap_or_default();
                RefuelingResponse::new(r, odometer)
            })
            .collect())
    }
}

/// Combina el repostaje guardado con una edición parcial.
///
/// Mes y trimestre siguen a la fecha salvo que vengan en el request. El coste
/// total se re-deriva si cambian litros o precio y no se indica uno nuevo.
fn merge_update(current: Refueling, request: UpdateRefuelingRequest) -> Result<RefuelingRecord, AppError> {
    let date = request.date.unwrap_or(current.date);
    let (derived_month, derived_quarter) = ledger::month_and_quarter(date);
    let date_changed = date != current.date;

    let month = request
        .month
        .or(if date_changed { None } else { current.month })
        .unwrap_or(derived_month);
    let quarter = request
        .quarter
        .or(if date_changed { None } else { current.quarter })
        .unwrap_or(derived_quarter);

    let fuel_quantity = request.fuel_quantity.unwrap_or(current.fuel_quantity);
    let price_per_liter = request.price_per_liter.unwrap_or(current.price_per_liter);
    let inputs_changed =
        fuel_quantity != current.fuel_quantity || price_per_liter != current.price_per_liter;

    let total_cost = match request.total_cost {
        Some(total) => ledger::resolve_total_cost(Some(total), fuel_quantity, price_per_liter)?,
        None if inputs_changed => ledger::derive_total_cost(fuel_quantity, price_per_liter)?,
        None => ledger::resolve_total_cost(current.total_cost, fuel_quantity, price_per_liter)?,
    };

    Ok(RefuelingRecord {
        vehicle_id: request.vehicle_id.unwrap_or(current.vehicle_id),
        gas_station_id: request.gas_station_id.or(current.gas_station_id),
        date,
        month,
        quarter,
        mileage: request.mileage.unwrap_or(current.mileage),
        fuel_quantity,
        price_per_liter,
        total_cost,
        discount: request.discount.unwrap_or(current.discount),
        fuel_type: request.fuel_type.or(current.fuel_type),
        is_full_tank: request.is_full_tank.unwrap_or(current.is_full_tank),
        comment: request.comment.unwrap_or(current.comment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn stored() -> Refueling {
        Refueling {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            gas_station_id: None,
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            month: Some(5),
            quarter: Some(2),
            mileage: 200,
            fuel_quantity: Decimal::from(40),
            price_per_liter: Decimal::from(50),
            total_cost: Some(Decimal::from(2000)),
            discount: Decimal::from(200),
            fuel_type: None,
            is_full_tank: false,
            comment: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let current = stored();
        let record = merge_update(current.clone(), UpdateRefuelingRequest::default()).unwrap();

        assert_eq!(record.vehicle_id, current.vehicle_id);
        assert_eq!(record.month, 5);
        assert_eq!(record.quarter, 2);
        assert_eq!(record.total_cost, Decimal::from(2000));
        assert_eq!(record.discount, Decimal::from(200));
    }

    #[test]
    fn test_merge_rederives_total_cost_when_quantity_changes() {
        let request = UpdateRefuelingRequest {
            fuel_quantity: Some(Decimal::from(30)),
            ..Default::default()
        };
        let record = merge_update(stored(), request).unwrap();
        assert_eq!(record.total_cost, Decimal::from(1500));
    }

    #[test]
    fn test_merge_keeps_supplied_total_cost() {
        let request = UpdateRefuelingRequest {
            fuel_quantity: Some(Decimal::from(30)),
            total_cost: Some(Decimal::from(1400)),
            ..Default::default()
        };
        let record = merge_update(stored(), request).unwrap();
        assert_eq!(record.total_cost, Decimal::from(1400));
    }

    #[test]
    fn test_merge_date_change_moves_month_and_quarter() {
        let request = UpdateRefuelingRequest {
            date: NaiveDate::from_ymd_opt(2024, 11, 2),
            ..Default::default()
        };
        let record = merge_update(stored(), request).unwrap();
        assert_eq!(record.month, 11);
        assert_eq!(record.quarter, 4);
    }

    #[test]
    fn test_merge_rejects_total_cost_overflow() {
        let request = UpdateRefuelingRequest {
            fuel_quantity: Some(Decimal::new(999_999, 2)),
            price_per_liter: Some(Decimal::new(999_999, 2)),
            ..Default::default()
        };
        assert!(matches!(
            merge_update(stored(), request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_merge_allows_zero_mileage() {
        let request = UpdateRefuelingRequest {
            mileage: Some(0),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert_eq!(merge_update(stored(), request).unwrap().mileage, 0);
    }
}
