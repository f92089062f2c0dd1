//! Libro de repostajes
//!
//! Derivaciones puras sobre los repostajes de un vehículo: odómetro en cada
//! repostaje, coste total y efectivo, consumo y agregados por periodo.
//!
//! El orden cronológico del libro es `(date, created_at, id)`. El odómetro
//! se recalcula en una sola pasada sobre la secuencia ordenada en lugar de
//! buscar el repostaje anterior fila por fila.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::refueling::Refueling;
use crate::utils::errors::{field_error, AppError};
use crate::utils::validation::MAX_COST;

const HUNDRED_KM: i64 = 100;

/// Entrada mínima del libro necesaria para calcular odómetros
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub mileage: i32,
}

impl From<&Refueling> for LedgerEntry {
    fn from(r: &Refueling) -> Self {
        Self {
            id: r.id,
            vehicle_id: r.vehicle_id,
            date: r.date,
            created_at: r.created_at,
            mileage: r.mileage,
        }
    }
}

fn chronological(a: &LedgerEntry, b: &LedgerEntry) -> Ordering {
    a.date
        .cmp(&b.date)
        .then(a.created_at.cmp(&b.created_at))
        .then(a.id.cmp(&b.id))
}

/// Odómetro de cada repostaje de un mismo vehículo: el del anterior más el
/// propio kilometraje, o `initial_odometer + mileage` para el primero.
pub fn running_odometers(initial_odometer: i32, entries: &[LedgerEntry]) -> HashMap<Uuid, i64> {
    let mut ordered: Vec<&LedgerEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| chronological(a, b));

    let mut odometer = i64::from(initial_odometer);
    ordered
        .into_iter()
        .map(|entry| {
            odometer += i64::from(entry.mileage);
            (entry.id, odometer)
        })
        .collect()
}

/// Odómetro actual del vehículo: inicial más la suma de todos los kilometrajes
pub fn current_odometer(initial_odometer: i32, mileages: impl IntoIterator<Item = i32>) -> i64 {
    i64::from(initial_odometer) + mileages.into_iter().map(i64::from).sum::<i64>()
}

/// `fuel_quantity × price_per_liter` redondeado a céntimos. Falla si el
/// producto no cabe en la columna `total_cost`.
pub fn derive_total_cost(fuel_quantity: Decimal, price_per_liter: Decimal) -> Result<Decimal, AppError> {
    fuel_quantity
        .checked_mul(price_per_liter)
        .map(|total| total.round_dp(2))
        .filter(|total| *total <= MAX_COST)
        .ok_or_else(|| {
            field_error(
                "total_cost",
                "range",
                format!(
                    "fuel_quantity × price_per_liter exceeds the maximum total cost of {}",
                    MAX_COST
                ),
            )
        })
}

/// Coste total a guardar: el indicado, o el derivado si falta o es cero
pub fn resolve_total_cost(
    supplied: Option<Decimal>,
    fuel_quantity: Decimal,
    price_per_liter: Decimal,
) -> Result<Decimal, AppError> {
    match supplied {
        Some(total) if !total.is_zero() => Ok(total),
        _ => derive_total_cost(fuel_quantity, price_per_liter),
    }
}

/// `total_cost − discount`. Sin suelo: puede quedar negativo.
pub fn effective_cost(total_cost: Option<Decimal>, discount: Option<Decimal>) -> Decimal {
    match total_cost {
        Some(total) if !total.is_zero() => total - discount.unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Litros cada 100 km; 0 cuando no hay kilometraje
pub fn fuel_consumption(fuel_quantity: Decimal, mileage: i32) -> Decimal {
    if mileage <= 0 {
        return Decimal::ZERO;
    }
    fuel_quantity / Decimal::from(mileage) * Decimal::from(HUNDRED_KM)
}

/// Mes (1-12) y trimestre (1-4) de una fecha
pub fn month_and_quarter(date: NaiveDate) -> (i32, i32) {
    let month = date.month() as i32;
    (month, (month - 1) / 3 + 1)
}

/// Rechaza un repostaje nuevo anterior al último registrado del vehículo.
/// Las fechas iguales se aceptan.
pub fn ensure_chronological(latest: Option<NaiveDate>, date: NaiveDate) -> Result<(), AppError> {
    match latest {
        Some(latest) if latest > date => Err(field_error(
            "date",
            "chronological_order",
            format!(
                "A refueling dated {} already exists for this vehicle; new records cannot be dated before it",
                latest
            ),
        )),
        _ => Ok(()),
    }
}

/// Agregado de un periodo para un vehículo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub refuel_count: usize,
    pub total_distance: i64,
    pub total_fuel: Decimal,
    pub total_cost: Decimal,
    pub avg_price: Decimal,
    pub avg_consumption: Decimal,
}

impl PeriodSummary {
    pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a Refueling>) -> Self {
        let mut refuel_count = 0usize;
        let mut total_distance = 0i64;
        let mut total_fuel = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;
        let mut price_sum = Decimal::ZERO;

        for record in records {
            refuel_count += 1;
            total_distance += i64::from(record.mileage);
            total_fuel += record.fuel_quantity;
            total_cost += record.total_cost.unwrap_or(Decimal::ZERO);
            price_sum += record.price_per_liter;
        }

        let avg_price = if refuel_count > 0 {
            (price_sum / Decimal::from(refuel_count as u64)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        let avg_consumption = if total_distance > 0 {
            (total_fuel / Decimal::from(total_distance) * Decimal::from(HUNDRED_KM)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        Self {
            refuel_count,
            total_distance,
            total_fuel,
            total_cost,
            avg_price,
            avg_consumption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate, created_secs: i64, mileage: i32) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::nil(),
            date,
            created_at: Utc.timestamp_opt(created_secs, 0).unwrap(),
            mileage,
        }
    }

    fn refueling(mileage: i32, liters: i64, price: i64) -> Refueling {
        let d = date(2024, 5, 10);
        Refueling {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::nil(),
            gas_station_id: None,
            date: d,
            month: Some(5),
            quarter: Some(2),
            mileage,
            fuel_quantity: Decimal::from(liters),
            price_per_liter: Decimal::from(price),
            total_cost: Some(Decimal::from(liters * price)),
            discount: Decimal::ZERO,
            fuel_type: None,
            is_full_tank: false,
            comment: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_running_odometers_across_refuelings() {
        let a = entry(date(2024, 1, 10), 1, 200);
        let b = entry(date(2024, 1, 20), 2, 150);
        let odometers = running_odometers(1000, &[b.clone(), a.clone()]);

        assert_eq!(odometers[&a.id], 1200);
        assert_eq!(odometers[&b.id], 1350);
        assert_eq!(current_odometer(1000, [a.mileage, b.mileage]), 1350);
    }

    #[test]
    fn test_running_odometers_same_day_uses_creation_order() {
        let first = entry(date(2024, 3, 1), 10, 100);
        let second = entry(date(2024, 3, 1), 20, 50);
        let odometers = running_odometers(0, &[second.clone(), first.clone()]);

        assert_eq!(odometers[&first.id], 100);
        assert_eq!(odometers[&second.id], 150);
    }

    #[test]
    fn test_last_odometer_matches_current_odometer() {
        let entries: Vec<LedgerEntry> = (1..=10)
            .map(|i| entry(date(2024, 1, i), i as i64, 37 * i as i32))
            .collect();
        let odometers = running_odometers(5000, &entries);
        let last = entries.last().unwrap();

        assert_eq!(
            odometers[&last.id],
            current_odometer(5000, entries.iter().map(|e| e.mileage))
        );
    }

    #[test]
    fn test_running_odometers_empty() {
        assert!(running_odometers(1000, &[]).is_empty());
        assert_eq!(current_odometer(1000, std::iter::empty()), 1000);
    }

    #[test]
    fn test_total_and_effective_cost_with_discount() {
        let total = resolve_total_cost(None, Decimal::from(40), Decimal::from(50)).unwrap();
        assert_eq!(total, Decimal::from(2000));
        assert_eq!(effective_cost(Some(total), Some(Decimal::from(200))), Decimal::from(1800));
    }

    #[test]
    fn test_resolve_total_cost_keeps_supplied_value() {
        let supplied = Decimal::new(199_950, 2);
        assert_eq!(
            resolve_total_cost(Some(supplied), Decimal::from(40), Decimal::from(50)).unwrap(),
            supplied
        );
        // cero cuenta como ausente
        assert_eq!(
            resolve_total_cost(Some(Decimal::ZERO), Decimal::from(40), Decimal::from(50)).unwrap(),
            Decimal::from(2000)
        );
    }

    #[test]
    fn test_derive_total_cost_rounds_to_cents() {
        let total = derive_total_cost(Decimal::new(3333, 2), Decimal::new(5199, 2)).unwrap();
        assert_eq!(total, Decimal::new(173_283, 2));
    }

    #[test]
    fn test_derive_total_cost_rejects_overflow() {
        let huge = Decimal::from_str_exact("100000000000000000000").unwrap();
        match derive_total_cost(huge, huge) {
            Err(AppError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("total_cost"));
            }
            other => panic!("expected a total_cost error, got {:?}", other),
        }

        // cabe en NUMERIC(6,2) cada factor, pero no el producto en NUMERIC(8,2)
        let max_unit = Decimal::new(999_999, 2);
        assert!(derive_total_cost(max_unit, max_unit).is_err());
        assert_eq!(
            derive_total_cost(Decimal::from(100), Decimal::new(999_999, 2)).unwrap(),
            Decimal::new(99_999_900, 2)
        );
    }

    #[test]
    fn test_effective_cost_defaults_and_negative() {
        assert_eq!(effective_cost(Some(Decimal::from(100)), None), Decimal::from(100));
        assert_eq!(effective_cost(None, Some(Decimal::from(5))), Decimal::ZERO);
        assert_eq!(
            effective_cost(Some(Decimal::from(100)), Some(Decimal::from(150))),
            Decimal::from(-50)
        );
    }

    #[test]
    fn test_fuel_consumption() {
        assert_eq!(fuel_consumption(Decimal::from(40), 400), Decimal::from(10));
        assert_eq!(fuel_consumption(Decimal::from(40), 0), Decimal::ZERO);
    }

    #[test]
    fn test_month_and_quarter() {
        assert_eq!(month_and_quarter(date(2024, 5, 17)), (5, 2));
        assert_eq!(month_and_quarter(date(2024, 1, 1)), (1, 1));
        assert_eq!(month_and_quarter(date(2024, 12, 31)), (12, 4));
        assert_eq!(month_and_quarter(date(2024, 9, 30)), (9, 3));
    }

    #[test]
    fn test_ensure_chronological() {
        let latest = Some(date(2024, 6, 1));
        assert!(ensure_chronological(None, date(2020, 1, 1)).is_ok());
        assert!(ensure_chronological(latest, date(2024, 6, 1)).is_ok());
        assert!(ensure_chronological(latest, date(2024, 6, 2)).is_ok());

        match ensure_chronological(latest, date(2024, 5, 31)) {
            Err(AppError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("date"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_period_summary() {
        let records = vec![refueling(400, 40, 50), refueling(600, 50, 52)];
        let summary = PeriodSummary::aggregate(&records);

        assert_eq!(summary.refuel_count, 2);
        assert_eq!(summary.total_distance, 1000);
        assert_eq!(summary.total_fuel, Decimal::from(90));
        assert_eq!(summary.total_cost, Decimal::from(2000 + 2600));
        assert_eq!(summary.avg_price, Decimal::from(51));
        assert_eq!(summary.avg_consumption, Decimal::from(9));
    }

    #[test]
    fn test_period_summary_empty_is_zero_guarded() {
        let summary = PeriodSummary::aggregate(&Vec::<Refueling>::new());
        assert_eq!(summary.refuel_count, 0);
        assert_eq!(summary.avg_price, Decimal::ZERO);
        assert_eq!(summary.avg_consumption, Decimal::ZERO);
    }
}
