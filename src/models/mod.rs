//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL de `migrations/`.

pub mod enums;
pub mod fuel_price;
pub mod fuel_statistics;
pub mod gas_station;
pub mod refueling;
pub mod user;
pub mod utility;
pub mod vehicle;

pub use enums::{Bank, FuelType, PeriodType};
